// brewup-common/src/model/mod.rs
pub mod compiler;
pub mod package;
pub mod path;
pub mod report;

pub use compiler::CompilerSelector;
pub use package::PackageRequest;
pub use path::PathUpdate;
pub use report::{EnsureOutcome, OutdatedStatus, ProvisionReport, StepRecord};
