// brewup-core/src/lib.rs

pub mod brew;
pub mod ensure;
pub mod process;
pub mod provision;
#[cfg(test)]
pub(crate) mod testing;

// Re-export key types for easier use by the CLI crate
pub use brew::{Brew, Pip};
pub use ensure::{ensure_installed, CONFLICT_RELINK_PACKAGE};
pub use process::{CommandOutput, CommandRunner, CommandSpec, DryRunRunner, SystemRunner};
pub use provision::{ProvisionPlan, Provisioner};
