// brewup-core/src/provision.rs
use std::future::Future;
use std::path::PathBuf;
use std::time::Instant;

use brewup_common::config::Config;
use brewup_common::error::Result;
use brewup_common::model::{
    CompilerSelector, EnsureOutcome, PackageRequest, PathUpdate, ProvisionReport, StepRecord,
};
use tracing::{debug, info, instrument, warn};

use crate::brew::{Brew, Pip};
use crate::ensure::ensure_installed;
use crate::process::CommandRunner;

/// Formulas every job gets: checksum tool, GNU coreutils (for `timeout`)
/// and the formatter.
pub const BASE_FORMULAS: [&str; 3] = ["md5sha1sum", "coreutils", "clang-format"];
/// Only installed when no `cmake` is on PATH already.
pub const BUILD_SYSTEM_FORMULA: &str = "cmake";
pub const PYTHON_FORMULA: &str = "python3";
/// Test runner, its parallel plugin and the typed AST library.
pub const PYTHON_PACKAGES: [&str; 3] = ["pytest", "pytest-xdist", "typed_ast"];

/// Everything a run needs, resolved up front.
#[derive(Debug, Clone)]
pub struct ProvisionPlan {
    pub compiler: CompilerSelector,
    pub base_packages: Vec<PackageRequest>,
    pub build_system: PackageRequest,
    pub python_formula: PackageRequest,
    pub python_packages: Vec<String>,
    pub bin_dir: PathBuf,
}

impl ProvisionPlan {
    pub fn standard(compiler: CompilerSelector, config: &Config) -> Self {
        Self {
            compiler,
            base_packages: BASE_FORMULAS.into_iter().map(PackageRequest::new).collect(),
            build_system: PackageRequest::new(BUILD_SYSTEM_FORMULA),
            python_formula: PackageRequest::new(PYTHON_FORMULA),
            python_packages: PYTHON_PACKAGES.into_iter().map(str::to_string).collect(),
            bin_dir: config.bin_dir(),
        }
    }
}

pub struct Provisioner<'r, R: CommandRunner> {
    brew: Brew<'r, R>,
    pip: Pip<'r, R>,
    runner: &'r R,
}

impl<'r, R: CommandRunner> Provisioner<'r, R> {
    pub fn new(runner: &'r R, config: &Config) -> Self {
        Self {
            brew: Brew::new(runner, config.brew_executable.clone()),
            pip: Pip::new(runner, config.pip_executable.clone()),
            runner,
        }
    }

    /// Runs every step in order, stopping at the first failure.
    ///
    /// The returned report carries the `PATH` change; it is not applied here.
    #[instrument(skip(self, plan), fields(compiler = %plan.compiler))]
    pub async fn run(&self, plan: &ProvisionPlan) -> Result<ProvisionReport> {
        let mut steps = Vec::new();

        timed(&mut steps, "brew update".to_string(), self.brew.update()).await?;

        for request in &plan.base_packages {
            self.timed_ensure(&mut steps, request).await?;
        }

        if self.runner.resolves_on_path(&plan.build_system.name) {
            info!("'{}' already on PATH, skipping", plan.build_system.name);
        } else {
            self.timed_ensure(&mut steps, &plan.build_system).await?;
        }

        match plan.compiler.package_request() {
            Some(request) => {
                self.timed_ensure(&mut steps, &request).await?;
            }
            None => info!("Using the host's default clang for '{}'", plan.compiler),
        }

        timed(
            &mut steps,
            format!("install {}", plan.python_formula.name),
            self.brew.install_required(&plan.python_formula),
        )
        .await?;

        for package in &plan.python_packages {
            timed(
                &mut steps,
                format!("pip install {package}"),
                self.pip.install(package),
            )
            .await?;
        }

        let path_update = PathUpdate::prepend(plan.bin_dir.clone());
        debug!("Provisioning finished; PATH update: {:?}", path_update);
        Ok(ProvisionReport { steps, path_update })
    }

    /// `ensure_installed` for a single formula, with timing.
    pub async fn ensure(&self, request: &PackageRequest) -> Result<(EnsureOutcome, StepRecord)> {
        let mut steps = Vec::with_capacity(1);
        let outcome = self.timed_ensure(&mut steps, request).await?;
        let record = steps.pop().unwrap_or_else(|| StepRecord {
            name: format!("ensure {}", request.name),
            elapsed: Default::default(),
        });
        Ok((outcome, record))
    }

    async fn timed_ensure(
        &self,
        steps: &mut Vec<StepRecord>,
        request: &PackageRequest,
    ) -> Result<EnsureOutcome> {
        let outcome = timed(
            steps,
            format!("ensure {}", request.name),
            ensure_installed(&self.brew, request),
        )
        .await?;
        debug!("'{}' ensured via {:?}", request.name, outcome);
        Ok(outcome)
    }
}

async fn timed<T>(
    steps: &mut Vec<StepRecord>,
    name: String,
    step: impl Future<Output = Result<T>>,
) -> Result<T> {
    info!("==> {}", name);
    let start = Instant::now();
    let result = step.await;
    let record = StepRecord {
        name,
        elapsed: start.elapsed(),
    };
    match &result {
        Ok(_) => {
            info!("{}", record);
            steps.push(record);
        }
        // Not recorded; the error ends the run.
        Err(e) => warn!("{} failed: {}", record, e),
    }
    result
}
