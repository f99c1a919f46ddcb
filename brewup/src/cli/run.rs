// brewup/src/cli/run.rs
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use brewup_common::config::Config;
use brewup_common::error::{BrewupError, Result};
use brewup_common::model::{PathUpdate, ProvisionReport};
use brewup_common::CompilerSelector;
use brewup_core::{CommandRunner, DryRunRunner, ProvisionPlan, Provisioner, SystemRunner};
use clap::Args;
use colored::Colorize;
use tracing::{debug, instrument};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Compiler to provision, e.g. gcc-6 or clang-default
    #[arg(long, env = "COMPILER")]
    pub compiler: Option<String>,

    /// Print the commands instead of running them
    #[arg(long)]
    pub dry_run: bool,

    /// Append the Homebrew bin directory to this file (GitHub Actions style)
    #[arg(long, value_name = "FILE")]
    pub path_file: Option<PathBuf>,
}

impl RunArgs {
    pub fn compiler(&self) -> Result<CompilerSelector> {
        CompilerSelector::from_optional(self.compiler.as_deref())
    }

    #[instrument(skip(self, config), fields(dry_run = self.dry_run))]
    pub async fn run(&self, compiler: CompilerSelector, config: &Config) -> Result<()> {
        let plan = ProvisionPlan::standard(compiler, config);
        let report = if self.dry_run {
            provision(&DryRunRunner, config, &plan).await?
        } else {
            provision(&SystemRunner, config, &plan).await?
        };

        print_summary(&report);
        self.publish_path(&report.path_update)
    }

    fn publish_path(&self, update: &PathUpdate) -> Result<()> {
        let new_path = update.apply(env::var_os("PATH").as_deref())?;
        debug!("PATH after this run: {:?}", new_path);

        if let Some(path_file) = &self.path_file {
            append_path_file(path_file, update.dir())?;
        }
        // Sole stdout line; the calling shell evals it.
        println!("{}", update.shell_export());
        Ok(())
    }
}

async fn provision<R: CommandRunner>(
    runner: &R,
    config: &Config,
    plan: &ProvisionPlan,
) -> Result<ProvisionReport> {
    Provisioner::new(runner, config).run(plan).await
}

fn print_summary(report: &ProvisionReport) {
    eprintln!("{}{}", "==> ".bold().blue(), "Provisioning complete".bold());
    for step in &report.steps {
        eprintln!("    {step}");
    }
    let total = std::time::Duration::from_millis(report.total_elapsed().as_millis() as u64);
    eprintln!("    total: {}", humantime::format_duration(total));
}

fn append_path_file(path_file: &Path, dir: &Path) -> Result<()> {
    let write = || -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path_file)?;
        writeln!(file, "{}", dir.display())
    };
    write().map_err(|e| BrewupError::PathFile(path_file.display().to_string(), e.to_string()))?;
    debug!("Appended {} to {}", dir.display(), path_file.display());
    Ok(())
}
