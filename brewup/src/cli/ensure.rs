use brewup_common::config::Config;
use brewup_common::error::Result;
use brewup_common::PackageRequest;
use brewup_core::{CommandRunner, DryRunRunner, Provisioner, SystemRunner};
use clap::Args;
use colored::Colorize;

#[derive(Args, Debug)]
pub struct EnsureArgs {
    /// Formula to install or upgrade
    pub name: String,

    /// Extra flags for install/upgrade, after `--`
    #[arg(last = true)]
    pub extra_args: Vec<String>,

    /// Print the commands instead of running them
    #[arg(long)]
    pub dry_run: bool,
}

impl EnsureArgs {
    pub async fn run(&self, config: &Config) -> Result<()> {
        let request = PackageRequest::with_extra_args(self.name.clone(), self.extra_args.clone());
        if self.dry_run {
            ensure(&DryRunRunner, config, &request).await
        } else {
            ensure(&SystemRunner, config, &request).await
        }
    }
}

async fn ensure<R: CommandRunner>(runner: &R, config: &Config, request: &PackageRequest) -> Result<()> {
    let (outcome, record) = Provisioner::new(runner, config).ensure(request).await?;
    eprintln!(
        "{}{} {:?}",
        "==> ".bold().blue(),
        record.to_string().bold(),
        outcome
    );
    Ok(())
}
