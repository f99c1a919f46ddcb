// brewup/src/cli.rs
//! Defines the command-line argument structure using clap.
use std::path::PathBuf;

use brewup_common::error::Result;
use brewup_common::Config;
use clap::{ArgAction, Parser, Subcommand};

pub mod compilers;
pub mod ensure;
pub mod run;

use crate::cli::compilers::Compilers;
use crate::cli::ensure::EnsureArgs;
use crate::cli::run::RunArgs;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, name = "brewup", bin_name = "brewup")]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Provision the host: update Homebrew, install build deps, compiler and Python tooling
    Run(RunArgs),
    /// Install or upgrade a single formula
    Ensure(EnsureArgs),
    /// List supported COMPILER values
    Compilers(Compilers),
}

impl Command {
    pub async fn run(&self) -> Result<()> {
        match self {
            Self::Compilers(command) => command.run(),
            Self::Run(command) => {
                // Selector problems are reported before configuration or any step.
                let compiler = command.compiler()?;
                let config = Config::load()?;
                command.run(compiler, &config).await
            }
            Self::Ensure(command) => command.run(&Config::load()?).await,
        }
    }
}
