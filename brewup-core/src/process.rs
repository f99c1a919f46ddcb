// brewup-core/src/process.rs
use std::fmt;
use std::process::Stdio;
use std::sync::Arc;

use brewup_common::error::{BrewupError, Result};
use serde::{Deserialize, Serialize};
use tokio::io;
use tokio::process::Command;
use tracing::{debug, error};

/// An external command line: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
    /// Empty for streamed commands.
    pub stdout: String,
}

impl CommandOutput {
    pub fn success() -> Self {
        Self {
            code: Some(0),
            stdout: String::new(),
        }
    }

    pub fn failure(code: i32) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    pub fn succeeded(&self) -> bool {
        self.code == Some(0)
    }

    /// Turns a non-zero exit into `CommandFailed` for `spec`.
    pub fn check(self, spec: &CommandSpec) -> Result<Self> {
        if self.succeeded() {
            Ok(self)
        } else {
            Err(BrewupError::CommandFailed {
                command: spec.to_string(),
                code: self.code,
            })
        }
    }
}

/// Seam between provisioning logic and the processes it starts.
///
/// A non-zero exit is reported through [`CommandOutput`], not as an error;
/// `Err` means the command could not be run at all.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Runs `spec` and captures its stdout. Used for queries.
    async fn capture(&self, spec: &CommandSpec) -> Result<CommandOutput>;

    /// Runs `spec` with its output shown on stderr.
    async fn stream(&self, spec: &CommandSpec) -> Result<CommandOutput>;

    /// Whether `program` resolves to an executable on the search path.
    fn resolves_on_path(&self, program: &str) -> bool {
        let found = which::which(program);
        debug!("PATH lookup for '{}': {:?}", program, found);
        found.is_ok()
    }
}

/// Runs commands on the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn capture(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        debug!("Running command (captured): {}", spec);
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        cmd.kill_on_drop(true);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.stdin(Stdio::null());

        match cmd.output().await {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout).to_string();
                if !output.status.success() {
                    debug!("Command '{}' failed with status: {}", spec, output.status);
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    if !stderr.trim().is_empty() {
                        debug!("Stderr:\n{}", stderr.trim());
                    }
                }
                Ok(CommandOutput {
                    code: output.status.code(),
                    stdout,
                })
            }
            Err(e) => {
                error!("Failed to execute '{}': {}", spec, e);
                Err(BrewupError::Io(Arc::new(e)))
            }
        }
    }

    /// The child's stdout is forwarded to our stderr so that stdout stays
    /// reserved for the `export` line.
    async fn stream(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        debug!("Running command: {}", spec);
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        cmd.kill_on_drop(true);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| {
            error!("Failed to execute '{}': {}", spec, e);
            BrewupError::Io(Arc::new(e))
        })?;
        let child_stdout = child.stdout.take();
        let forward = async move {
            match child_stdout {
                Some(mut out) => io::copy(&mut out, &mut io::stderr()).await.map(|_| ()),
                None => Ok(()),
            }
        };

        let (status, forwarded) = tokio::join!(child.wait(), forward);
        if let Err(e) = forwarded {
            debug!("Could not forward output of '{}': {}", spec, e);
        }
        let status = status.map_err(|e| BrewupError::Io(Arc::new(e)))?;
        if !status.success() {
            debug!("Command '{}' failed with status: {}", spec, status);
        }
        Ok(CommandOutput {
            code: status.code(),
            stdout: String::new(),
        })
    }
}

/// Prints commands to stderr instead of running them. Queries report nothing
/// installed and every command succeeds; PATH lookups stay real.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunRunner;

impl CommandRunner for DryRunRunner {
    async fn capture(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        eprintln!("[dry-run] {spec}");
        Ok(CommandOutput::success())
    }

    async fn stream(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        eprintln!("[dry-run] {spec}");
        Ok(CommandOutput::success())
    }
}
