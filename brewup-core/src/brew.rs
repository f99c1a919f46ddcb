// brewup-core/src/brew.rs
//! Thin wrappers over the `brew` and `pip` command lines.
use brewup_common::error::Result;
use brewup_common::model::{OutdatedStatus, PackageRequest};
use tracing::debug;

use crate::process::{CommandOutput, CommandRunner, CommandSpec};

pub struct Brew<'r, R: CommandRunner> {
    runner: &'r R,
    executable: String,
}

impl<'r, R: CommandRunner> Brew<'r, R> {
    pub fn new(runner: &'r R, executable: impl Into<String>) -> Self {
        Self {
            runner,
            executable: executable.into(),
        }
    }

    fn spec<I, S>(&self, args: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec::new(self.executable.clone(), args)
    }

    /// `brew update`; fails on non-zero exit.
    pub async fn update(&self) -> Result<()> {
        let spec = self.spec(["update"]);
        self.runner.stream(&spec).await?.check(&spec)?;
        Ok(())
    }

    /// Names from `brew list -1`, one per line.
    pub async fn list_installed(&self) -> Result<Vec<String>> {
        let spec = self.spec(["list", "-1"]);
        let output = self.runner.capture(&spec).await?.check(&spec)?;
        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Exact, whole-line match against the installed listing.
    pub async fn is_installed(&self, name: &str) -> Result<bool> {
        let installed = self.list_installed().await?.iter().any(|n| n == name);
        debug!("'{}' installed: {}", name, installed);
        Ok(installed)
    }

    /// `brew outdated <name>` exits non-zero when the formula is outdated.
    pub async fn outdated(&self, name: &str) -> Result<OutdatedStatus> {
        let spec = self.spec(["outdated", name]);
        let output = self.runner.capture(&spec).await?;
        let status = classify_outdated(&output, name);
        debug!("'{}' outdated check: {:?}", name, status);
        Ok(status)
    }

    fn install_spec(&self, request: &PackageRequest) -> CommandSpec {
        self.spec(std::iter::once("install".to_string()).chain(request.install_args()))
    }

    /// `brew install`; the exit status is left to the caller.
    pub async fn install(&self, request: &PackageRequest) -> Result<CommandOutput> {
        self.runner.stream(&self.install_spec(request)).await
    }

    /// `brew upgrade`; fails on non-zero exit.
    pub async fn upgrade(&self, request: &PackageRequest) -> Result<()> {
        let spec = self.spec(std::iter::once("upgrade".to_string()).chain(request.install_args()));
        self.runner.stream(&spec).await?.check(&spec)?;
        Ok(())
    }

    /// `brew link --overwrite <name>`.
    pub async fn link_overwrite(&self, name: &str) -> Result<CommandOutput> {
        let spec = self.spec(["link", "--overwrite", name]);
        self.runner.stream(&spec).await
    }

    /// `brew install` that must succeed; no fallback.
    pub async fn install_required(&self, request: &PackageRequest) -> Result<()> {
        let spec = self.install_spec(request);
        self.runner.stream(&spec).await?.check(&spec)?;
        Ok(())
    }
}

fn classify_outdated(output: &CommandOutput, name: &str) -> OutdatedStatus {
    if output.succeeded() {
        return OutdatedStatus::UpToDate;
    }
    // Outdated formulas are listed as "name" or "name (old) < new".
    let listed = output
        .stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .any(|first| first == name);
    if listed {
        OutdatedStatus::Outdated
    } else {
        OutdatedStatus::CheckFailed
    }
}

pub struct Pip<'r, R: CommandRunner> {
    runner: &'r R,
    executable: String,
}

impl<'r, R: CommandRunner> Pip<'r, R> {
    pub fn new(runner: &'r R, executable: impl Into<String>) -> Self {
        Self {
            runner,
            executable: executable.into(),
        }
    }

    /// `pip install <package>`; fails on non-zero exit.
    pub async fn install(&self, package: &str) -> Result<()> {
        let spec = CommandSpec::new(self.executable.clone(), ["install", package]);
        self.runner.stream(&spec).await?.check(&spec)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedRunner;

    #[tokio::test]
    async fn installed_match_is_exact_per_line() {
        let runner = ScriptedRunner::new()
            .respond("brew list -1", CommandOutput::success().with_stdout("cmake\ngcc@6\ncoreutils\n"));
        let brew = Brew::new(&runner, "brew");
        assert!(brew.is_installed("gcc@6").await.unwrap());
        assert!(!brew.is_installed("gcc").await.unwrap());
        assert!(!brew.is_installed("core").await.unwrap());
    }

    #[tokio::test]
    async fn failing_listing_is_an_error() {
        let runner = ScriptedRunner::new().respond("brew list -1", CommandOutput::failure(1));
        let brew = Brew::new(&runner, "brew");
        assert!(brew.is_installed("cmake").await.is_err());
    }

    #[test]
    fn outdated_exit_codes_are_tri_state() {
        let up = CommandOutput::success();
        assert_eq!(classify_outdated(&up, "cmake"), OutdatedStatus::UpToDate);

        let listed = CommandOutput::failure(1).with_stdout("cmake (3.9.0) < 3.10.1\n");
        assert_eq!(classify_outdated(&listed, "cmake"), OutdatedStatus::Outdated);

        let bare = CommandOutput::failure(1).with_stdout("cmake\n");
        assert_eq!(classify_outdated(&bare, "cmake"), OutdatedStatus::Outdated);

        let silent = CommandOutput::failure(1);
        assert_eq!(classify_outdated(&silent, "cmake"), OutdatedStatus::CheckFailed);
    }

    #[tokio::test]
    async fn install_appends_extra_args_after_name() {
        let runner = ScriptedRunner::new();
        let brew = Brew::new(&runner, "brew");
        let request = PackageRequest::with_extra_args("llvm@5", ["--with-clang", "--with-libcxx"]);
        brew.install(&request).await.unwrap();
        assert_eq!(runner.calls(), vec!["brew install llvm@5 --with-clang --with-libcxx"]);
    }

    #[tokio::test]
    async fn pip_install_failure_propagates_exit_code() {
        let runner = ScriptedRunner::new().respond("pip3 install typed_ast", CommandOutput::failure(2));
        let pip = Pip::new(&runner, "pip3");
        let err = pip.install("typed_ast").await.unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
