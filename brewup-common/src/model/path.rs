//! The executable search path change produced by a provisioning run.
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BrewupError, Result};

/// A directory to put in front of `PATH`.
///
/// Provisioning never touches the process environment itself; the caller
/// decides where to apply this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathUpdate {
    pub dir: PathBuf,
}

impl PathUpdate {
    pub fn prepend(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns `current` with `dir` first. Later copies of `dir` are dropped so
    /// repeated runs do not grow the path.
    pub fn apply(&self, current: Option<&OsStr>) -> Result<OsString> {
        let existing = current
            .map(|value| env::split_paths(value).collect::<Vec<_>>())
            .unwrap_or_default();
        let entries = std::iter::once(self.dir.clone())
            .chain(existing.into_iter().filter(|entry| entry != &self.dir));
        env::join_paths(entries).map_err(|e| {
            BrewupError::Config(format!(
                "Cannot add {} to PATH: {e}",
                self.dir.display()
            ))
        })
    }

    /// A line a POSIX shell can `eval` to pick up the change.
    pub fn shell_export(&self) -> String {
        format!("export PATH=\"{}:$PATH\"", self.dir.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepends_before_existing_entries() {
        let update = PathUpdate::prepend("/usr/local/bin");
        let applied = update.apply(Some(OsStr::new("/usr/bin:/bin"))).unwrap();
        assert_eq!(applied, OsString::from("/usr/local/bin:/usr/bin:/bin"));
    }

    #[test]
    fn existing_copy_is_moved_to_front_not_duplicated() {
        let update = PathUpdate::prepend("/usr/local/bin");
        let applied = update
            .apply(Some(OsStr::new("/usr/bin:/usr/local/bin:/bin")))
            .unwrap();
        assert_eq!(applied, OsString::from("/usr/local/bin:/usr/bin:/bin"));
    }

    #[test]
    fn missing_path_yields_only_the_new_dir() {
        let update = PathUpdate::prepend("/opt/homebrew/bin");
        assert_eq!(update.apply(None).unwrap(), OsString::from("/opt/homebrew/bin"));
    }

    #[test]
    fn shell_export_keeps_caller_path() {
        let update = PathUpdate::prepend("/usr/local/bin");
        assert_eq!(update.shell_export(), "export PATH=\"/usr/local/bin:$PATH\"");
    }
}
