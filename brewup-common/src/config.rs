// brewup-common/src/config.rs
use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{BrewupError, Result};

// Fallback if HOMEBREW_PREFIX is not set or is empty. CI macOS images ship
// Homebrew under /usr/local.
const DEFAULT_FALLBACK_BREW_PREFIX: &str = "/usr/local";
const DEFAULT_BREW_EXECUTABLE: &str = "brew";
const DEFAULT_PIP_EXECUTABLE: &str = "pip3";

#[derive(Debug, Clone)]
pub struct Config {
    pub brew_prefix: PathBuf,
    pub brew_executable: String,
    pub pip_executable: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        debug!("Loading brewup configuration");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let brew_prefix = non_empty("HOMEBREW_PREFIX").unwrap_or_else(|| {
            debug!(
                "HOMEBREW_PREFIX not set or empty, falling back to default: {}",
                DEFAULT_FALLBACK_BREW_PREFIX
            );
            DEFAULT_FALLBACK_BREW_PREFIX.to_string()
        });
        let brew_prefix = PathBuf::from(brew_prefix);
        if !brew_prefix.is_absolute() {
            return Err(BrewupError::Config(format!(
                "HOMEBREW_PREFIX must be an absolute path, got '{}'",
                brew_prefix.display()
            )));
        }
        debug!("Effective Homebrew prefix: {}", brew_prefix.display());

        let brew_executable =
            non_empty("BREWUP_BREW").unwrap_or_else(|| DEFAULT_BREW_EXECUTABLE.to_string());
        let pip_executable =
            non_empty("BREWUP_PIP").unwrap_or_else(|| DEFAULT_PIP_EXECUTABLE.to_string());
        debug!("Using brew='{}', pip='{}'", brew_executable, pip_executable);

        Ok(Self {
            brew_prefix,
            brew_executable,
            pip_executable,
        })
    }

    pub fn brew_prefix(&self) -> &Path {
        &self.brew_prefix
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.brew_prefix.join("bin")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.brew_prefix(), Path::new("/usr/local"));
        assert_eq!(config.bin_dir(), PathBuf::from("/usr/local/bin"));
        assert_eq!(config.brew_executable, "brew");
        assert_eq!(config.pip_executable, "pip3");
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOMEBREW_PREFIX", "/opt/homebrew"),
            ("BREWUP_BREW", "/opt/homebrew/bin/brew"),
            ("BREWUP_PIP", "pip3.12"),
        ]))
        .unwrap();
        assert_eq!(config.bin_dir(), PathBuf::from("/opt/homebrew/bin"));
        assert_eq!(config.brew_executable, "/opt/homebrew/bin/brew");
        assert_eq!(config.pip_executable, "pip3.12");
    }

    #[test]
    fn blank_values_fall_back() {
        let config =
            Config::from_lookup(lookup_from(&[("HOMEBREW_PREFIX", "  "), ("BREWUP_PIP", "")]))
                .unwrap();
        assert_eq!(config.brew_prefix(), Path::new("/usr/local"));
        assert_eq!(config.pip_executable, "pip3");
    }

    #[test]
    fn relative_prefix_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("HOMEBREW_PREFIX", "homebrew")])).unwrap_err();
        assert!(matches!(err, BrewupError::Config(_)));
    }
}
