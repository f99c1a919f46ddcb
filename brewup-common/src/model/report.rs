use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::path::PathUpdate;

/// Result of `brew outdated <name>`, which exits non-zero when the formula
/// *is* outdated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutdatedStatus {
    UpToDate,
    Outdated,
    /// Non-zero exit that did not list the formula; treated like `Outdated`.
    CheckFailed,
}

impl OutdatedStatus {
    pub fn needs_upgrade(&self) -> bool {
        !matches!(self, OutdatedStatus::UpToDate)
    }
}

/// Which path `ensure_installed` took. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnsureOutcome {
    UpToDate,
    Upgraded,
    Installed,
    /// Install failed and the conflict relink fallback succeeded.
    Relinked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub name: String,
    pub elapsed: Duration,
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Millisecond precision is plenty for install steps.
        let rounded = Duration::from_millis(self.elapsed.as_millis() as u64);
        write!(f, "{} ({})", self.name, humantime::format_duration(rounded))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionReport {
    pub steps: Vec<StepRecord>,
    pub path_update: PathUpdate,
}

impl ProvisionReport {
    pub fn total_elapsed(&self) -> Duration {
        self.steps.iter().map(|s| s.elapsed).sum()
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_up_to_date_skips_upgrade() {
        assert!(!OutdatedStatus::UpToDate.needs_upgrade());
        assert!(OutdatedStatus::Outdated.needs_upgrade());
        assert!(OutdatedStatus::CheckFailed.needs_upgrade());
    }

    #[test]
    fn step_record_renders_humantime_duration() {
        let record = StepRecord {
            name: "brew update".to_string(),
            elapsed: Duration::from_millis(1_500),
        };
        assert_eq!(record.to_string(), "brew update (1s 500ms)");
    }
}
