use std::sync::Arc;

use thiserror::Error;

/// Exit code used when a failure carries no exit status of its own.
pub const GENERIC_FAILURE_EXIT_CODE: i32 = 1;

#[derive(Error, Debug, Clone)]
pub enum BrewupError {
    #[error("I/O Error: {0}")]
    Io(#[from] Arc<std::io::Error>),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Compiler not supported: {0}")]
    UnsupportedCompiler(String),

    #[error("Command '{command}' failed{}", code_suffix(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("Failed to install '{package}' and the conflict relink fallback also failed{}", code_suffix(.code))]
    FallbackExhausted { package: String, code: Option<i32> },

    #[error("Failed to write path file {0}: {1}")]
    PathFile(String, String),
}

fn code_suffix(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!(" with exit code {c}"),
        None => " (terminated without an exit code)".to_string(),
    }
}

impl BrewupError {
    /// Process exit code to report for this error.
    ///
    /// External command failures propagate the tool's own code; everything
    /// else, including an unsupported compiler, exits with `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            BrewupError::CommandFailed { code: Some(c), .. }
            | BrewupError::FallbackExhausted { code: Some(c), .. }
                if *c != 0 =>
            {
                *c
            }
            _ => GENERIC_FAILURE_EXIT_CODE,
        }
    }
}

impl From<std::io::Error> for BrewupError {
    fn from(err: std::io::Error) -> Self {
        BrewupError::Io(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, BrewupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failure_propagates_tool_exit_code() {
        let err = BrewupError::CommandFailed {
            command: "brew install cmake".to_string(),
            code: Some(42),
        };
        assert_eq!(err.exit_code(), 42);
        assert!(err.to_string().contains("exit code 42"));
    }

    #[test]
    fn unsupported_compiler_exits_with_one_and_names_value() {
        let err = BrewupError::UnsupportedCompiler("not-a-real-compiler".to_string());
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("not-a-real-compiler"));
    }

    #[test]
    fn signal_terminated_command_exits_with_one() {
        let err = BrewupError::FallbackExhausted {
            package: "gcc@6".to_string(),
            code: None,
        };
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("gcc@6"));
    }
}
