//! Compiler toolchain selection for the CI host.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::package::PackageRequest;
use crate::error::BrewupError;

/// Flags passed to versioned `llvm@` formulas so the clang front end and
/// libc++ get built.
pub const LLVM_EXTRA_ARGS: [&str; 2] = ["--with-clang", "--with-libcxx"];

/// The compiler a CI job asked for, usually via `COMPILER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompilerSelector {
    Gcc49,
    Gcc5,
    Gcc6,
    ClangDefault,
    Clang37,
    Clang38,
    Clang39,
    Clang40,
    Clang50,
}

impl CompilerSelector {
    pub const ALL: [CompilerSelector; 9] = [
        CompilerSelector::Gcc49,
        CompilerSelector::Gcc5,
        CompilerSelector::Gcc6,
        CompilerSelector::ClangDefault,
        CompilerSelector::Clang37,
        CompilerSelector::Clang38,
        CompilerSelector::Clang39,
        CompilerSelector::Clang40,
        CompilerSelector::Clang50,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerSelector::Gcc49 => "gcc-4.9",
            CompilerSelector::Gcc5 => "gcc-5",
            CompilerSelector::Gcc6 => "gcc-6",
            CompilerSelector::ClangDefault => "clang-default",
            CompilerSelector::Clang37 => "clang-3.7",
            CompilerSelector::Clang38 => "clang-3.8",
            CompilerSelector::Clang39 => "clang-3.9",
            CompilerSelector::Clang40 => "clang-4.0",
            CompilerSelector::Clang50 => "clang-5.0",
        }
    }

    /// The formula providing this compiler, or `None` when the host's
    /// default clang is used as-is.
    pub fn package_request(&self) -> Option<PackageRequest> {
        let gcc = |formula: &str| Some(PackageRequest::new(formula));
        let llvm = |formula: &str| {
            Some(PackageRequest::with_extra_args(formula, LLVM_EXTRA_ARGS))
        };
        match self {
            CompilerSelector::Gcc49 => gcc("gcc@4.9"),
            CompilerSelector::Gcc5 => gcc("gcc@5"),
            CompilerSelector::Gcc6 => gcc("gcc@6"),
            CompilerSelector::ClangDefault => None,
            CompilerSelector::Clang37 => llvm("llvm@3.7"),
            CompilerSelector::Clang38 => llvm("llvm@3.8"),
            CompilerSelector::Clang39 => llvm("llvm@3.9"),
            CompilerSelector::Clang40 => llvm("llvm@4"),
            CompilerSelector::Clang50 => llvm("llvm@5"),
        }
    }

    /// Parses an optional raw value; a missing value is unsupported too.
    pub fn from_optional(raw: Option<&str>) -> Result<Self, BrewupError> {
        match raw {
            Some(value) => value.parse(),
            None => Err(BrewupError::UnsupportedCompiler("<unset>".to_string())),
        }
    }
}

impl FromStr for CompilerSelector {
    type Err = BrewupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|selector| selector.as_str() == s)
            .ok_or_else(|| BrewupError::UnsupportedCompiler(s.to_string()))
    }
}

impl fmt::Display for CompilerSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
