// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use crate::automaton::AlphabetKind;

/// acmatch error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Empty pattern submitted for construction.
    #[error("invalid pattern #{index}: patterns must not be empty")]
    InvalidPattern { index: usize },

    /// Empty pattern on a pattern-file line.
    #[error("invalid pattern on line {line}: patterns must not be empty")]
    InvalidPatternLine { line: u64 },

    /// Attempt to add patterns after the automaton was built.
    #[error("automaton is immutable once built")]
    ImmutableAutomaton,

    /// Arena or pattern table outgrew its index type.
    #[error("capacity exceeded: {0}")]
    Capacity(&'static str),

    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Compiled automaton could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Persist(#[from] postcard::Error),

    /// Compiled automaton written by an incompatible format version.
    #[error("unsupported automaton format {found} (supported: {expected})")]
    FormatVersion { found: u32, expected: u32 },

    /// Compiled automaton built over a different alphabet.
    #[error("alphabet mismatch: expected {expected}, found {found}")]
    AlphabetMismatch {
        expected: AlphabetKind,
        found: AlphabetKind,
    },

    /// Compiled automaton violates a structural invariant.
    #[error("corrupt automaton: {0}")]
    Corrupt(String),
}

/// Result type using acmatch Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes, grep style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// At least one match (or the command succeeded)
    Success = 0,
    /// Scan completed without a match
    NoMatch = 1,
    /// Configuration, argument or pattern error
    ConfigError = 2,
    /// Internal or I/O error
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::InvalidPattern { .. }
            | Error::InvalidPatternLine { .. }
            | Error::Config { .. }
            | Error::Argument(_) => {
                ExitCode::ConfigError
            }
            Error::FormatVersion { .. } | Error::AlphabetMismatch { .. } => ExitCode::ConfigError,
            Error::ImmutableAutomaton | Error::Capacity(_) => {
                ExitCode::InternalError
            }
            Error::Io { .. } | Error::Persist(_) | Error::Corrupt(_) => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
