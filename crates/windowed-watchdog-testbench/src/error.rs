//! Error types for the testbench and the script runner.

use thiserror::Error;
use windowed_watchdog::{Register, StatusBits, WatchdogError};

/// Errors raised by the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TestbenchError {
    /// The core rejected a configuration or register offset.
    #[error(transparent)]
    Watchdog(#[from] WatchdogError),
}

/// A specialized `Result` type for harness operations.
pub type TestbenchResult<T> = std::result::Result<T, TestbenchError>;

/// Errors raised while parsing or running a stimulus script.
///
/// Every variant carries the 1-based source line it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// The script text is malformed.
    #[error("line {line}: {message}")]
    Parse {
        /// Source line.
        line: usize,
        /// What was wrong with it.
        message: String,
    },

    /// An `expect` or `expect-not` did not hold.
    #[error(
        "line {line}: expected status {}{expected}, got {actual}",
        negation(.negated)
    )]
    ExpectationFailed {
        /// Source line.
        line: usize,
        /// Status the script named.
        expected: StatusBits,
        /// Status the core exported.
        actual: StatusBits,
        /// Whether this was an `expect-not`.
        negated: bool,
    },

    /// A `read` with an expected value got something else.
    #[error("line {line}: expected {register} to read {expected:#x}, got {actual:#x}")]
    ReadMismatch {
        /// Source line.
        line: usize,
        /// Register that was read.
        register: Register,
        /// Value the script named.
        expected: u32,
        /// Value the core returned.
        actual: u32,
    },
}

fn negation(negated: &bool) -> &'static str {
    if *negated { "other than " } else { "" }
}

impl ScriptError {
    /// Create a parse error.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Source line the error refers to.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::Parse { line, .. }
            | Self::ExpectationFailed { line, .. }
            | Self::ReadMismatch { line, .. } => *line,
        }
    }

    /// Whether the script ran but an assertion failed.
    #[must_use]
    pub fn is_assertion(&self) -> bool {
        matches!(
            self,
            Self::ExpectationFailed { .. } | Self::ReadMismatch { .. }
        )
    }
}
