//! Error types for wdogctl

use thiserror::Error;
use windowed_watchdog_testbench::{ScriptError, TestbenchError};

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Script failed: {0}")]
    Script(#[from] ScriptError),

    #[error("Scenario `{name}` failed: {source}")]
    Scenario {
        name: String,
        #[source]
        source: ScriptError,
    },

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error(transparent)]
    InvalidConfiguration(#[from] TestbenchError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Script(err) | Self::Scenario { source: err, .. } if err.is_assertion() => 2,
            Self::Script(_)
            | Self::Scenario { .. }
            | Self::ScenarioNotFound(_)
            | Self::InvalidConfiguration(_)
            | Self::ValidationError(_) => 3,
            Self::IoError(_) | Self::JsonError(_) => 1,
        }
    }
}
