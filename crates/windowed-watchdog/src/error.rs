//! Error types for watchdog configuration and register decoding.
//!
//! The core's write operations and `tick()` never fail. Errors only arise
//! while building a configuration or when a bus offset does not name a
//! register.

use thiserror::Error;

/// Errors produced at the configuration and register boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WatchdogError {
    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// Bus offset outside the register map.
    #[error("Unknown register offset: {offset}")]
    UnknownRegister {
        /// The offset that was decoded.
        offset: u32,
    },

    /// Register name not in the register map.
    #[error("Unrecognized register name")]
    UnrecognizedRegisterName,
}

impl WatchdogError {
    /// Create an invalid configuration error.
    #[must_use]
    pub const fn invalid_configuration(msg: &'static str) -> Self {
        Self::InvalidConfiguration(msg)
    }

    /// Create an unknown register error.
    #[must_use]
    pub const fn unknown_register(offset: u32) -> Self {
        Self::UnknownRegister { offset }
    }
}

/// A specialized `Result` type for watchdog operations.
pub type WatchdogResult<T> = core::result::Result<T, WatchdogError>;
