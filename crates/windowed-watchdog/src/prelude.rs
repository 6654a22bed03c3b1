//! Prelude for windowed-watchdog.
//!
//! This module re-exports the most commonly used types for convenient importing.
//!
//! # Example
//!
//! ```rust
//! use windowed_watchdog::prelude::*;
//!
//! let mut watchdog = WatchdogCore::default();
//! watchdog.write_register(Register::WindowClose, 10);
//! watchdog.write_register(Register::Control, CONTROL_ENABLE);
//! assert_eq!(watchdog.tick().to_byte(), 0b0101_1000);
//! ```

pub use crate::config::{DisabledStatus, WatchdogConfig, WatchdogConfigBuilder};
pub use crate::error::{WatchdogError, WatchdogResult};
pub use crate::metrics::WatchdogMetrics;
pub use crate::port::StatusPort;
pub use crate::registers::{CONTROL_ENABLE, Register, RegisterInterface};
pub use crate::state::{PatOutcome, WatchdogPhase};
pub use crate::status::{StatusBits, StatusFlags};
pub use crate::watchdog::WatchdogCore;
