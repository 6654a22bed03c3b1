//! # windowed-watchdog
//!
//! Cycle-accurate model of a windowed hardware watchdog timer peripheral.
//!
//! The host arms the watchdog, then must pat it inside a window of ticks:
//! not before WINDOW_START, and before WINDOW_CLOSE. Missing the window
//! latches a trip and raises the interrupt output.
//!
//! This crate provides a `#![no_std]`-compatible core with:
//! - [`WatchdogCore`], the single synchronous state machine
//! - [`RegisterInterface`], the register contract the bus adapter drives
//! - [`StatusBits`], the bit-exact 8-bit status bus encoding
//! - [`StatusPort`], a lock-free holder for the exported status byte
//!
//! ## State Machine
//!
//! ```text
//! ┌──────────┐ enable  ┌───────┐ counter ≥ START ┌──────────────┐
//! │ Disabled │────────►│ Armed │────────────────►│ WithinWindow │
//! └──────────┘         └───────┘◄────────────────└──────────────┘
//!      ▲                           qualifying pat        │
//!      │ disable                                         │ counter ≥ CLOSE
//!      │                 ┌─────────┐                     │
//!      └─────────────────│ Tripped │◄────────────────────┘
//!                        └─────────┘
//! ```
//!
//! ## Status bus
//!
//! `{interrupt_high, interrupt_low, saw_pat, enabled, after_window_start,
//! after_window_close, 0, 0}`, MSB first, driven every tick.
//!
//! ## Example
//!
//! ```rust
//! use windowed_watchdog::prelude::*;
//!
//! let mut watchdog = WatchdogCore::default();
//! watchdog.write_register(Register::WindowStart, 2);
//! watchdog.write_register(Register::WindowClose, 8);
//! watchdog.write_register(Register::Control, CONTROL_ENABLE);
//!
//! // Too early: the window has not opened.
//! assert_eq!(watchdog.pat(), PatOutcome::RejectedEarly);
//!
//! watchdog.tick();
//! watchdog.tick();
//! assert_eq!(watchdog.pat(), PatOutcome::Accepted);
//! assert!(!watchdog.tick().interrupt_high());
//! ```

#![no_std]
#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
extern crate std;

#[cfg(test)]
extern crate alloc;

pub mod config;
pub mod error;
pub mod metrics;
pub mod port;
pub mod prelude;
pub mod registers;
pub mod state;
pub mod status;
pub mod watchdog;

pub use config::{DisabledStatus, WatchdogConfig};
pub use error::{WatchdogError, WatchdogResult};
pub use metrics::WatchdogMetrics;
pub use port::StatusPort;
pub use registers::{CONTROL_ENABLE, Register, RegisterInterface};
pub use state::{PatOutcome, WatchdogPhase};
pub use status::{StatusBits, StatusFlags};
pub use watchdog::WatchdogCore;
