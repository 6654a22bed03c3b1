//! # windowed-watchdog-testbench
//!
//! Cycle-driven simulation harness for the `windowed-watchdog` core.
//!
//! - [`Testbench`] clocks a core, models bus latency on register accesses,
//!   publishes every tick to a [`StatusPort`](windowed_watchdog::StatusPort),
//!   and can capture a per-cycle trace.
//! - [`Script`] is a small line-oriented stimulus language; [`run_script`]
//!   executes one against a harness and reports every step.
//! - [`scenarios()`] is a catalog of named scripts exercising the core's
//!   timing properties.
//!
//! ## Example
//!
//! ```rust
//! use windowed_watchdog_testbench::prelude::*;
//!
//! let script = Script::parse(
//!     "write WINDOW_CLOSE 3\n\
//!      write CONTROL 1\n\
//!      cycles 3\n\
//!      expect 0b0101_1000\n\
//!      cycles 1\n\
//!      expect 0b1001_1100\n",
//! )?;
//! let report = run_script(&mut Testbench::default(), &script)?;
//! assert_eq!(report.final_cycle, 4);
//! # Ok::<(), ScriptError>(())
//! ```

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

pub mod error;
pub mod prelude;
pub mod scenarios;
pub mod script;
pub mod testbench;

pub use error::{ScriptError, TestbenchError, TestbenchResult};
pub use scenarios::{Scenario, find, scenarios};
pub use script::{Command, Script, ScriptReport, Step, StepRecord, run_script};
pub use testbench::{Testbench, TestbenchConfig, TraceSample};
