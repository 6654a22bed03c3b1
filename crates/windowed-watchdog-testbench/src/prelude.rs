//! Prelude for windowed-watchdog-testbench.
//!
//! Re-exports the harness, the script language, the scenario catalog and
//! the core prelude.

pub use crate::error::{ScriptError, TestbenchError, TestbenchResult};
pub use crate::scenarios::{Scenario, find, scenarios};
pub use crate::script::{Command, Script, ScriptReport, Step, StepRecord, run_script};
pub use crate::testbench::{Testbench, TestbenchConfig, TraceSample};
pub use windowed_watchdog::prelude::*;
