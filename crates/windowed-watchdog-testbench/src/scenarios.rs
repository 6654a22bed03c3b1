//! Built-in scenario catalog.
//!
//! Each scenario is a stimulus script written against a zero-latency bus
//! and the default core configuration.

use serde::Serialize;

use crate::error::ScriptError;
use crate::script::Script;

/// A named, documented stimulus script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scenario {
    /// Stable identifier.
    pub name: &'static str,
    /// One-line summary.
    pub description: &'static str,
    /// Script text.
    #[serde(skip)]
    pub source: &'static str,
}

impl Scenario {
    /// Parse the scenario's script.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Parse`] if the embedded script is malformed.
    pub fn script(&self) -> Result<Script, ScriptError> {
        Script::parse(self.source)
    }
}

macro_rules! scenario {
    ($name:literal, $description:literal) => {
        Scenario {
            name: $name,
            description: $description,
            source: include_str!(concat!("../scenarios/", $name, ".wdt")),
        }
    };
}

const SCENARIOS: &[Scenario] = &[
    scenario!(
        "immediate_trip",
        "Arming with WINDOW_CLOSE = 0 trips on the first tick"
    ),
    scenario!(
        "window_close_25",
        "WINDOW_CLOSE = 25 without a pat trips exactly at tick 25"
    ),
    scenario!(
        "pat_restarts_countdown",
        "An accepted pat restarts the full countdown"
    ),
    scenario!(
        "disable_suppresses_trip",
        "Disabling before the window closes suppresses the trip"
    ),
    scenario!(
        "disable_then_rearm",
        "Disabling clears a trip and re-arming starts clean"
    ),
    scenario!(
        "saw_pat_sticky",
        "saw_pat survives later pats and the trip until re-arm"
    ),
    scenario!(
        "early_pat_rejected",
        "A pat before WINDOW_START is ignored"
    ),
    scenario!(
        "window_start_and_close_no_pat",
        "Comparator bits rise at WINDOW_START and WINDOW_CLOSE"
    ),
    scenario!(
        "window_start_and_close_with_pat",
        "A pat inside the window defers the trip by WINDOW_CLOSE ticks"
    ),
    scenario!(
        "register_readback",
        "Registers read back their written values"
    ),
];

/// Every built-in scenario, in catalog order.
#[must_use]
pub fn scenarios() -> &'static [Scenario] {
    SCENARIOS
}

/// Look up a scenario by name.
#[must_use]
pub fn find(name: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|scenario| scenario.name == name)
}
