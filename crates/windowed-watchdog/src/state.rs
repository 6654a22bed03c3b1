//! Watchdog phases and pat outcomes.

use serde::{Deserialize, Serialize};

/// Coarse state of the watchdog state machine.
///
/// ```text
/// Disabled ──enable──► Armed ──counter ≥ WINDOW_START──► WithinWindow
///    ▲                   ▲                                   │   │
///    │                   └──────────── qualifying pat ───────┘   │
///    │                                                           │ counter ≥ WINDOW_CLOSE
///    └────────────────────── disable ─────────── Tripped ◄───────┘
/// ```
///
/// `Disabled` is reachable from every other phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchdogPhase {
    /// ENABLE is clear. Nothing counts.
    #[default]
    Disabled,
    /// Counting, window not yet open.
    Armed,
    /// Counting, pats are accepted.
    WithinWindow,
    /// Trip latched. Only a disable leaves this phase.
    Tripped,
}

impl WatchdogPhase {
    /// Get the phase as a string slice.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "Disabled",
            Self::Armed => "Armed",
            Self::WithinWindow => "WithinWindow",
            Self::Tripped => "Tripped",
        }
    }
}

impl core::fmt::Display for WatchdogPhase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which branch of the window-gating rule a pat took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatOutcome {
    /// Counter restarted and `saw_pat` set.
    Accepted,
    /// Counter below WINDOW_START; nothing changed.
    RejectedEarly,
    /// Watchdog disabled; nothing changed.
    IgnoredDisabled,
}
