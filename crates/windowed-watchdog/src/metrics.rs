//! Watchdog metrics for monitoring and diagnostics.

use serde::{Deserialize, Serialize};

/// Counters describing the watchdog's activity since the last system reset.
///
/// All counters saturate instead of wrapping. They are cleared only by
/// [`WatchdogCore::reset`](crate::WatchdogCore::reset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WatchdogMetrics {
    /// Number of 0→1 ENABLE transitions.
    pub arm_count: u64,
    /// Number of 1→0 ENABLE transitions.
    pub disarm_count: u64,
    /// Pats that restarted the countdown.
    pub accepted_pats: u64,
    /// Pats rejected because the window had not opened.
    pub early_pats: u64,
    /// Pats delivered while disabled.
    pub ignored_pats: u64,
    /// Number of times the trip latch was set.
    pub trip_count: u64,
    /// Ticks evaluated while enabled.
    pub enabled_ticks: u64,
    /// Largest counter value observed when a pat was accepted.
    pub longest_pat_interval: u32,
}

impl WatchdogMetrics {
    /// Create a new metrics instance with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            arm_count: 0,
            disarm_count: 0,
            accepted_pats: 0,
            early_pats: 0,
            ignored_pats: 0,
            trip_count: 0,
            enabled_ticks: 0,
            longest_pat_interval: 0,
        }
    }

    /// Record an arm.
    pub fn record_arm(&mut self) {
        self.arm_count = self.arm_count.saturating_add(1);
    }

    /// Record a disarm.
    pub fn record_disarm(&mut self) {
        self.disarm_count = self.disarm_count.saturating_add(1);
    }

    /// Record an accepted pat at the given counter value.
    pub fn record_accepted_pat(&mut self, counter: u32) {
        self.accepted_pats = self.accepted_pats.saturating_add(1);
        self.longest_pat_interval = self.longest_pat_interval.max(counter);
    }

    /// Record a pat that arrived before the window opened.
    pub fn record_early_pat(&mut self) {
        self.early_pats = self.early_pats.saturating_add(1);
    }

    /// Record a pat delivered while disabled.
    pub fn record_ignored_pat(&mut self) {
        self.ignored_pats = self.ignored_pats.saturating_add(1);
    }

    /// Record the trip latch being set.
    pub fn record_trip(&mut self) {
        self.trip_count = self.trip_count.saturating_add(1);
    }

    /// Record a tick evaluated while enabled.
    pub fn record_enabled_tick(&mut self) {
        self.enabled_ticks = self.enabled_ticks.saturating_add(1);
    }

    /// Reset all metrics.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Total pats delivered regardless of outcome.
    #[must_use]
    pub fn total_pats(&self) -> u64 {
        self.accepted_pats
            .saturating_add(self.early_pats)
            .saturating_add(self.ignored_pats)
    }
}
