//! The watchdog core state machine.
//!
//! # Timing model
//!
//! Ticks are numbered from 0 after arming. Tick `k` compares the counter
//! (which equals `k` when no pat has been accepted) against both thresholds,
//! latches a trip if WINDOW_CLOSE has been reached, and then increments the
//! counter. Register writes land between ticks, so a write is always visible
//! to the next evaluation and never to one already in flight.
//!
//! With WINDOW_CLOSE = N and no pats, ticks `0..N` leave the watchdog
//! running and tick `N` trips it.
//!
//! The pat window is open whenever the live counter has reached
//! WINDOW_START. The pat gate, [`WatchdogCore::phase`] and the exported
//! `after_window_start` bit all read that one condition, so the host sees
//! the bit rise on the same cycle a pat starts being accepted. The
//! `after_window_close` bit is the comparator captured by the last tick and
//! rises together with the trip latch.

use tracing::{debug, trace, warn};

use crate::config::{DisabledStatus, WatchdogConfig};
use crate::metrics::WatchdogMetrics;
use crate::state::{PatOutcome, WatchdogPhase};
use crate::status::{StatusBits, StatusFlags};

/// Cycle-accurate windowed watchdog.
///
/// Created once at system reset with every register cleared and never
/// destroyed; [`reset`](Self::reset) re-initializes it in place.
///
/// `tripped` and `saw_pat` are latches: they are only changed at the
/// transition points documented on each operation and never recomputed from
/// the counter.
///
/// # Example
///
/// ```rust
/// use windowed_watchdog::prelude::*;
///
/// let mut watchdog = WatchdogCore::default();
/// watchdog.write_window_close(3);
/// watchdog.write_control(true);
///
/// for _ in 0..3 {
///     assert!(!watchdog.tick().interrupt_high());
/// }
/// assert!(watchdog.tick().interrupt_high());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchdogCore {
    config: WatchdogConfig,
    mask: u32,
    enabled: bool,
    window_start: u32,
    window_close: u32,
    counter: u32,
    saw_pat: bool,
    tripped: bool,
    /// WINDOW_CLOSE comparator captured by the last tick evaluation.
    after_window_close: bool,
    /// Last value written to PAT, for read-back.
    pat_register: u32,
    metrics: WatchdogMetrics,
}

impl WatchdogCore {
    /// Create a watchdog in its system-reset state.
    #[must_use]
    pub fn new(config: WatchdogConfig) -> Self {
        Self {
            config,
            mask: config.register_mask(),
            enabled: false,
            window_start: 0,
            window_close: 0,
            counter: 0,
            saw_pat: false,
            tripped: false,
            after_window_close: false,
            pat_register: 0,
            metrics: WatchdogMetrics::new(),
        }
    }

    /// System reset: ENABLE and thresholds to 0, all latches and metrics
    /// cleared. The configuration is kept.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
        debug!("watchdog reset");
    }

    /// Write the ENABLE flag.
    ///
    /// A 0→1 transition re-arms from scratch: counter, `saw_pat` and
    /// `tripped` are cleared. A 1→0 transition clears the trip so the
    /// watchdog can be re-armed cleanly. Writing the current value is a
    /// no-op.
    pub fn write_control(&mut self, enable: bool) {
        match (self.enabled, enable) {
            (false, true) => {
                self.enabled = true;
                self.counter = 0;
                self.saw_pat = false;
                self.tripped = false;
                self.after_window_close = false;
                self.metrics.record_arm();
                debug!(
                    window_start = self.window_start,
                    window_close = self.window_close,
                    "watchdog armed"
                );
            }
            (true, false) => {
                self.enabled = false;
                self.tripped = false;
                self.after_window_close = false;
                self.metrics.record_disarm();
                debug!(counter = self.counter, "watchdog disarmed");
            }
            _ => {}
        }
    }

    /// Write WINDOW_START. Truncated to the register width. The counter is
    /// untouched; the pat window and `after_window_start` follow the new
    /// value right away.
    pub fn write_window_start(&mut self, value: u32) {
        self.window_start = value & self.mask;
    }

    /// Write WINDOW_CLOSE. Truncated to the register width; takes effect on
    /// the next tick without touching the counter.
    pub fn write_window_close(&mut self, value: u32) {
        self.window_close = value & self.mask;
    }

    /// Deliver a pat strobe.
    ///
    /// The pat qualifies only while enabled and once the counter has
    /// reached WINDOW_START. A qualifying pat restarts the counter and sets
    /// `saw_pat`; it never clears a latched trip.
    pub fn pat(&mut self) -> PatOutcome {
        if !self.enabled {
            self.metrics.record_ignored_pat();
            trace!("pat ignored while disabled");
            return PatOutcome::IgnoredDisabled;
        }

        if !self.window_open() {
            self.metrics.record_early_pat();
            debug!(
                counter = self.counter,
                window_start = self.window_start,
                "pat rejected before window start"
            );
            return PatOutcome::RejectedEarly;
        }

        self.metrics.record_accepted_pat(self.counter);
        trace!(counter = self.counter, "pat accepted");
        self.counter = 0;
        self.saw_pat = true;
        PatOutcome::Accepted
    }

    /// Advance one clock period and return the exported status.
    pub fn tick(&mut self) -> StatusBits {
        if self.enabled {
            self.after_window_close = self.counter >= self.window_close;

            if self.after_window_close && !self.tripped {
                self.tripped = true;
                self.metrics.record_trip();
                warn!(
                    counter = self.counter,
                    window_close = self.window_close,
                    saw_pat = self.saw_pat,
                    "watchdog tripped"
                );
            }

            // Saturate at the register maximum: wrapping would reopen the
            // window and drop after_window_close.
            self.counter = self.counter.saturating_add(1).min(self.mask);
            self.metrics.record_enabled_tick();
        }

        self.status()
    }

    /// Current status byte.
    #[must_use]
    pub fn status(&self) -> StatusBits {
        let interrupt_high = self.tripped && self.enabled;
        let interrupt_low = match self.config.disabled_status {
            DisabledStatus::AllClear => self.enabled && !self.tripped,
            DisabledStatus::InterruptLowIdle => !interrupt_high,
        };

        StatusBits::from_flags(StatusFlags {
            interrupt_high,
            interrupt_low,
            saw_pat: self.enabled && self.saw_pat,
            enabled: self.enabled,
            after_window_start: self.enabled && self.window_open(),
            after_window_close: self.enabled && self.after_window_close,
        })
    }

    /// Coarse state machine phase.
    #[must_use]
    pub fn phase(&self) -> WatchdogPhase {
        if !self.enabled {
            WatchdogPhase::Disabled
        } else if self.tripped {
            WatchdogPhase::Tripped
        } else if self.window_open() {
            WatchdogPhase::WithinWindow
        } else {
            WatchdogPhase::Armed
        }
    }

    /// Ticks until the trip latches if no qualifying pat arrives.
    ///
    /// Widened to `u64`: a 32-bit WINDOW_CLOSE of `u32::MAX` armed from a
    /// zero counter is `2^32` ticks away. Returns `None` while disabled or
    /// already tripped.
    #[must_use]
    pub fn ticks_until_trip(&self) -> Option<u64> {
        if !self.enabled || self.tripped {
            return None;
        }
        Some(
            u64::from(self.window_close)
                .saturating_sub(u64::from(self.counter))
                .saturating_add(1),
        )
    }

    /// Whether a pat delivered now would qualify on timing, i.e. the counter
    /// has reached WINDOW_START. Says nothing about ENABLE.
    #[must_use]
    pub fn window_open(&self) -> bool {
        self.counter >= self.window_start
    }

    /// Whether the interrupt output is asserted.
    #[must_use]
    pub fn interrupt_pending(&self) -> bool {
        self.tripped && self.enabled
    }

    /// Configuration the core was built with.
    #[must_use]
    pub fn config(&self) -> &WatchdogConfig {
        &self.config
    }

    /// ENABLE flag.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Trip latch.
    #[must_use]
    pub fn is_tripped(&self) -> bool {
        self.tripped
    }

    /// Sticky pat latch.
    #[must_use]
    pub fn saw_pat(&self) -> bool {
        self.saw_pat
    }

    /// Ticks since arming or since the last accepted pat.
    #[must_use]
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// WINDOW_START register.
    #[must_use]
    pub fn window_start(&self) -> u32 {
        self.window_start
    }

    /// WINDOW_CLOSE register.
    #[must_use]
    pub fn window_close(&self) -> u32 {
        self.window_close
    }

    /// Last value written to the PAT register.
    #[must_use]
    pub fn pat_register(&self) -> u32 {
        self.pat_register
    }

    /// Snapshot of the activity counters.
    #[must_use]
    pub fn metrics(&self) -> WatchdogMetrics {
        self.metrics
    }

    /// Store a PAT register write for read-back, truncated to width.
    /// Returns the stored value.
    pub(crate) fn latch_pat_register(&mut self, value: u32) -> u32 {
        self.pat_register = value & self.mask;
        self.pat_register
    }

}

impl Default for WatchdogCore {
    fn default() -> Self {
        Self::new(WatchdogConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WatchdogResult;

    fn armed(window_start: u32, window_close: u32) -> WatchdogCore {
        let mut watchdog = WatchdogCore::default();
        watchdog.write_window_start(window_start);
        watchdog.write_window_close(window_close);
        watchdog.write_control(true);
        watchdog
    }

    #[test]
    fn test_reset_state() {
        let watchdog = WatchdogCore::default();
        assert!(!watchdog.is_enabled());
        assert!(!watchdog.is_tripped());
        assert!(!watchdog.saw_pat());
        assert_eq!(watchdog.counter(), 0);
        assert_eq!(watchdog.window_start(), 0);
        assert_eq!(watchdog.window_close(), 0);
        assert_eq!(watchdog.status(), StatusBits::IDLE);
        assert_eq!(watchdog.phase(), WatchdogPhase::Disabled);
    }

    #[test]
    fn test_disabled_tick_holds_everything() {
        let mut watchdog = WatchdogCore::default();
        for _ in 0..10 {
            assert_eq!(watchdog.tick(), StatusBits::IDLE);
        }
        assert_eq!(watchdog.counter(), 0);
        assert_eq!(watchdog.metrics().enabled_ticks, 0);
    }

    #[test]
    fn test_immediate_trip() {
        let mut watchdog = armed(0, 0);
        assert_eq!(watchdog.status().to_byte(), 0b0101_1000);
        assert_eq!(watchdog.tick().to_byte(), 0b1001_1100);
        assert_eq!(watchdog.phase(), WatchdogPhase::Tripped);
    }

    #[test]
    fn test_trip_on_tick_n() {
        let mut watchdog = armed(0, 25);
        for _ in 0..25 {
            assert_eq!(watchdog.tick().to_byte(), 0b0101_1000);
        }
        assert_eq!(watchdog.tick().to_byte(), 0b1001_1100);
    }

    #[test]
    fn test_counter_holds_while_disabled() {
        let mut watchdog = armed(0, 100);
        for _ in 0..5 {
            watchdog.tick();
        }
        watchdog.write_control(false);
        for _ in 0..5 {
            watchdog.tick();
        }
        assert_eq!(watchdog.counter(), 5);
    }

    #[test]
    fn test_pat_outcomes() {
        let mut watchdog = WatchdogCore::default();
        assert_eq!(watchdog.pat(), PatOutcome::IgnoredDisabled);

        watchdog.write_window_start(2);
        watchdog.write_window_close(10);
        watchdog.write_control(true);
        assert_eq!(watchdog.pat(), PatOutcome::RejectedEarly);

        watchdog.tick();
        watchdog.tick();
        assert_eq!(watchdog.phase(), WatchdogPhase::WithinWindow);
        assert_eq!(watchdog.pat(), PatOutcome::Accepted);
        assert_eq!(watchdog.counter(), 0);
        assert!(watchdog.saw_pat());

        let metrics = watchdog.metrics();
        assert_eq!(metrics.ignored_pats, 1);
        assert_eq!(metrics.early_pats, 1);
        assert_eq!(metrics.accepted_pats, 1);
        assert_eq!(metrics.longest_pat_interval, 2);
    }

    #[test]
    fn test_pat_cannot_untrip() {
        let mut watchdog = armed(0, 0);
        watchdog.tick();
        assert_eq!(watchdog.pat(), PatOutcome::Accepted);
        assert!(watchdog.is_tripped());
        assert_eq!(watchdog.tick().to_byte(), 0b1011_1100);
    }

    #[test]
    fn test_disable_clears_trip_and_rearm_starts_clean() {
        let mut watchdog = armed(0, 0);
        watchdog.tick();
        watchdog.pat();
        assert!(watchdog.is_tripped());

        watchdog.write_control(false);
        assert!(!watchdog.is_tripped());
        assert_eq!(watchdog.status(), StatusBits::IDLE);

        watchdog.write_control(true);
        assert!(!watchdog.saw_pat());
        assert_eq!(watchdog.counter(), 0);
        assert_eq!(watchdog.tick().to_byte(), 0b1001_1100);
        assert_eq!(watchdog.metrics().trip_count, 2);
    }

    #[test]
    fn test_rewriting_enable_does_not_rearm() {
        let mut watchdog = armed(0, 100);
        for _ in 0..7 {
            watchdog.tick();
        }
        watchdog.write_control(true);
        assert_eq!(watchdog.counter(), 7);
        assert_eq!(watchdog.metrics().arm_count, 1);
    }

    #[test]
    fn test_counter_saturates_at_register_width() -> WatchdogResult<()> {
        let mut watchdog = WatchdogCore::new(WatchdogConfig::new(4)?);
        watchdog.write_window_close(0xFF);
        assert_eq!(watchdog.window_close(), 0xF);
        watchdog.write_control(true);

        for _ in 0..15 {
            assert!(!watchdog.tick().interrupt_high());
        }
        assert_eq!(watchdog.counter(), 15);
        for _ in 0..20 {
            assert!(watchdog.tick().interrupt_high());
            assert_eq!(watchdog.counter(), 15);
        }
        Ok(())
    }

    #[test]
    fn test_interrupt_low_idle_encoding() -> WatchdogResult<()> {
        let config = WatchdogConfig::builder()
            .disabled_status(DisabledStatus::InterruptLowIdle)
            .build()?;
        let mut watchdog = WatchdogCore::new(config);
        assert_eq!(watchdog.status().to_byte(), 0b0100_0000);

        watchdog.write_control(true);
        assert_eq!(watchdog.tick().to_byte(), 0b1001_1100);
        Ok(())
    }

    #[test]
    fn test_ticks_until_trip() {
        let mut watchdog = armed(0, 3);
        assert_eq!(watchdog.ticks_until_trip(), Some(4));
        watchdog.tick();
        assert_eq!(watchdog.ticks_until_trip(), Some(3));
        for _ in 0..3 {
            watchdog.tick();
        }
        assert!(watchdog.is_tripped());
        assert_eq!(watchdog.ticks_until_trip(), None);
    }

    #[test]
    fn test_ticks_until_trip_full_width() {
        let mut watchdog = armed(0, u32::MAX);
        assert_eq!(watchdog.ticks_until_trip(), Some(1 << 32));
        watchdog.tick();
        assert_eq!(watchdog.ticks_until_trip(), Some(u64::from(u32::MAX)));
    }

    #[test]
    fn test_window_start_bit_rises_with_pat_gate() {
        let mut watchdog = armed(2, 100);
        assert!(!watchdog.status().after_window_start());
        watchdog.tick();
        assert!(!watchdog.status().after_window_start());

        assert_eq!(watchdog.tick().to_byte(), 0b0101_1000);
        assert!(watchdog.window_open());
        assert_eq!(watchdog.pat(), PatOutcome::Accepted);
        assert_eq!(watchdog.status().to_byte(), 0b0111_0000);
    }

    #[test]
    fn test_window_start_write_moves_bit_before_next_tick() {
        let mut watchdog = armed(0, 100);
        watchdog.tick();
        assert!(watchdog.status().after_window_start());

        watchdog.write_window_start(5);
        assert!(!watchdog.status().after_window_start());
        assert_eq!(watchdog.pat(), PatOutcome::RejectedEarly);
    }

    #[test]
    fn test_reset_keeps_config() -> WatchdogResult<()> {
        let mut watchdog = WatchdogCore::new(WatchdogConfig::new(8)?);
        watchdog.write_window_close(5);
        watchdog.write_control(true);
        watchdog.tick();

        watchdog.reset();

        assert_eq!(watchdog.config().register_width_bits, 8);
        assert_eq!(watchdog.window_close(), 0);
        assert_eq!(watchdog.metrics(), WatchdogMetrics::default());
        Ok(())
    }
}
