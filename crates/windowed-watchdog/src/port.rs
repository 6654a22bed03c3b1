//! Lock-free status output port.
//!
//! The core owns all of its state exclusively. Only the exported status
//! byte crosses into other contexts (pin mux, interrupt controller), and it
//! does so through a `StatusPort` the clock driver publishes to after every
//! tick.

use portable_atomic::{AtomicU8, AtomicU64, Ordering};

use crate::status::StatusBits;

/// Most recently exported status byte and the cycle it was driven on.
///
/// # Real-Time Safety
///
/// `publish` and `sample` are wait-free: two atomic stores or loads, no
/// allocation.
#[derive(Debug, Default)]
pub struct StatusPort {
    bits: AtomicU8,
    cycle: AtomicU64,
}

impl StatusPort {
    /// Create a port driving the idle status.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bits: AtomicU8::new(StatusBits::IDLE.to_byte()),
            cycle: AtomicU64::new(0),
        }
    }

    /// Drive a new status byte.
    pub fn publish(&self, cycle: u64, status: StatusBits) {
        self.cycle.store(cycle, Ordering::Relaxed);
        self.bits.store(status.to_byte(), Ordering::Release);
    }

    /// Sample the driven status byte.
    #[must_use]
    pub fn sample(&self) -> StatusBits {
        let byte = self.bits.load(Ordering::Acquire);
        StatusBits::from_byte(byte).unwrap_or(StatusBits::IDLE)
    }

    /// Cycle number of the last publish.
    #[must_use]
    pub fn last_cycle(&self) -> u64 {
        self.cycle.load(Ordering::Acquire)
    }

    /// Whether the interrupt line is high.
    #[must_use]
    pub fn interrupt_asserted(&self) -> bool {
        self.sample().interrupt_high()
    }
}
