//! Status bus encoding.
//!
//! The watchdog exports one byte every tick, MSB first:
//!
//! ```text
//!  7               6              5        4         3             2             1 0
//! interrupt_high interrupt_low saw_pat enabled after_win_start after_win_close  0 0
//! ```
//!
//! This byte is the only externally observable behavior that must be
//! bit-exact.

use serde::{Deserialize, Serialize};

/// Packed status byte exported on the status bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusBits(u8);

impl StatusBits {
    /// Watchdog tripped and enabled.
    pub const INTERRUPT_HIGH: u8 = 1 << 7;
    /// Watchdog enabled and not tripped.
    pub const INTERRUPT_LOW: u8 = 1 << 6;
    /// A qualifying pat has been seen since arming.
    pub const SAW_PAT: u8 = 1 << 5;
    /// Watchdog is enabled.
    pub const ENABLED: u8 = 1 << 4;
    /// Counter has reached WINDOW_START.
    pub const AFTER_WINDOW_START: u8 = 1 << 3;
    /// Counter has reached WINDOW_CLOSE.
    pub const AFTER_WINDOW_CLOSE: u8 = 1 << 2;
    /// Bits that must always read zero.
    pub const RESERVED_MASK: u8 = 0b0000_0011;

    /// Status of a disabled, freshly reset watchdog.
    pub const IDLE: Self = Self(0);

    /// Decode a raw status byte, rejecting set reserved bits.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        if byte & Self::RESERVED_MASK == 0 {
            Some(Self(byte))
        } else {
            None
        }
    }

    /// Encode the individual flags.
    #[must_use]
    pub const fn from_flags(flags: StatusFlags) -> Self {
        let mut byte = 0;
        if flags.interrupt_high {
            byte |= Self::INTERRUPT_HIGH;
        }
        if flags.interrupt_low {
            byte |= Self::INTERRUPT_LOW;
        }
        if flags.saw_pat {
            byte |= Self::SAW_PAT;
        }
        if flags.enabled {
            byte |= Self::ENABLED;
        }
        if flags.after_window_start {
            byte |= Self::AFTER_WINDOW_START;
        }
        if flags.after_window_close {
            byte |= Self::AFTER_WINDOW_CLOSE;
        }
        Self(byte)
    }

    /// Raw byte as driven onto the bus.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        self.0
    }

    /// Unpack into named flags.
    #[must_use]
    pub const fn flags(self) -> StatusFlags {
        StatusFlags {
            interrupt_high: self.interrupt_high(),
            interrupt_low: self.interrupt_low(),
            saw_pat: self.saw_pat(),
            enabled: self.enabled(),
            after_window_start: self.after_window_start(),
            after_window_close: self.after_window_close(),
        }
    }

    const fn bit(self, mask: u8) -> bool {
        self.0 & mask != 0
    }

    /// `interrupt_high` bit.
    #[must_use]
    pub const fn interrupt_high(self) -> bool {
        self.bit(Self::INTERRUPT_HIGH)
    }

    /// `interrupt_low` bit.
    #[must_use]
    pub const fn interrupt_low(self) -> bool {
        self.bit(Self::INTERRUPT_LOW)
    }

    /// `saw_pat` bit.
    #[must_use]
    pub const fn saw_pat(self) -> bool {
        self.bit(Self::SAW_PAT)
    }

    /// `watchdog_enabled` bit.
    #[must_use]
    pub const fn enabled(self) -> bool {
        self.bit(Self::ENABLED)
    }

    /// `after_window_start` bit.
    #[must_use]
    pub const fn after_window_start(self) -> bool {
        self.bit(Self::AFTER_WINDOW_START)
    }

    /// `after_window_close` bit.
    #[must_use]
    pub const fn after_window_close(self) -> bool {
        self.bit(Self::AFTER_WINDOW_CLOSE)
    }
}

impl From<StatusBits> for u8 {
    fn from(status: StatusBits) -> Self {
        status.0
    }
}

impl From<StatusFlags> for StatusBits {
    fn from(flags: StatusFlags) -> Self {
        Self::from_flags(flags)
    }
}

impl core::fmt::Display for StatusBits {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "0b{:04b}_{:04b}", self.0 >> 4, self.0 & 0x0F)
    }
}

impl core::fmt::Binary for StatusBits {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Binary::fmt(&self.0, f)
    }
}

/// Named view of the six meaningful status bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusFlags {
    /// Interrupt asserted: tripped while enabled.
    pub interrupt_high: bool,
    /// Interrupt deasserted: enabled and not tripped.
    pub interrupt_low: bool,
    /// Sticky: qualifying pat seen since arming.
    pub saw_pat: bool,
    /// Watchdog armed.
    pub enabled: bool,
    /// Counter at or past WINDOW_START.
    pub after_window_start: bool,
    /// Counter at or past WINDOW_CLOSE.
    pub after_window_close: bool,
}
