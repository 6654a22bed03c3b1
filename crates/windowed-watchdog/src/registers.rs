//! Register contract exposed to the bus adapter.
//!
//! | Offset | Name         | Access | Semantics                                   |
//! |--------|--------------|--------|---------------------------------------------|
//! | 0      | CONTROL      | R/W    | bit0 = ENABLE                               |
//! | 1      | WINDOW_START | R/W    | ticks before a pat is accepted              |
//! | 2      | WINDOW_CLOSE | R/W    | ticks before trip, absent a qualifying pat  |
//! | 3      | PAT          | R/W    | nonzero write strobes a pat; reads last write |
//!
//! Byte and halfword access, and address decoding above the word offset,
//! belong to the bus adapter. The core accepts and returns whole register
//! values.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{WatchdogError, WatchdogResult};
use crate::watchdog::WatchdogCore;

/// CONTROL register ENABLE bit.
pub const CONTROL_ENABLE: u32 = 1 << 0;

/// Word-addressed watchdog registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum Register {
    /// ENABLE flag.
    Control = 0,
    /// Window-open threshold.
    WindowStart = 1,
    /// Window-close threshold.
    WindowClose = 2,
    /// Pat strobe.
    Pat = 3,
}

impl Register {
    /// All registers in offset order.
    pub const ALL: [Self; 4] = [
        Self::Control,
        Self::WindowStart,
        Self::WindowClose,
        Self::Pat,
    ];

    /// Word offset of the register.
    #[must_use]
    pub const fn offset(self) -> u32 {
        self as u32
    }

    /// Register name as printed in the register map.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Control => "CONTROL",
            Self::WindowStart => "WINDOW_START",
            Self::WindowClose => "WINDOW_CLOSE",
            Self::Pat => "PAT",
        }
    }
}

impl TryFrom<u32> for Register {
    type Error = WatchdogError;

    fn try_from(offset: u32) -> WatchdogResult<Self> {
        match offset {
            0 => Ok(Self::Control),
            1 => Ok(Self::WindowStart),
            2 => Ok(Self::WindowClose),
            3 => Ok(Self::Pat),
            _ => Err(WatchdogError::unknown_register(offset)),
        }
    }
}

impl FromStr for Register {
    type Err = WatchdogError;

    /// Parse a register name (case-insensitive, `ENABLE` is accepted for
    /// CONTROL) or a decimal offset.
    fn from_str(s: &str) -> WatchdogResult<Self> {
        let name = s.trim();
        if let Ok(offset) = name.parse::<u32>() {
            return Self::try_from(offset);
        }
        if name.eq_ignore_ascii_case("ENABLE") {
            return Ok(Self::Control);
        }
        Self::ALL
            .into_iter()
            .find(|register| register.name().eq_ignore_ascii_case(name))
            .ok_or(WatchdogError::UnrecognizedRegisterName)
    }
}

impl core::fmt::Display for Register {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Register-level access to a watchdog, as driven by the bus adapter.
///
/// Writes are applied synchronously and become visible to the next tick
/// evaluation.
pub trait RegisterInterface {
    /// Write a whole register value.
    fn write_register(&mut self, register: Register, value: u32);

    /// Read a whole register value.
    fn read_register(&self, register: Register) -> u32;

    /// Decode a word offset and write it.
    ///
    /// # Errors
    ///
    /// Returns [`WatchdogError::UnknownRegister`] if the offset is not mapped.
    fn write_offset(&mut self, offset: u32, value: u32) -> WatchdogResult<()> {
        let register = Register::try_from(offset)?;
        self.write_register(register, value);
        Ok(())
    }

    /// Decode a word offset and read it.
    ///
    /// # Errors
    ///
    /// Returns [`WatchdogError::UnknownRegister`] if the offset is not mapped.
    fn read_offset(&self, offset: u32) -> WatchdogResult<u32> {
        let register = Register::try_from(offset)?;
        Ok(self.read_register(register))
    }
}

impl RegisterInterface for WatchdogCore {
    fn write_register(&mut self, register: Register, value: u32) {
        match register {
            Register::Control => self.write_control(value & CONTROL_ENABLE != 0),
            Register::WindowStart => self.write_window_start(value),
            Register::WindowClose => self.write_window_close(value),
            Register::Pat => {
                if self.latch_pat_register(value) != 0 {
                    self.pat();
                }
            }
        }
    }

    fn read_register(&self, register: Register) -> u32 {
        match register {
            Register::Control => u32::from(self.is_enabled()),
            Register::WindowStart => self.window_start(),
            Register::WindowClose => self.window_close(),
            Register::Pat => self.pat_register(),
        }
    }
}
