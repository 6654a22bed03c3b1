//! Configuration types for the watchdog core.

use serde::{Deserialize, Serialize};

use crate::error::{WatchdogError, WatchdogResult};

/// Widest supported register, in bits.
pub const MAX_REGISTER_WIDTH_BITS: u8 = 32;

/// How the `interrupt_low` status bit reads while the watchdog is disabled.
///
/// Early revisions of the peripheral reported `interrupt_low = 1` while
/// disabled; later revisions report an all-zero idle status. `AllClear` is
/// the canonical encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabledStatus {
    /// `interrupt_low = enabled AND NOT tripped`; disabled status is `0x00`.
    #[default]
    AllClear,
    /// `interrupt_low = NOT interrupt_high`; disabled status is `0x40`.
    InterruptLowIdle,
}

/// Watchdog core configuration.
///
/// Fixed at construction; the runtime registers (ENABLE, WINDOW_START,
/// WINDOW_CLOSE, PAT) are written through the core afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchdogConfig {
    /// Width of the threshold and PAT registers, and of the counter.
    ///
    /// Default: 32.
    pub register_width_bits: u8,

    /// Encoding of the idle status while disabled.
    pub disabled_status: DisabledStatus,
}

impl WatchdogConfig {
    /// Create a new configuration with the given register width.
    ///
    /// # Errors
    ///
    /// Returns an error if `register_width_bits` is outside `1..=32`.
    pub fn new(register_width_bits: u8) -> WatchdogResult<Self> {
        let config = Self {
            register_width_bits,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> WatchdogConfigBuilder {
        WatchdogConfigBuilder::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> WatchdogResult<()> {
        if !(1..=MAX_REGISTER_WIDTH_BITS).contains(&self.register_width_bits) {
            return Err(WatchdogError::invalid_configuration(
                "register_width_bits must be between 1 and 32",
            ));
        }
        Ok(())
    }

    /// Mask selecting the bits a register of this width can hold.
    ///
    /// This is also the value the counter saturates at.
    #[must_use]
    pub fn register_mask(&self) -> u32 {
        let unused_bits = MAX_REGISTER_WIDTH_BITS.saturating_sub(self.register_width_bits);
        u32::MAX.checked_shr(u32::from(unused_bits)).unwrap_or(0)
    }
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            register_width_bits: MAX_REGISTER_WIDTH_BITS,
            disabled_status: DisabledStatus::AllClear,
        }
    }
}

/// Builder for `WatchdogConfig`.
#[derive(Debug, Default)]
pub struct WatchdogConfigBuilder {
    config: WatchdogConfig,
}

impl WatchdogConfigBuilder {
    /// Set the register width in bits.
    #[must_use]
    pub fn register_width_bits(mut self, bits: u8) -> Self {
        self.config.register_width_bits = bits;
        self
    }

    /// Set the disabled-status encoding.
    #[must_use]
    pub fn disabled_status(mut self, disabled_status: DisabledStatus) -> Self {
        self.config.disabled_status = disabled_status;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> WatchdogResult<WatchdogConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
