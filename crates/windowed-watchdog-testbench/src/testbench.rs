//! Cycle-driven harness around a [`WatchdogCore`].
//!
//! The harness stands in for the collaborators the core expects around it:
//! a clock that ticks it, a bus adapter that turns word accesses into
//! register writes, and a status port that other contexts sample.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use windowed_watchdog::{
    Register, RegisterInterface, StatusBits, StatusPort, WatchdogConfig, WatchdogCore,
};

use crate::error::{TestbenchError, TestbenchResult};

/// Harness configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TestbenchConfig {
    /// Configuration of the simulated core.
    pub watchdog: WatchdogConfig,
    /// Clock cycles each register access spends on the bus before it lands.
    pub bus_latency_cycles: u32,
}

impl TestbenchConfig {
    /// Default harness with the given bus latency.
    #[must_use]
    pub fn with_bus_latency(bus_latency_cycles: u32) -> Self {
        Self {
            bus_latency_cycles,
            ..Self::default()
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the core configuration is invalid.
    pub fn validate(&self) -> TestbenchResult<()> {
        self.watchdog.validate()?;
        Ok(())
    }
}

/// One captured clock cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceSample {
    /// Cycle number, counted from the last system reset. The first tick is
    /// cycle 1.
    pub cycle: u64,
    /// Counter value after the tick.
    pub counter: u32,
    /// Status byte exported by the tick.
    pub status: StatusBits,
}

/// Simulation harness driving a single watchdog.
#[derive(Debug)]
pub struct Testbench {
    config: TestbenchConfig,
    core: WatchdogCore,
    port: Arc<StatusPort>,
    cycle: u64,
    trace: Option<Vec<TraceSample>>,
}

impl Testbench {
    /// Create a harness in its system-reset state.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: TestbenchConfig) -> TestbenchResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            core: WatchdogCore::new(config.watchdog),
            port: Arc::new(StatusPort::new()),
            cycle: 0,
            trace: None,
        })
    }

    /// System reset. The core returns to its reset state, the cycle counter
    /// restarts, and the port drives the idle status. A captured trace is
    /// cleared but capture stays on if it was on.
    pub fn reset(&mut self) {
        self.core.reset();
        self.cycle = 0;
        self.port.publish(0, self.core.status());
        if let Some(trace) = self.trace.as_mut() {
            trace.clear();
        }
        debug!("testbench reset");
    }

    /// Write a register by word offset, after the bus latency.
    ///
    /// The offset is decoded before any cycles are spent, so an unmapped
    /// offset leaves the simulation untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the offset is not mapped.
    pub fn write_reg(&mut self, offset: u32, value: u32) -> TestbenchResult<()> {
        let register = Register::try_from(offset)?;
        self.write(register, value);
        Ok(())
    }

    /// Write a decoded register, after the bus latency.
    ///
    /// The status port is refreshed right away, since ENABLE changes the
    /// exported byte without waiting for a tick.
    pub fn write(&mut self, register: Register, value: u32) {
        self.bus_transfer();
        self.core.write_register(register, value);
        self.port.publish(self.cycle, self.core.status());
        debug!(cycle = self.cycle, %register, value, "register write");
    }

    /// Read a register by word offset, after the bus latency.
    ///
    /// # Errors
    ///
    /// Returns an error if the offset is not mapped.
    pub fn read_reg(&mut self, offset: u32) -> TestbenchResult<u32> {
        let register = Register::try_from(offset)?;
        Ok(self.read(register))
    }

    /// Read a decoded register, after the bus latency.
    pub fn read(&mut self, register: Register) -> u32 {
        self.bus_transfer();
        let value = self.core.read_register(register);
        debug!(cycle = self.cycle, %register, value, "register read");
        value
    }

    /// Strobe the PAT register.
    pub fn pat(&mut self) {
        self.write(Register::Pat, 1);
    }

    /// Advance `n` clock cycles and return the status after the last one.
    pub fn clock_cycles(&mut self, n: u64) -> StatusBits {
        for _ in 0..n {
            self.step();
        }
        self.core.status()
    }

    /// Current status byte.
    #[must_use]
    pub fn status(&self) -> StatusBits {
        self.core.status()
    }

    /// Cycles elapsed since the last system reset.
    #[must_use]
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// The simulated core.
    #[must_use]
    pub fn core(&self) -> &WatchdogCore {
        &self.core
    }

    /// Harness configuration.
    #[must_use]
    pub fn config(&self) -> &TestbenchConfig {
        &self.config
    }

    /// Shared handle to the status output port.
    #[must_use]
    pub fn port(&self) -> Arc<StatusPort> {
        Arc::clone(&self.port)
    }

    /// Turn per-cycle trace capture on or off. Turning it off discards the
    /// captured samples.
    pub fn set_trace(&mut self, enabled: bool) {
        match (enabled, self.trace.is_some()) {
            (true, false) => self.trace = Some(Vec::new()),
            (false, true) => self.trace = None,
            _ => {}
        }
    }

    /// Samples captured since capture was turned on or the last reset.
    #[must_use]
    pub fn trace(&self) -> &[TraceSample] {
        self.trace.as_deref().unwrap_or_default()
    }

    /// Take the captured samples, leaving capture on with an empty buffer.
    pub fn take_trace(&mut self) -> Vec<TraceSample> {
        self.trace.as_mut().map(std::mem::take).unwrap_or_default()
    }

    fn bus_transfer(&mut self) {
        for _ in 0..self.config.bus_latency_cycles {
            self.step();
        }
    }

    fn step(&mut self) {
        let status = self.core.tick();
        self.cycle = self.cycle.saturating_add(1);
        self.port.publish(self.cycle, status);
        if let Some(trace) = self.trace.as_mut() {
            trace.push(TraceSample {
                cycle: self.cycle,
                counter: self.core.counter(),
                status,
            });
        }
        trace!(cycle = self.cycle, %status, "tick");
    }
}

impl Default for Testbench {
    fn default() -> Self {
        let config = TestbenchConfig::default();
        Self {
            config,
            core: WatchdogCore::new(config.watchdog),
            port: Arc::new(StatusPort::new()),
            cycle: 0,
            trace: None,
        }
    }
}

impl From<WatchdogCore> for Testbench {
    fn from(core: WatchdogCore) -> Self {
        let port = Arc::new(StatusPort::new());
        port.publish(0, core.status());
        Self {
            config: TestbenchConfig {
                watchdog: *core.config(),
                bus_latency_cycles: 0,
            },
            core,
            port,
            cycle: 0,
            trace: None,
        }
    }
}

impl TryFrom<TestbenchConfig> for Testbench {
    type Error = TestbenchError;

    fn try_from(config: TestbenchConfig) -> TestbenchResult<Self> {
        Self::new(config)
    }
}
