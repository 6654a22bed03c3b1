//! Command implementations for wdogctl

pub mod decode;
pub mod run;
pub mod scenario;

use clap::Subcommand;
use windowed_watchdog::{DisabledStatus, WatchdogConfig};
use windowed_watchdog_testbench::{TestbenchConfig, TestbenchError};

use crate::error::CliError;

#[derive(Subcommand)]
pub enum ScenarioCommands {
    /// List built-in scenarios
    List,

    /// Run one scenario, or all of them
    Run {
        /// Scenario name
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        name: Option<String>,
        /// Run every scenario in the catalog
        #[arg(short, long)]
        all: bool,
    },
}

/// Harness settings shared by every command that simulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchOptions {
    pub bus_latency: u32,
    pub width: u8,
    pub legacy_idle: bool,
}

impl BenchOptions {
    /// Build and validate the harness configuration.
    pub fn testbench_config(&self) -> Result<TestbenchConfig, CliError> {
        let disabled_status = if self.legacy_idle {
            DisabledStatus::InterruptLowIdle
        } else {
            DisabledStatus::AllClear
        };
        let watchdog = WatchdogConfig::builder()
            .register_width_bits(self.width)
            .disabled_status(disabled_status)
            .build()
            .map_err(TestbenchError::from)?;
        Ok(TestbenchConfig {
            watchdog,
            bus_latency_cycles: self.bus_latency,
        })
    }
}
