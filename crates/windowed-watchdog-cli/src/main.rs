//! wdogctl - Windowed Watchdog Simulator CLI
//!
//! Runs stimulus scripts and built-in scenarios against a cycle-accurate
//! model of the windowed watchdog peripheral, and decodes status bytes.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{BenchOptions, ScenarioCommands};
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "wdogctl")]
#[command(about = "Windowed Watchdog Simulator - run stimulus scripts and scenarios")]
#[command(version)]
#[command(long_about = "
wdogctl drives a cycle-accurate model of a windowed watchdog timer.
Scripts write the CONTROL, WINDOW_START, WINDOW_CLOSE and PAT registers,
advance the clock, and assert the 8-bit status bus.

Exit codes: 0 success, 2 a script expectation failed,
3 parse or configuration error, 1 anything else.
Use --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Clock cycles each register access spends on the bus
    #[arg(long, global = true, default_value_t = 0, env = "WDOGCTL_BUS_LATENCY")]
    bus_latency: u32,

    /// Register and counter width in bits (1-32)
    #[arg(long, global = true, default_value_t = 32)]
    width: u8,

    /// Report interrupt_low while disabled, as early hardware revisions did
    #[arg(long, global = true)]
    legacy_idle: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a stimulus script file
    Run {
        /// Script file path
        file: PathBuf,
        /// Include the per-cycle trace in the output
        #[arg(short, long)]
        trace: bool,
    },

    /// Built-in scenario commands
    #[command(subcommand)]
    Scenario(ScenarioCommands),

    /// Decode a status byte into its flags
    Decode {
        /// Status byte (decimal, 0x hex or 0b binary)
        byte: String,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Cli {
    fn bench_options(&self) -> BenchOptions {
        BenchOptions {
            bus_latency: self.bus_latency,
            width: self.width,
            legacy_idle: self.legacy_idle,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "wdogctl={log_level},windowed_watchdog={log_level},\
                     windowed_watchdog_testbench={log_level}"
                )
                .into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(exit_code)
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    let options = cli.bench_options();
    match &cli.command {
        Commands::Run { file, trace } => commands::run::execute(file, *trace, &options, cli.json),
        Commands::Scenario(cmd) => commands::scenario::execute(cmd, &options, cli.json),
        Commands::Decode { byte } => commands::decode::execute(byte, cli.json),
        Commands::Completion { shell } => {
            completion::generate_completion(*shell);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    // --- Global flag parsing ---

    #[test]
    fn parse_scenario_list_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["wdogctl", "scenario", "list"])?;
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.bus_latency, 0);
        assert_eq!(cli.width, 32);
        assert!(!cli.legacy_idle);
        assert!(matches!(
            cli.command,
            Commands::Scenario(ScenarioCommands::List)
        ));
        Ok(())
    }

    #[test]
    fn parse_global_flags_after_subcommand() -> TestResult {
        let cli = Cli::try_parse_from([
            "wdogctl",
            "decode",
            "0x9c",
            "--json",
            "--bus-latency",
            "8",
            "--width",
            "16",
            "--legacy-idle",
        ])?;
        assert!(cli.json);
        let options = cli.bench_options();
        assert_eq!(options.bus_latency, 8);
        assert_eq!(options.width, 16);
        assert!(options.legacy_idle);
        Ok(())
    }

    #[test]
    fn parse_verbose_levels() -> TestResult {
        for (args, expected) in [
            (vec!["wdogctl", "scenario", "list"], 0),
            (vec!["wdogctl", "-v", "scenario", "list"], 1),
            (vec!["wdogctl", "-vv", "scenario", "list"], 2),
            (vec!["wdogctl", "-vvv", "scenario", "list"], 3),
        ] {
            let cli = Cli::try_parse_from(args)?;
            assert_eq!(cli.verbose, expected);
        }
        Ok(())
    }

    // --- Command parsing ---

    #[test]
    fn parse_run_with_trace() -> TestResult {
        let cli = Cli::try_parse_from(["wdogctl", "run", "boot.wdt", "--trace"])?;
        match &cli.command {
            Commands::Run { file, trace } => {
                assert_eq!(file, &PathBuf::from("boot.wdt"));
                assert!(trace);
            }
            _ => return Err("expected Run command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_scenario_run_by_name() -> TestResult {
        let cli = Cli::try_parse_from(["wdogctl", "scenario", "run", "immediate_trip"])?;
        match &cli.command {
            Commands::Scenario(ScenarioCommands::Run { name, all }) => {
                assert_eq!(name.as_deref(), Some("immediate_trip"));
                assert!(!all);
            }
            _ => return Err("expected Scenario Run command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_scenario_run_all() -> TestResult {
        let cli = Cli::try_parse_from(["wdogctl", "scenario", "run", "--all"])?;
        match &cli.command {
            Commands::Scenario(ScenarioCommands::Run { name, all }) => {
                assert!(name.is_none());
                assert!(all);
            }
            _ => return Err("expected Scenario Run command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_scenario_run_rejects_name_with_all() {
        let result = Cli::try_parse_from(["wdogctl", "scenario", "run", "x", "--all"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_scenario_run_requires_target() {
        let result = Cli::try_parse_from(["wdogctl", "scenario", "run"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_decode() -> TestResult {
        let cli = Cli::try_parse_from(["wdogctl", "decode", "0b1001_1100"])?;
        match &cli.command {
            Commands::Decode { byte } => assert_eq!(byte, "0b1001_1100"),
            _ => return Err("expected Decode command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_completion_shells() -> TestResult {
        for shell in ["bash", "zsh", "fish", "powershell", "elvish"] {
            let cli = Cli::try_parse_from(["wdogctl", "completion", shell])?;
            assert!(matches!(cli.command, Commands::Completion { .. }));
        }
        Ok(())
    }

    #[test]
    fn parse_unknown_subcommand_fails() {
        assert!(Cli::try_parse_from(["wdogctl", "flash"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
