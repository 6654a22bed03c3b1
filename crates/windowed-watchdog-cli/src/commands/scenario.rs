//! Built-in scenario commands

use anyhow::Result;
use tracing::debug;
use windowed_watchdog_testbench::{Scenario, Testbench, find, run_script, scenarios};

use crate::commands::{BenchOptions, ScenarioCommands};
use crate::error::CliError;
use crate::output::{self, ScenarioOutcome};

/// Execute scenario commands
pub fn execute(cmd: &ScenarioCommands, options: &BenchOptions, json: bool) -> Result<()> {
    match cmd {
        ScenarioCommands::List => {
            output::print_scenario_list(scenarios(), json);
            Ok(())
        }
        ScenarioCommands::Run { name, all } => {
            if *all {
                run_all(options, json)
            } else {
                let name = name.as_deref().unwrap_or_default();
                let scenario =
                    find(name).ok_or_else(|| CliError::ScenarioNotFound(name.to_string()))?;
                run_one(scenario, options, json)
            }
        }
    }
}

fn run_one(scenario: &Scenario, options: &BenchOptions, json: bool) -> Result<()> {
    let mut bench = Testbench::try_from(options.testbench_config()?).map_err(CliError::from)?;
    let report = scenario
        .script()
        .and_then(|script| run_script(&mut bench, &script))
        .map_err(|source| CliError::Scenario {
            name: scenario.name.to_string(),
            source,
        })?;
    output::print_report(scenario.name, &report, None, json);
    Ok(())
}

fn run_all(options: &BenchOptions, json: bool) -> Result<()> {
    let config = options.testbench_config()?;
    let mut outcomes = Vec::with_capacity(scenarios().len());
    let mut first_failure = None;

    for scenario in scenarios() {
        let mut bench = Testbench::try_from(config).map_err(CliError::from)?;
        let result = scenario
            .script()
            .and_then(|script| run_script(&mut bench, &script));
        debug!(scenario = scenario.name, passed = result.is_ok(), "scenario finished");

        let outcome = match result {
            Ok(report) => ScenarioOutcome {
                name: scenario.name,
                passed: true,
                checks_passed: report.checks_passed,
                final_cycle: report.final_cycle,
                error: None,
            },
            Err(err) => {
                let outcome = ScenarioOutcome {
                    name: scenario.name,
                    passed: false,
                    checks_passed: 0,
                    final_cycle: bench.cycle(),
                    error: Some(err.to_string()),
                };
                if first_failure.is_none() {
                    first_failure = Some((scenario.name, err));
                }
                outcome
            }
        };
        outcomes.push(outcome);
    }

    match first_failure {
        None => {
            output::print_scenario_outcomes(&outcomes, json);
            Ok(())
        }
        Some((name, source)) => {
            // The error report is the JSON document in machine mode.
            if !json {
                output::print_scenario_outcomes(&outcomes, json);
            }
            Err(CliError::Scenario {
                name: name.to_string(),
                source,
            }
            .into())
        }
    }
}
