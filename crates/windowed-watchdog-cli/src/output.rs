//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use serde_json::json;
use windowed_watchdog::{StatusBits, WatchdogMetrics};
use windowed_watchdog_testbench::{Scenario, ScriptError, ScriptReport, TraceSample};

use crate::error::CliError;

/// Result of one scenario in a batch run.
#[derive(Debug, serde::Serialize)]
pub struct ScenarioOutcome {
    pub name: &'static str,
    pub passed: bool,
    pub checks_passed: usize,
    pub final_cycle: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let mut error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    });
    if let Some(line) = script_error(error).map(ScriptError::line)
        && let Some(details) = error_json.get_mut("error")
    {
        details["line"] = json!(line);
    }
    print_json(&error_json, "error");
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    // Print error chain if available
    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Print the outcome of a script run
pub fn print_report(
    label: &str,
    report: &ScriptReport,
    trace: Option<&[TraceSample]>,
    json: bool,
) {
    if json {
        let mut output = json!({
            "success": true,
            "script": label,
            "report": report,
        });
        if let Some(trace) = trace {
            output["trace"] = json!(trace);
        }
        print_json(&output, "report");
        return;
    }

    println!(
        "{} {} ({} steps, {} checks)",
        "✓".green(),
        label.bold(),
        report.steps.len(),
        report.checks_passed
    );
    println!("  Final cycle:  {}", report.final_cycle);
    println!(
        "  Final status: {}  {}",
        report.final_status,
        describe_status(report.final_status)
    );
    println!("  Final phase:  {}", report.final_phase);
    println!("  Metrics:      {}", format_metrics(&report.metrics));

    if let Some(trace) = trace {
        println!();
        println!("  {}", format!("{:>8}  {:>10}  status", "cycle", "counter").bold());
        for sample in trace {
            println!(
                "  {:>8}  {:>10}  {}",
                sample.cycle, sample.counter, sample.status
            );
        }
    }
}

/// Print the scenario catalog
pub fn print_scenario_list(scenarios: &[Scenario], json: bool) {
    if json {
        let output = json!({
            "success": true,
            "scenarios": scenarios
        });
        print_json(&output, "scenario list");
        return;
    }

    println!("{}", "Built-in scenarios:".bold());
    for scenario in scenarios {
        println!(
            "  {} {}",
            format!("{:<32}", scenario.name).cyan(),
            scenario.description
        );
    }
}

/// Print the outcomes of a scenario batch
pub fn print_scenario_outcomes(outcomes: &[ScenarioOutcome], json: bool) {
    let passed = outcomes.iter().filter(|o| o.passed).count();
    if json {
        let output = json!({
            "success": passed == outcomes.len(),
            "passed": passed,
            "total": outcomes.len(),
            "scenarios": outcomes
        });
        print_json(&output, "scenario results");
        return;
    }

    for outcome in outcomes {
        if outcome.passed {
            println!(
                "{} {} ({} checks, {} cycles)",
                "✓".green(),
                outcome.name,
                outcome.checks_passed,
                outcome.final_cycle
            );
        } else {
            println!(
                "{} {}: {}",
                "✗".red(),
                outcome.name,
                outcome.error.as_deref().unwrap_or("failed")
            );
        }
    }
    println!("{passed}/{} scenarios passed", outcomes.len());
}

/// Print a decoded status byte
pub fn print_decoded(status: StatusBits, json: bool) {
    let flags = status.flags();
    if json {
        let output = json!({
            "success": true,
            "byte": status.to_byte(),
            "binary": status.to_string(),
            "flags": flags,
            "summary": summary(status)
        });
        print_json(&output, "decoded status");
        return;
    }

    println!("{} {}", "Status:".bold(), status);
    let rows = [
        ("interrupt_high", flags.interrupt_high),
        ("interrupt_low", flags.interrupt_low),
        ("saw_pat", flags.saw_pat),
        ("enabled", flags.enabled),
        ("after_window_start", flags.after_window_start),
        ("after_window_close", flags.after_window_close),
    ];
    for (name, set) in rows {
        let marker = if set { "●".green() } else { "○".dimmed() };
        println!("  {marker} {name}");
    }
    println!("  {}", summary(status));
}

fn print_json(value: &serde_json::Value, what: &str) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format {what} as JSON: {e}"),
    }
}

/// One-word reading of a status byte.
fn summary(status: StatusBits) -> &'static str {
    if status.interrupt_high() {
        "tripped"
    } else if !status.enabled() {
        "disabled"
    } else if status.after_window_start() {
        "window open"
    } else {
        "armed"
    }
}

fn describe_status(status: StatusBits) -> String {
    let flags = status.flags();
    let names: Vec<&str> = [
        ("interrupt_high", flags.interrupt_high),
        ("interrupt_low", flags.interrupt_low),
        ("saw_pat", flags.saw_pat),
        ("enabled", flags.enabled),
        ("after_window_start", flags.after_window_start),
        ("after_window_close", flags.after_window_close),
    ]
    .into_iter()
    .filter_map(|(name, set)| set.then_some(name))
    .collect();
    format!("[{}]", names.join(" "))
}

fn format_metrics(metrics: &WatchdogMetrics) -> String {
    format!(
        "arms {}, pats {} ({} accepted / {} early / {} ignored), trips {}",
        metrics.arm_count,
        metrics.total_pats(),
        metrics.accepted_pats,
        metrics.early_pats,
        metrics.ignored_pats,
        metrics.trip_count
    )
}

fn script_error(error: &Error) -> Option<&ScriptError> {
    match error.downcast_ref::<CliError>()? {
        CliError::Script(err) | CliError::Scenario { source: err, .. } => Some(err),
        _ => None,
    }
}

/// Get error type name for JSON output
fn error_type_name(error: &Error) -> &'static str {
    match error.downcast_ref::<CliError>() {
        Some(CliError::Script(err) | CliError::Scenario { source: err, .. })
            if err.is_assertion() =>
        {
            "ExpectationFailed"
        }
        Some(CliError::Script(_) | CliError::Scenario { .. }) => "ParseError",
        Some(CliError::ScenarioNotFound(_)) => "ScenarioNotFound",
        Some(CliError::InvalidConfiguration(_)) => "InvalidConfiguration",
        Some(CliError::ValidationError(_)) => "ValidationError",
        Some(CliError::IoError(_)) => "IoError",
        Some(CliError::JsonError(_)) => "JsonError",
        None => "Error",
    }
}
