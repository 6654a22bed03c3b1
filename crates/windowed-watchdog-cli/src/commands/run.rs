//! Script execution command

use std::fs;
use std::path::Path;

use anyhow::Result;
use tracing::info;
use windowed_watchdog_testbench::{Script, Testbench, run_script};

use crate::commands::BenchOptions;
use crate::error::CliError;
use crate::output;

/// Execute a script file
pub fn execute(file: &Path, trace: bool, options: &BenchOptions, json: bool) -> Result<()> {
    let source = fs::read_to_string(file).map_err(CliError::from)?;
    let script = Script::parse(&source).map_err(CliError::from)?;

    let mut bench = Testbench::try_from(options.testbench_config()?).map_err(CliError::from)?;
    bench.set_trace(trace);

    info!(
        file = %file.display(),
        steps = script.len(),
        cycles = script.explicit_cycles(),
        "running script file"
    );
    let report = run_script(&mut bench, &script).map_err(CliError::from)?;

    let samples = trace.then(|| bench.take_trace());
    let label = file.display().to_string();
    output::print_report(&label, &report, samples.as_deref(), json);
    Ok(())
}
