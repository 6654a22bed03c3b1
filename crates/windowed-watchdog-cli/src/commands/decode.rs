//! Status byte decoding command

use anyhow::Result;
use windowed_watchdog::StatusBits;
use windowed_watchdog_testbench::script::parse_number;

use crate::error::CliError;
use crate::output;

/// Execute status decoding
pub fn execute(byte: &str, json: bool) -> Result<()> {
    let status = parse_status_byte(byte)?;
    output::print_decoded(status, json);
    Ok(())
}

fn parse_status_byte(token: &str) -> Result<StatusBits, CliError> {
    let value = parse_number(token)
        .and_then(|value| u8::try_from(value).ok())
        .ok_or_else(|| CliError::ValidationError(format!("`{token}` is not a byte")))?;
    StatusBits::from_byte(value).ok_or_else(|| {
        CliError::ValidationError(format!("`{token}` sets reserved status bits 1..0"))
    })
}
