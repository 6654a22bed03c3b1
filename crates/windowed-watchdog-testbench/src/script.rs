//! Line-oriented stimulus scripts.
//!
//! ```text
//! # Comments run to the end of the line.
//! reset
//! write WINDOW_CLOSE 25     # register by name or word offset
//! write CONTROL 1
//! cycles 25
//! expect 0b0101_1000
//! pat                       # same as `write PAT 1`
//! read PAT 1                # optional expected value
//! expect-not 0b1011_1100
//! ```
//!
//! Numbers are decimal, `0x` hex or `0b` binary, with optional `_`
//! separators. Registers are resolved at parse time, so a script that
//! parses only fails at run time on an assertion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use windowed_watchdog::{Register, StatusBits, WatchdogMetrics, WatchdogPhase};

use crate::error::ScriptError;
use crate::testbench::Testbench;

/// One script command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// System reset.
    Reset,
    /// Register write.
    Write {
        /// Target register.
        register: Register,
        /// Value to write.
        value: u32,
    },
    /// PAT strobe.
    Pat,
    /// Register read, optionally asserted.
    Read {
        /// Source register.
        register: Register,
        /// Value the read must return.
        expected: Option<u32>,
    },
    /// Advance clock cycles.
    Cycles(u64),
    /// Assert the status byte.
    Expect(StatusBits),
    /// Assert the status byte differs.
    ExpectNot(StatusBits),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reset => f.write_str("reset"),
            Self::Write { register, value } => write!(f, "write {register} {value:#x}"),
            Self::Pat => f.write_str("pat"),
            Self::Read {
                register,
                expected: None,
            } => write!(f, "read {register}"),
            Self::Read {
                register,
                expected: Some(expected),
            } => write!(f, "read {register} {expected:#x}"),
            Self::Cycles(n) => write!(f, "cycles {n}"),
            Self::Expect(status) => write!(f, "expect {status}"),
            Self::ExpectNot(status) => write!(f, "expect-not {status}"),
        }
    }
}

/// A command and the source line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// 1-based source line.
    pub line: usize,
    /// Parsed command.
    pub command: Command,
}

/// A parsed stimulus script.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script {
    steps: Vec<Step>,
}

impl Script {
    /// Parse script text.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Parse`] naming the first malformed line.
    pub fn parse(source: &str) -> Result<Self, ScriptError> {
        let mut steps = Vec::new();
        for (index, raw) in source.lines().enumerate() {
            let line = index.saturating_add(1);
            let text = raw.split_once('#').map_or(raw, |(code, _)| code).trim();
            let mut words = text.split_whitespace();
            let Some(keyword) = words.next() else {
                continue;
            };
            let args: Vec<&str> = words.collect();
            let command = parse_command(line, keyword, &args)?;
            steps.push(Step { line, command });
        }
        Ok(Self { steps })
    }

    /// Parsed steps in source order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the script has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total clock cycles the script advances explicitly, ignoring bus
    /// latency.
    #[must_use]
    pub fn explicit_cycles(&self) -> u64 {
        self.steps
            .iter()
            .filter_map(|step| match step.command {
                Command::Cycles(n) => Some(n),
                _ => None,
            })
            .fold(0, u64::saturating_add)
    }
}

impl FromStr for Script {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a Script {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

fn usage(keyword: &str) -> Option<&'static str> {
    match keyword {
        "reset" => Some("reset"),
        "write" => Some("write <register> <value>"),
        "pat" => Some("pat"),
        "read" => Some("read <register> [<expected>]"),
        "cycles" => Some("cycles <n>"),
        "expect" => Some("expect <status>"),
        "expect-not" => Some("expect-not <status>"),
        _ => None,
    }
}

fn parse_command(line: usize, keyword: &str, args: &[&str]) -> Result<Command, ScriptError> {
    let keyword = keyword.to_ascii_lowercase();
    let command = match (keyword.as_str(), args) {
        ("reset", []) => Command::Reset,
        ("pat", []) => Command::Pat,
        ("write", [register, value]) => Command::Write {
            register: parse_register(line, register)?,
            value: parse_word(line, value)?,
        },
        ("read", [register]) => Command::Read {
            register: parse_register(line, register)?,
            expected: None,
        },
        ("read", [register, expected]) => Command::Read {
            register: parse_register(line, register)?,
            expected: Some(parse_word(line, expected)?),
        },
        ("cycles", [n]) => Command::Cycles(
            parse_number(n)
                .ok_or_else(|| ScriptError::parse(line, format!("invalid cycle count `{n}`")))?,
        ),
        ("expect", [status]) => Command::Expect(parse_status(line, status)?),
        ("expect-not", [status]) => Command::ExpectNot(parse_status(line, status)?),
        (keyword, _) => {
            return Err(match usage(keyword) {
                Some(usage) => ScriptError::parse(line, format!("usage: {usage}")),
                None => ScriptError::parse(line, format!("unknown command `{keyword}`")),
            });
        }
    };
    Ok(command)
}

/// Parse a decimal, `0x` or `0b` number with optional `_` separators.
#[must_use]
pub fn parse_number(token: &str) -> Option<u64> {
    let token = token.replace('_', "");
    let (digits, radix) = if let Some(hex) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        (hex, 16)
    } else if let Some(bin) = token
        .strip_prefix("0b")
        .or_else(|| token.strip_prefix("0B"))
    {
        (bin, 2)
    } else {
        (token.as_str(), 10)
    };
    if digits.is_empty() || digits.starts_with('+') {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

fn parse_register(line: usize, token: &str) -> Result<Register, ScriptError> {
    token
        .parse::<Register>()
        .map_err(|err| ScriptError::parse(line, format!("bad register `{token}`: {err}")))
}

fn parse_word(line: usize, token: &str) -> Result<u32, ScriptError> {
    parse_number(token)
        .and_then(|value| u32::try_from(value).ok())
        .ok_or_else(|| ScriptError::parse(line, format!("invalid 32-bit value `{token}`")))
}

/// Parse a status byte token, rejecting set reserved bits.
///
/// # Errors
///
/// Returns [`ScriptError::Parse`] if the token is not a number, does not fit
/// in a byte, or sets a reserved bit.
pub fn parse_status(line: usize, token: &str) -> Result<StatusBits, ScriptError> {
    let byte = parse_number(token)
        .and_then(|value| u8::try_from(value).ok())
        .ok_or_else(|| ScriptError::parse(line, format!("invalid status byte `{token}`")))?;
    StatusBits::from_byte(byte).ok_or_else(|| {
        ScriptError::parse(line, format!("status `{token}` sets reserved bits 1..0"))
    })
}

/// Record of one executed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Source line.
    pub line: usize,
    /// Canonical rendering of the command.
    pub command: String,
    /// Cycle number after the step.
    pub cycle: u64,
    /// Status after the step.
    pub status: StatusBits,
    /// Value returned by a `read`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<u32>,
}

/// Outcome of a script that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptReport {
    /// Executed steps in order.
    pub steps: Vec<StepRecord>,
    /// Number of `expect`, `expect-not` and asserted `read` steps that held.
    pub checks_passed: usize,
    /// Cycle number when the script finished.
    pub final_cycle: u64,
    /// Status when the script finished.
    pub final_status: StatusBits,
    /// State machine phase when the script finished.
    pub final_phase: WatchdogPhase,
    /// Core metrics when the script finished.
    pub metrics: WatchdogMetrics,
}

/// Run a script against a harness.
///
/// # Errors
///
/// Stops at the first failed assertion with
/// [`ScriptError::ExpectationFailed`] or [`ScriptError::ReadMismatch`].
pub fn run_script(bench: &mut Testbench, script: &Script) -> Result<ScriptReport, ScriptError> {
    info!(
        steps = script.len(),
        cycles = script.explicit_cycles(),
        "running script"
    );
    let mut steps = Vec::with_capacity(script.len());
    let mut checks_passed = 0usize;

    for step in script {
        let line = step.line;
        let mut read = None;
        match step.command {
            Command::Reset => bench.reset(),
            Command::Write { register, value } => bench.write(register, value),
            Command::Pat => bench.pat(),
            Command::Read { register, expected } => {
                let actual = bench.read(register);
                if let Some(expected) = expected {
                    if actual != expected {
                        return Err(ScriptError::ReadMismatch {
                            line,
                            register,
                            expected,
                            actual,
                        });
                    }
                    checks_passed = checks_passed.saturating_add(1);
                }
                read = Some(actual);
            }
            Command::Cycles(n) => {
                bench.clock_cycles(n);
            }
            Command::Expect(expected) => {
                check_status(line, bench.status(), expected, false)?;
                checks_passed = checks_passed.saturating_add(1);
            }
            Command::ExpectNot(expected) => {
                check_status(line, bench.status(), expected, true)?;
                checks_passed = checks_passed.saturating_add(1);
            }
        }
        debug!(line, command = %step.command, cycle = bench.cycle(), "step done");
        steps.push(StepRecord {
            line,
            command: step.command.to_string(),
            cycle: bench.cycle(),
            status: bench.status(),
            read,
        });
    }

    let report = ScriptReport {
        steps,
        checks_passed,
        final_cycle: bench.cycle(),
        final_status: bench.status(),
        final_phase: bench.core().phase(),
        metrics: bench.core().metrics(),
    };
    info!(
        checks = report.checks_passed,
        cycle = report.final_cycle,
        status = %report.final_status,
        "script passed"
    );
    Ok(report)
}

fn check_status(
    line: usize,
    actual: StatusBits,
    expected: StatusBits,
    negated: bool,
) -> Result<(), ScriptError> {
    if (actual == expected) == negated {
        return Err(ScriptError::ExpectationFailed {
            line,
            expected,
            actual,
            negated,
        });
    }
    Ok(())
}
