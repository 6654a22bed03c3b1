//! Tests for register accesses that spend clock cycles on the bus.
//!
//! Feature: bus_latency.feature

#![cfg(test)]

use proptest::prelude::*;
use windowed_watchdog_testbench::prelude::*;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const SERIAL_BUS_LATENCY: u32 = 8;

fn serial_bench() -> Result<Testbench, TestbenchError> {
    Testbench::new(TestbenchConfig::with_bus_latency(SERIAL_BUS_LATENCY))
}

mod scenarios_over_a_slow_bus {
    use super::*;

    /// Scenario: A pat issued right after arming lands late
    #[test]
    fn scenario_pat_lands_after_latency() -> TestResult {
        let mut bench = serial_bench()?;
        bench.write(Register::WindowClose, 100);
        bench.write(Register::Control, CONTROL_ENABLE);
        assert_eq!(bench.core().counter(), 0);

        bench.pat();
        assert_eq!(bench.core().metrics().longest_pat_interval, SERIAL_BUS_LATENCY);
        assert_eq!(bench.core().counter(), 0);
        Ok(())
    }

    /// Scenario: A window shorter than the bus latency trips before any pat lands
    #[test]
    fn scenario_window_shorter_than_latency_trips() -> TestResult {
        let mut bench = serial_bench()?;
        bench.write(Register::WindowClose, SERIAL_BUS_LATENCY - 2);
        bench.write(Register::Control, CONTROL_ENABLE);
        bench.pat();

        assert!(bench.status().interrupt_high());
        assert!(bench.status().saw_pat());
        assert!(bench.port().interrupt_asserted());
        Ok(())
    }

    /// Scenario: Reading a register back lets the window reopen after a pat
    #[test]
    fn scenario_status_after_pat_readback() -> TestResult {
        let mut bench = serial_bench()?;
        bench.write(Register::WindowStart, 5);
        bench.write(Register::WindowClose, 0xBBB);
        bench.write(Register::Control, CONTROL_ENABLE);
        bench.clock_cycles(10);
        bench.pat();

        assert_eq!(bench.read(Register::Pat), 1);
        let status = bench.status();
        assert_eq!(status.to_byte(), 0b0111_1000);
        assert_eq!(bench.core().counter(), SERIAL_BUS_LATENCY);
        Ok(())
    }

    /// Scenario: A zero-latency scenario fails once the bus is slow
    #[test]
    fn scenario_catalog_assumes_zero_latency() -> TestResult {
        let scenario = find("pat_restarts_countdown").ok_or("missing scenario")?;
        let mut bench = serial_bench()?;
        let err = run_script(&mut bench, &scenario.script()?).err();
        assert!(matches!(err, Some(ScriptError::ExpectationFailed { .. })));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Access {
    Write(Register, u32),
    Read(Register),
    Cycles(u8),
}

fn access_strategy() -> impl Strategy<Value = Access> {
    let register = prop_oneof![
        Just(Register::Control),
        Just(Register::WindowStart),
        Just(Register::WindowClose),
        Just(Register::Pat),
    ];
    prop_oneof![
        3 => (register.clone(), 0u32..40).prop_map(|(r, v)| Access::Write(r, v)),
        1 => register.prop_map(Access::Read),
        3 => any::<u8>().prop_map(Access::Cycles),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_latency_equals_explicit_ticks(
        latency in 0u32..16,
        accesses in proptest::collection::vec(access_strategy(), 0..60),
    ) {
        let bench = Testbench::new(TestbenchConfig::with_bus_latency(latency));
        prop_assert!(bench.is_ok());
        let Ok(mut bench) = bench else {
            return Err(proptest::test_runner::TestCaseError::fail("bench creation failed"));
        };
        let mut core = WatchdogCore::default();

        for access in accesses {
            match access {
                Access::Write(register, value) => {
                    bench.write(register, value);
                    for _ in 0..latency {
                        core.tick();
                    }
                    core.write_register(register, value);
                }
                Access::Read(register) => {
                    let got = bench.read(register);
                    for _ in 0..latency {
                        core.tick();
                    }
                    prop_assert_eq!(got, core.read_register(register));
                }
                Access::Cycles(n) => {
                    bench.clock_cycles(u64::from(n));
                    for _ in 0..n {
                        core.tick();
                    }
                }
            }
            prop_assert_eq!(bench.core(), &core);
            prop_assert_eq!(bench.port().sample(), bench.status());
        }
    }
}
