//! Integration tests for register-driven lifecycles and the status port.

#![cfg(test)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use windowed_watchdog::prelude::*;

type TestResult = Result<(), Box<dyn std::error::Error>>;

mod register_lifecycle {
    use super::*;

    #[test]
    fn test_complete_lifecycle() -> TestResult {
        let config = WatchdogConfig::builder().register_width_bits(16).build()?;
        let mut watchdog = WatchdogCore::new(config);

        watchdog.write_offset(1, 4)?;
        watchdog.write_offset(2, 12)?;
        watchdog.write_offset(0, 1)?;
        assert_eq!(watchdog.phase(), WatchdogPhase::Armed);

        for _ in 0..10 {
            for _ in 0..8 {
                watchdog.tick();
            }
            watchdog.write_offset(3, 1)?;
        }
        assert!(!watchdog.is_tripped());
        assert_eq!(watchdog.metrics().accepted_pats, 10);
        assert_eq!(watchdog.metrics().longest_pat_interval, 8);

        for _ in 0..13 {
            watchdog.tick();
        }
        assert_eq!(watchdog.phase(), WatchdogPhase::Tripped);
        assert_eq!(watchdog.status().to_byte(), 0b1011_1100);

        watchdog.write_offset(0, 0)?;
        assert_eq!(watchdog.phase(), WatchdogPhase::Disabled);
        assert_eq!(watchdog.read_offset(0)?, 0);
        assert_eq!(watchdog.read_offset(2)?, 12);

        watchdog.reset();
        assert_eq!(watchdog.read_offset(2)?, 0);
        assert_eq!(watchdog.metrics(), WatchdogMetrics::default());
        Ok(())
    }

    #[test]
    fn test_unknown_offsets_leave_state_untouched() {
        let mut watchdog = WatchdogCore::default();
        let before = watchdog.clone();
        for offset in 4..16 {
            assert!(watchdog.write_offset(offset, u32::MAX).is_err());
        }
        assert_eq!(watchdog, before);
    }
}

mod status_port {
    use super::*;

    #[test]
    fn test_port_follows_ticks() {
        let port = StatusPort::new();
        let mut watchdog = WatchdogCore::default();
        watchdog.write_register(Register::WindowClose, 3);
        watchdog.write_register(Register::Control, CONTROL_ENABLE);

        for cycle in 1..=4u64 {
            port.publish(cycle, watchdog.tick());
        }
        assert_eq!(port.last_cycle(), 4);
        assert!(port.interrupt_asserted());
    }

    #[test]
    fn test_concurrent_sampling_sees_valid_bytes() -> TestResult {
        let port = Arc::new(StatusPort::new());
        let done = Arc::new(AtomicBool::new(false));

        let reader = {
            let port = Arc::clone(&port);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut samples = 0u64;
                while !done.load(Ordering::Acquire) {
                    let status = port.sample();
                    if status.to_byte() & StatusBits::RESERVED_MASK != 0 {
                        return Err(samples);
                    }
                    if status.interrupt_high() && status.interrupt_low() {
                        return Err(samples);
                    }
                    samples = samples.saturating_add(1);
                }
                Ok(samples)
            })
        };

        let mut watchdog = WatchdogCore::default();
        watchdog.write_register(Register::WindowClose, 500);
        watchdog.write_register(Register::Control, CONTROL_ENABLE);
        for cycle in 1..=2000u64 {
            if cycle % 100 == 0 {
                watchdog.write_register(Register::Pat, 1);
            }
            port.publish(cycle, watchdog.tick());
        }
        done.store(true, Ordering::Release);

        let result = reader.join().map_err(|_| "reader thread panicked")?;
        assert!(result.is_ok(), "reader saw an invalid status byte");
        assert!(!port.interrupt_asserted());
        assert_eq!(port.last_cycle(), 2000);
        Ok(())
    }
}

mod std_feature {
    use super::*;

    fn as_std_error(err: WatchdogError) -> Box<dyn std::error::Error + Send + Sync> {
        Box::new(err)
    }

    #[test]
    fn test_errors_are_std_errors() {
        let err = WatchdogCore::default().read_offset(7).err();
        assert_eq!(err, Some(WatchdogError::UnknownRegister { offset: 7 }));

        let boxed = err.map(as_std_error);
        assert_eq!(
            boxed.map(|e| e.to_string()).as_deref(),
            Some("Unknown register offset: 7")
        );
    }

    #[test]
    fn test_error_propagates_through_question_mark() {
        fn write_unmapped() -> TestResult {
            WatchdogCore::default().write_offset(4, 1)?;
            Ok(())
        }
        assert!(write_unmapped().is_err());
    }
}
