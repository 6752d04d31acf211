//! Cycle Driver Tests.
//!
//! The driver must call the binding strictly around each cycle, skip outputs
//! after a failed cycle, account statistics, and pace to the period.

use std::time::{Duration, Instant};

use ldvm_core::common::{BitAddr, ExecError};
use ldvm_core::config::Config;
use ldvm_core::core::{Program, RelayBank};
use ldvm_core::sim::{CycleDriver, NoIo, ProgramImage, SymbolTable};
use mockall::Sequence;
use pretty_assertions::assert_eq;

use crate::common::builder::ProgramBuilder;
use crate::common::init_tracing;
use crate::common::mocks::io::MockBinding;

fn image(program: Program, period_us: u64) -> ProgramImage {
    ProgramImage::new(program, SymbolTable::new(), period_us, None)
}

#[test]
fn binding_wraps_each_cycle() {
    init_tracing();
    // bits[001] := bits[000]
    let program = ProgramBuilder::new().copy_bit(1, 0).end().program();

    let mut seq = Sequence::new();
    let mut io = MockBinding::new();
    io.expect_read_inputs()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|relays: &mut RelayBank| {
            let _ = relays.set(0, true);
        });
    io.expect_write_outputs()
        .withf(|relays: &RelayBank| relays.get(1) == Some(true))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());

    let mut driver = CycleDriver::new(image(program, 10_000), &Config::default(), io);
    let report = driver.run_cycle().unwrap();
    assert_eq!(report.steps, 2);
    assert_eq!(driver.stats().cycles, 1);
    assert_eq!(driver.stats().instructions, 2);
}

#[test]
fn failed_cycle_skips_outputs() {
    init_tracing();
    let program = ProgramBuilder::new().set_bit(0).jump(0).end().program();
    let config = Config::from_json(r#"{ "general": { "step_limit": 50 } }"#).unwrap();

    let mut io = MockBinding::new();
    io.expect_read_inputs().times(1).return_const(());
    io.expect_write_outputs().never();

    let mut driver = CycleDriver::new(image(program, 10_000), &config, io);
    assert_eq!(
        driver.run_cycle(),
        Err(ExecError::StepLimitExceeded { limit: 50, pc: 1 })
    );
    assert_eq!(driver.stats().cycles, 0);
}

#[test]
fn run_cycles_counts_and_keeps_state() {
    let program = ProgramBuilder::new().inc(0).end().program();
    let mut driver =
        CycleDriver::new(image(program, 10_000), &Config::default(), NoIo).with_pacing(false);
    driver.run_cycles(25).unwrap();

    assert_eq!(driver.stats().cycles, 25);
    assert_eq!(driver.stats().max_steps, 2);
    assert_eq!(driver.machine().integers.get(0), Some(25));
}

#[test]
fn run_cycles_stops_at_first_error() {
    let program = ProgramBuilder::new().set_bit(0).jump(0).end().program();
    let config = Config::from_json(r#"{ "general": { "step_limit": 10 } }"#).unwrap();
    let mut driver = CycleDriver::new(image(program, 10_000), &config, NoIo).with_pacing(false);

    assert!(driver.run_cycles(5).is_err());
    assert_eq!(driver.stats().cycles, 0);
}

#[test]
fn run_forever_returns_only_on_error() {
    let program = ProgramBuilder::new().set_bit(0).jump(0).end().program();
    let config = Config::from_json(r#"{ "general": { "step_limit": 10 } }"#).unwrap();
    let mut driver = CycleDriver::new(image(program, 1_000), &config, NoIo);

    let err = driver.run_forever().unwrap_err();
    assert_eq!(err, ExecError::StepLimitExceeded { limit: 10, pc: 1 });
}

#[test]
fn paced_cycles_follow_the_period() {
    let program = ProgramBuilder::new().end().program();
    let mut driver = CycleDriver::new(image(program, 2_000), &Config::default(), NoIo);
    assert_eq!(driver.period(), Duration::from_millis(2));

    // Two waits separate three cycles.
    let start = Instant::now();
    driver.run_cycles(3).unwrap();
    assert!(start.elapsed() >= Duration::from_millis(4));
}

#[test]
fn last_cycle_returns_without_waiting() {
    let program = ProgramBuilder::new().end().program();
    let mut driver = CycleDriver::new(image(program, 5_000_000), &Config::default(), NoIo);

    let start = Instant::now();
    driver.run_cycles(1).unwrap();
    assert!(start.elapsed() < Duration::from_secs(2));
    assert_eq!(driver.stats().cycles, 1);
}

#[test]
fn banks_cover_program_capacities() {
    let program = ProgramBuilder::new().set_bit(100).end().program();
    let config = Config::from_json(r#"{ "memory": { "relay_capacity": 16 } }"#).unwrap();
    let mut driver = CycleDriver::new(image(program, 10_000), &config, NoIo).with_pacing(false);

    driver.run_cycle().unwrap();
    assert_eq!(driver.machine().relays.capacity(), 128);
    assert!(driver.machine().relays.read(BitAddr(100)));
}

#[test]
fn machine_is_writable_between_cycles() {
    let program = ProgramBuilder::new().copy_bit(1, 0).end().program();
    let mut driver =
        CycleDriver::new(image(program, 10_000), &Config::default(), NoIo).with_pacing(false);
    driver.machine_mut().relays.write(BitAddr(0), true);
    driver.run_cycle().unwrap();
    assert!(driver.machine().relays.read(BitAddr(1)));
}
