//! Cycle Execution Tests.
//!
//! One instruction group at a time, followed by sequencing: the `+1` jump
//! convention, both polarities of every conditional, termination, the step
//! bound, and determinism across machines.

use ldvm_core::common::ExecError;
use ldvm_core::config::MemoryConfig;
use ldvm_core::core::{Machine, Program, RelayBank, StepOutcome};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use crate::common::builder::ProgramBuilder;
use crate::common::harness::TestContext;

fn ctx(builder: ProgramBuilder) -> TestContext {
    TestContext::new(builder.program())
}

// ─── Relays ──────────────────────────────────────────────────────────────────

#[test]
fn set_and_clear_bit() {
    let mut t = ctx(ProgramBuilder::new().set_bit(1).clear_bit(2).end());
    t.set_bit(2, true);
    t.cycle();
    assert!(t.bit(1));
    assert!(!t.bit(2));
}

#[rstest]
#[case(true)]
#[case(false)]
fn copy_bit(#[case] src: bool) {
    let mut t = ctx(ProgramBuilder::new().copy_bit(0, 1).end());
    t.set_bit(0, !src);
    t.set_bit(1, src);
    t.cycle();
    assert_eq!(t.bit(0), src);
}

// ─── Integers ────────────────────────────────────────────────────────────────

#[test]
fn set_and_copy_int() {
    let mut t = ctx(ProgramBuilder::new().set_int(0, -1234).copy_int(1, 0).end());
    t.cycle();
    assert_eq!(t.int(0), -1234);
    assert_eq!(t.int(1), -1234);
}

#[test]
fn increment_wraps_at_max() {
    let mut t = ctx(ProgramBuilder::new().inc(0).end());
    t.set_int(0, i16::MAX);
    t.cycle();
    assert_eq!(t.int(0), i16::MIN);
}

#[rstest]
#[case::add(0, 7, 5, 12)]
#[case::add_wraps(0, i16::MAX, 1, i16::MIN)]
#[case::sub(1, 7, 5, 2)]
#[case::sub_wraps(1, i16::MIN, 1, i16::MAX)]
#[case::mul(2, -3, 4, -12)]
#[case::mul_wraps(2, 256, 256, 0)]
#[case::div(3, 7, 2, 3)]
#[case::div_truncates_toward_zero(3, -7, 2, -3)]
#[case::div_min_by_neg_one(3, i16::MIN, -1, i16::MIN)]
fn arithmetic(#[case] which: u8, #[case] a: i16, #[case] b: i16, #[case] expected: i16) {
    let b_ = ProgramBuilder::new();
    let b_ = match which {
        0 => b_.add(2, 0, 1),
        1 => b_.sub(2, 0, 1),
        2 => b_.mul(2, 0, 1),
        _ => b_.div(2, 0, 1),
    };
    let mut t = ctx(b_.end());
    t.set_int(0, a);
    t.set_int(1, b);
    t.cycle();
    assert_eq!(t.int(2), expected);
}

#[test]
fn divide_by_zero_leaves_destination() {
    let mut t = ctx(ProgramBuilder::new().div(2, 0, 1).end());
    t.set_int(0, 100);
    t.set_int(1, 0);
    t.set_int(2, 42);
    t.cycle();
    assert_eq!(t.int(2), 42);
}

#[test]
fn operands_may_alias_destination() {
    let mut t = ctx(ProgramBuilder::new().add(0, 0, 0).end());
    t.set_int(0, 21);
    t.cycle();
    assert_eq!(t.int(0), 42);
}

// ─── Jumps ───────────────────────────────────────────────────────────────────

#[test]
fn else_resumes_one_past_stored_target() {
    // 0: jump 001+1 -> pc 2, so the SetBit at 1 is skipped.
    let mut t = ctx(ProgramBuilder::new().jump(1).set_bit(0).set_bit(1).end());
    t.cycle();
    assert!(!t.bit(0));
    assert!(t.bit(1));
}

#[rstest]
#[case::relay_clear_jumps(false, false)]
#[case::relay_set_falls_through(true, true)]
fn if_bit_set(#[case] input: bool, #[case] reached: bool) {
    // 0: unless (bits[000] set) jump 001+1
    // 1: bits[001] := 1
    let mut t = ctx(ProgramBuilder::new().if_bit_set(0, 1).set_bit(1).end());
    t.set_bit(0, input);
    t.cycle();
    assert_eq!(t.bit(1), reached);
}

#[rstest]
#[case::relay_set_jumps(true, false)]
#[case::relay_clear_falls_through(false, true)]
fn if_bit_clear(#[case] input: bool, #[case] reached: bool) {
    let mut t = ctx(ProgramBuilder::new().if_bit_clear(0, 1).set_bit(1).end());
    t.set_bit(0, input);
    t.cycle();
    assert_eq!(t.bit(1), reached);
}

#[rstest]
#[case(9, true)]
#[case(10, false)]
#[case(11, false)]
#[case(i16::MIN, true)]
fn if_less_literal(#[case] value: i16, #[case] reached: bool) {
    let mut t = ctx(ProgramBuilder::new().if_less(0, 10, 1).set_bit(0).end());
    t.set_int(0, value);
    t.cycle();
    assert_eq!(t.bit(0), reached);
}

#[rstest]
#[case(3, 3, true)]
#[case(3, 4, false)]
fn if_equal(#[case] a: i16, #[case] b: i16, #[case] reached: bool) {
    let mut t = ctx(ProgramBuilder::new().if_equal(0, 1, 1).set_bit(0).end());
    t.set_int(0, a);
    t.set_int(1, b);
    t.cycle();
    assert_eq!(t.bit(0), reached);
}

#[rstest]
#[case(4, 3, true)]
#[case(3, 3, false)]
#[case(-1, 0, false)]
fn if_greater(#[case] a: i16, #[case] b: i16, #[case] reached: bool) {
    let mut t = ctx(ProgramBuilder::new().if_greater(0, 1, 1).set_bit(0).end());
    t.set_int(0, a);
    t.set_int(1, b);
    t.cycle();
    assert_eq!(t.bit(0), reached);
}

#[test]
fn end_to_end_less_than_literal() {
    // 0: int16s[000] := 5
    // 1: unless (int16s[000] < 10) jump 003+1
    // 2: bits[000] := 1
    // 3: <end of program>
    //
    // 5 < 10 holds, so the jump is not taken and the coil is set.
    let mut t = ctx(ProgramBuilder::new().set_int(0, 5).if_less(0, 10, 3).set_bit(0).end());
    let report = t.cycle();
    assert_eq!(t.int(0), 5);
    assert!(t.bit(0));
    assert_eq!(report.steps, 4);
}

#[test]
fn taken_jump_past_end_is_fatal() {
    // Same program with the comparison failing: resuming at 4 leaves the program.
    let mut t = ctx(ProgramBuilder::new().set_int(0, 50).if_less(0, 10, 3).set_bit(0).end());
    assert_eq!(t.run_cycle(), Err(ExecError::PcOutOfRange { pc: 4, len: 4 }));
    assert!(!t.bit(0));
}

#[test]
fn taken_jump_skips_coil() {
    let mut t = ctx(ProgramBuilder::new().set_int(0, 50).if_less(0, 10, 2).set_bit(0).end());
    let report = t.cycle();
    assert!(!t.bit(0));
    assert_eq!(report.steps, 3);
}

// ─── Cycle behavior ──────────────────────────────────────────────────────────

#[test]
fn banks_persist_across_cycles() {
    let mut t = ctx(ProgramBuilder::new().inc(0).end());
    for _ in 0..5 {
        t.cycle();
    }
    assert_eq!(t.int(0), 5);
    assert_eq!(t.machine.pc(), 0);
}

#[test]
fn step_reports_halt_and_rewinds() {
    let program = ProgramBuilder::new().set_bit(0).end().program();
    let mut m = Machine::for_program(&program);
    assert_eq!(m.step(&program), Ok(StepOutcome::Continue));
    assert_eq!(m.pc(), 1);
    assert_eq!(m.step(&program), Ok(StepOutcome::Halted));
    assert_eq!(m.pc(), 0);
}

#[test]
fn self_jump_trips_step_limit() {
    // 0: bits[000] := 1
    // 1: jump 000+1    (resumes at itself)
    let mut t = ctx(ProgramBuilder::new().set_bit(0).jump(0).end()).with_step_limit(100);
    assert_eq!(
        t.run_cycle(),
        Err(ExecError::StepLimitExceeded { limit: 100, pc: 1 })
    );
    assert!(t.bit(0));
}

#[test]
fn straight_line_program_fits_small_limit() {
    let mut t = ctx(ProgramBuilder::new().set_bit(0).set_bit(1).end()).with_step_limit(3);
    assert_eq!(t.cycle().steps, 3);
}

#[test]
fn reset_zeroes_banks() {
    let mut t = ctx(ProgramBuilder::new().set_bit(0).set_int(0, 9).end());
    t.cycle();
    t.machine.reset();
    assert!(!t.bit(0));
    assert_eq!(t.int(0), 0);
}

#[test]
fn machine_fits_program_capacities() {
    let program = ProgramBuilder::new().end().program();
    assert!(Machine::default().fits(&program));
    assert!(!Machine::with_capacity(4, 4).fits(&program));
}

#[test]
fn undersized_relay_bank_is_fatal_not_a_panic() {
    // Validated against 128 relays, run against 8.
    let program = ProgramBuilder::new().set_bit(100).end().program();
    let mut m = Machine::default();
    m.relays = RelayBank::new(8);
    assert_eq!(
        m.run_one_cycle(&program),
        Err(ExecError::BanksTooSmall {
            relays_needed: 128,
            integers_needed: 128,
            relays: 8,
            integers: 128
        })
    );
    assert!(matches!(m.step(&program), Err(ExecError::BanksTooSmall { .. })));
    assert!(m.relays.as_slice().iter().all(|b| !b));
}

#[test]
fn default_machine_rejects_program_for_larger_banks() {
    let memory = MemoryConfig {
        relay_capacity: 256,
        ..MemoryConfig::default()
    };
    let program = Program::new(ProgramBuilder::new().set_bit(200).end().build(), &memory).unwrap();
    let mut m = Machine::default();
    assert!(matches!(
        m.run_one_cycle(&program),
        Err(ExecError::BanksTooSmall { relays_needed: 256, .. })
    ));
    assert!(Machine::for_program(&program).run_one_cycle(&program).is_ok());
}

proptest! {
    #[test]
    fn identical_inputs_give_identical_banks(a in any::<i16>(), b in any::<i16>(), bit in any::<bool>()) {
        let program = ProgramBuilder::new()
            .add(2, 0, 1)
            .mul(3, 2, 1)
            .div(4, 3, 0)
            .if_bit_set(0, 4)
            .inc(2)
            .if_greater(2, 3, 6)
            .set_bit(1)
            .end()
            .program();
        let mut m1 = Machine::for_program(&program);
        let mut m2 = Machine::for_program(&program);
        for m in [&mut m1, &mut m2] {
            let _ = m.integers.set(0, a);
            let _ = m.integers.set(1, b);
            let _ = m.relays.set(0, bit);
            m.run_one_cycle(&program).unwrap();
        }
        prop_assert_eq!(m1.integers.as_slice(), m2.integers.as_slice());
        prop_assert_eq!(m1.relays.as_slice(), m2.relays.as_slice());
    }

    #[test]
    fn increment_matches_wrapping_add(v in any::<i16>()) {
        let mut t = TestContext::new(ProgramBuilder::new().inc(0).end().program());
        t.set_int(0, v);
        t.cycle();
        prop_assert_eq!(t.int(0), v.wrapping_add(1));
    }
}
