//! Program validation tests. Error lines count the header as line 1.

use ldvm_core::common::{Bank, LoadError};
use ldvm_core::config::MemoryConfig;
use ldvm_core::core::Program;
use ldvm_core::isa::Instruction;

use crate::common::builder::ProgramBuilder;

fn small() -> MemoryConfig {
    MemoryConfig {
        relay_capacity: 8,
        integer_capacity: 4,
        max_ops: 4,
    }
}

#[test]
fn valid_program_keeps_capacities() {
    let program = Program::new(ProgramBuilder::new().set_bit(7).end().build(), &small()).unwrap();
    assert_eq!(program.len(), 2);
    assert!(!program.is_empty());
    assert_eq!(program.relay_capacity(), 8);
    assert_eq!(program.integer_capacity(), 4);
    assert_eq!(program[1], Instruction::EndOfProgram);
    assert_eq!(program.get(2), None);
}

#[test]
fn empty_program_has_no_end() {
    let err = Program::new(Vec::new(), &small()).unwrap_err();
    assert!(matches!(err, LoadError::MissingEndOfProgram { line: 2 }));
}

#[test]
fn last_instruction_must_be_end() {
    let err = Program::new(ProgramBuilder::new().end().set_bit(0).build(), &small()).unwrap_err();
    assert!(matches!(err, LoadError::MissingEndOfProgram { line: 3 }));
}

#[test]
fn too_many_instructions() {
    let insts = ProgramBuilder::new()
        .set_bit(0)
        .set_bit(0)
        .set_bit(0)
        .set_bit(0)
        .end()
        .build();
    let err = Program::new(insts, &small()).unwrap_err();
    assert!(matches!(err, LoadError::ProgramTooLarge { line: 6, max: 4 }));
}

#[test]
fn relay_operand_out_of_range() {
    let err = Program::new(ProgramBuilder::new().copy_bit(0, 8).end().build(), &small()).unwrap_err();
    assert!(matches!(
        err,
        LoadError::AddressOutOfRange {
            line: 2,
            bank: Bank::Relay,
            addr: 8,
            capacity: 8
        }
    ));
}

#[test]
fn integer_operand_out_of_range() {
    let insts = ProgramBuilder::new().set_int(0, 1).add(0, 1, 4).end().build();
    let err = Program::new(insts, &small()).unwrap_err();
    assert!(matches!(
        err,
        LoadError::AddressOutOfRange {
            line: 3,
            bank: Bank::Integer,
            addr: 4,
            ..
        }
    ));
}

#[test]
fn stored_jump_target_must_name_an_instruction() {
    // Stored 2 names the end marker; a taken jump would resume at 3.
    assert!(Program::new(ProgramBuilder::new().jump(2).set_bit(0).end().build(), &small()).is_ok());

    let err = Program::new(ProgramBuilder::new().jump(3).set_bit(0).end().build(), &small())
        .unwrap_err();
    assert!(matches!(
        err,
        LoadError::JumpOutOfRange {
            line: 2,
            target: 3,
            len: 3
        }
    ));
}
