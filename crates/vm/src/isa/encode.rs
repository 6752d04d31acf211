//! Instruction Encoder.
//!
//! The inverse of [`decode`](crate::isa::decode): typed instructions back to
//! records and record text. Jump targets are written in their stored
//! "one before the destination" form, and fields an opcode does not use are
//! written as zero.

use std::fmt::Write;

use crate::common::constants::RECORD_HEX_CHARS;
use crate::isa::instruction::{Instruction, Record};

/// Encodes a typed instruction into a record.
pub fn encode(inst: &Instruction) -> Record {
    let mut rec = Record {
        op: inst.opcode(),
        ..Record::default()
    };

    match *inst {
        Instruction::SetBit { bit } | Instruction::ClearBit { bit } => rec.name1 = bit.val(),
        Instruction::CopyBit { dst, src } => {
            rec.name1 = dst.val();
            rec.name2 = src.val();
        }
        Instruction::SetInt { dst, value } => {
            rec.name1 = dst.val();
            rec.literal = value;
        }
        Instruction::CopyInt { dst, src } => {
            rec.name1 = dst.val();
            rec.name2 = src.val();
        }
        Instruction::IncrementInt { var } => rec.name1 = var.val(),
        Instruction::Arith { dst, lhs, rhs, .. } => {
            rec.name1 = dst.val();
            rec.name2 = lhs.val();
            rec.name3 = rhs.val();
        }
        Instruction::JumpIfBitClear { bit, target } | Instruction::JumpIfBitSet { bit, target } => {
            rec.name1 = bit.val();
            rec.name3 = target.encoded();
        }
        Instruction::JumpUnlessLess {
            var,
            literal,
            target,
        } => {
            rec.name1 = var.val();
            rec.name3 = target.encoded();
            rec.literal = literal;
        }
        Instruction::JumpUnlessEqual { lhs, rhs, target }
        | Instruction::JumpUnlessGreater { lhs, rhs, target } => {
            rec.name1 = lhs.val();
            rec.name2 = rhs.val();
            rec.name3 = target.encoded();
        }
        Instruction::Jump { target } => rec.name3 = target.encoded(),
        Instruction::EndOfProgram => {}
    }
    rec
}

/// Renders a record as one line of program text (lowercase hex, no newline).
pub fn record_to_hex(rec: &Record) -> String {
    let mut out = String::with_capacity(RECORD_HEX_CHARS);
    for byte in rec.to_bytes() {
        // Writing to a String cannot fail.
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Encodes a typed instruction straight to a line of program text.
pub fn encode_line(inst: &Instruction) -> String {
    record_to_hex(&encode(inst))
}
