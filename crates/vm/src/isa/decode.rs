//! Instruction Decoder.
//!
//! This module turns one line of program text into a typed [`Instruction`]. It performs:
//! 1. **Hex decoding:** Twenty hex characters into ten record bytes.
//! 2. **Field extraction:** Record bytes into the five little-endian fields.
//! 3. **Typing:** Fields into an `Instruction`, adding one to every stored jump
//!    target so the engine can jump straight to the destination.
//!
//! Address operands are not range-checked here; that needs the bank capacities
//! and happens in the loader.

use thiserror::Error;

use crate::common::constants::{RECORD_BYTES, RECORD_HEX_CHARS};
use crate::common::{BitAddr, IntAddr, JumpTarget};
use crate::isa::instruction::{ArithOp, Instruction, Record};
use crate::isa::opcodes;

/// Reasons a single record cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A character outside `[0-9a-fA-F]`.
    #[error("bad hex digit {0:?}")]
    BadHexDigit(char),
    /// The line is not exactly one record wide.
    #[error("record is {0} hex characters")]
    RecordLength(usize),
    /// The opcode is not part of the instruction set.
    #[error("unknown opcode {0}")]
    UnknownOpcode(u16),
    /// The opcode drives a peripheral the interpreter does not have.
    #[error("unsupported opcode {0} ({1})")]
    UnsupportedOpcode(u16, &'static str),
}

/// Value of a single hex digit, either case.
#[inline]
fn hex_digit(c: u8) -> Result<u8, DecodeError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(DecodeError::BadHexDigit(char::from(c))),
    }
}

/// Decodes one instruction line into its record bytes.
///
/// # Arguments
///
/// * `line` - The record text with surrounding whitespace already stripped.
///
/// # Errors
///
/// [`DecodeError::BadHexDigit`] for the first non-hex character, or
/// [`DecodeError::RecordLength`] when the line is not exactly twenty characters.
pub fn parse_hex(line: &str) -> Result<[u8; RECORD_BYTES], DecodeError> {
    if let Some(bad) = line.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(DecodeError::BadHexDigit(bad));
    }
    // All-ASCII from here, so bytes and characters agree.
    let text = line.as_bytes();
    if text.len() != RECORD_HEX_CHARS {
        return Err(DecodeError::RecordLength(text.len()));
    }

    let mut bytes = [0u8; RECORD_BYTES];
    for (byte, pair) in bytes.iter_mut().zip(text.chunks_exact(2)) {
        *byte = (hex_digit(pair[0])? << 4) | hex_digit(pair[1])?;
    }
    Ok(bytes)
}

/// Decodes a record into a typed instruction.
///
/// Fields an opcode does not use are ignored.
///
/// # Errors
///
/// [`DecodeError::UnsupportedOpcode`] for peripheral opcodes, and
/// [`DecodeError::UnknownOpcode`] for anything else outside the instruction set.
pub fn decode(rec: &Record) -> Result<Instruction, DecodeError> {
    let bit1 = BitAddr(rec.name1);
    let bit2 = BitAddr(rec.name2);
    let int1 = IntAddr(rec.name1);
    let int2 = IntAddr(rec.name2);
    let int3 = IntAddr(rec.name3);
    let target = JumpTarget::from_encoded(rec.name3);

    let arith = |op| Instruction::Arith {
        op,
        dst: int1,
        lhs: int2,
        rhs: int3,
    };

    let inst = match rec.op {
        opcodes::SET_BIT => Instruction::SetBit { bit: bit1 },
        opcodes::CLEAR_BIT => Instruction::ClearBit { bit: bit1 },
        opcodes::COPY_BIT_TO_BIT => Instruction::CopyBit {
            dst: bit1,
            src: bit2,
        },
        opcodes::SET_VARIABLE_TO_LITERAL => Instruction::SetInt {
            dst: int1,
            value: rec.literal,
        },
        opcodes::SET_VARIABLE_TO_VARIABLE => Instruction::CopyInt {
            dst: int1,
            src: int2,
        },
        opcodes::INCREMENT_VARIABLE => Instruction::IncrementInt { var: int1 },
        opcodes::SET_VARIABLE_ADD => arith(ArithOp::Add),
        opcodes::SET_VARIABLE_SUBTRACT => arith(ArithOp::Sub),
        opcodes::SET_VARIABLE_MULTIPLY => arith(ArithOp::Mul),
        opcodes::SET_VARIABLE_DIVIDE => arith(ArithOp::Div),
        opcodes::IF_BIT_SET => Instruction::JumpIfBitClear { bit: bit1, target },
        opcodes::IF_BIT_CLEAR => Instruction::JumpIfBitSet { bit: bit1, target },
        opcodes::IF_VARIABLE_LES_LITERAL => Instruction::JumpUnlessLess {
            var: int1,
            literal: rec.literal,
            target,
        },
        opcodes::IF_VARIABLE_EQUALS_VARIABLE => Instruction::JumpUnlessEqual {
            lhs: int1,
            rhs: int2,
            target,
        },
        opcodes::IF_VARIABLE_GRT_VARIABLE => Instruction::JumpUnlessGreater {
            lhs: int1,
            rhs: int2,
            target,
        },
        opcodes::ELSE => Instruction::Jump { target },
        opcodes::END_OF_PROGRAM => Instruction::EndOfProgram,
        op => {
            return Err(opcodes::peripheral_name(op).map_or(
                DecodeError::UnknownOpcode(op),
                |name| DecodeError::UnsupportedOpcode(op, name),
            ));
        }
    };
    Ok(inst)
}

/// Decodes one instruction line straight to a typed instruction.
///
/// # Errors
///
/// Any error of [`parse_hex`] or [`decode`].
pub fn decode_line(line: &str) -> Result<Instruction, DecodeError> {
    let bytes = parse_hex(line)?;
    decode(&Record::from_bytes(&bytes))
}
