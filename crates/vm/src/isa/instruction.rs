//! Instruction record layout and typed instructions.
//!
//! Provides the fixed-width [`Record`] that program files carry, and the
//! [`Instruction`] enum the execution engine runs. A record reuses its
//! positional fields for different meanings per opcode (`name3` is a third
//! arithmetic operand for some opcodes and a jump target for others); the enum
//! gives every opcode its own named fields instead.

use std::fmt;

use crate::common::constants::{
    LITERAL_OFFSET, NAME1_OFFSET, NAME2_OFFSET, NAME3_OFFSET, OP_OFFSET, RECORD_BYTES,
};
use crate::common::{BitAddr, IntAddr, JumpTarget};
use crate::isa::opcodes;

/// One encoded instruction, exactly as stored in a program file.
///
/// Five 16-bit little-endian fields: `op`, `name1`, `name2`, `name3`, `literal`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Record {
    /// Opcode.
    pub op: u16,
    /// First operand address.
    pub name1: u16,
    /// Second operand address.
    pub name2: u16,
    /// Third operand address or stored jump target.
    pub name3: u16,
    /// Signed literal.
    pub literal: i16,
}

impl Record {
    /// Unpacks a record from its 10-byte little-endian form.
    pub fn from_bytes(b: &[u8; RECORD_BYTES]) -> Self {
        let field = |at: usize| u16::from_le_bytes([b[at], b[at + 1]]);
        Self {
            op: field(OP_OFFSET),
            name1: field(NAME1_OFFSET),
            name2: field(NAME2_OFFSET),
            name3: field(NAME3_OFFSET),
            literal: i16::from_le_bytes([b[LITERAL_OFFSET], b[LITERAL_OFFSET + 1]]),
        }
    }

    /// Packs the record into its 10-byte little-endian form.
    pub fn to_bytes(&self) -> [u8; RECORD_BYTES] {
        let mut out = [0u8; RECORD_BYTES];
        out[OP_OFFSET..OP_OFFSET + 2].copy_from_slice(&self.op.to_le_bytes());
        out[NAME1_OFFSET..NAME1_OFFSET + 2].copy_from_slice(&self.name1.to_le_bytes());
        out[NAME2_OFFSET..NAME2_OFFSET + 2].copy_from_slice(&self.name2.to_le_bytes());
        out[NAME3_OFFSET..NAME3_OFFSET + 2].copy_from_slice(&self.name3.to_le_bytes());
        out[LITERAL_OFFSET..LITERAL_OFFSET + 2].copy_from_slice(&self.literal.to_le_bytes());
        out
    }
}

/// Three-operand integer arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArithOp {
    /// Wrapping addition.
    Add,
    /// Wrapping subtraction.
    Sub,
    /// Wrapping multiplication.
    Mul,
    /// Truncating division; no result for a zero divisor.
    Div,
}

impl ArithOp {
    /// Applies the operation with native signed 16-bit semantics.
    ///
    /// Returns `None` only for division by zero, in which case the
    /// destination must be left untouched.
    #[inline(always)]
    pub const fn apply(self, lhs: i16, rhs: i16) -> Option<i16> {
        match self {
            Self::Add => Some(lhs.wrapping_add(rhs)),
            Self::Sub => Some(lhs.wrapping_sub(rhs)),
            Self::Mul => Some(lhs.wrapping_mul(rhs)),
            Self::Div => {
                if rhs == 0 {
                    None
                } else {
                    Some(lhs.wrapping_div(rhs))
                }
            }
        }
    }

    /// Operator character used in listings.
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    /// Record opcode for this operation.
    pub const fn opcode(self) -> u16 {
        match self {
            Self::Add => opcodes::SET_VARIABLE_ADD,
            Self::Sub => opcodes::SET_VARIABLE_SUBTRACT,
            Self::Mul => opcodes::SET_VARIABLE_MULTIPLY,
            Self::Div => opcodes::SET_VARIABLE_DIVIDE,
        }
    }
}

/// A decoded instruction.
///
/// Conditional jumps follow the compiler's "unless" convention: each jumps
/// when its test is false and falls through when it is true. The variant names
/// say when the jump is taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `bits[bit] := 1`
    SetBit {
        /// Relay to set.
        bit: BitAddr,
    },
    /// `bits[bit] := 0`
    ClearBit {
        /// Relay to clear.
        bit: BitAddr,
    },
    /// `bits[dst] := bits[src]`
    CopyBit {
        /// Destination relay.
        dst: BitAddr,
        /// Source relay.
        src: BitAddr,
    },
    /// `int16s[dst] := value`
    SetInt {
        /// Destination variable.
        dst: IntAddr,
        /// Value to store.
        value: i16,
    },
    /// `int16s[dst] := int16s[src]`
    CopyInt {
        /// Destination variable.
        dst: IntAddr,
        /// Source variable.
        src: IntAddr,
    },
    /// `int16s[var]++`, wrapping.
    IncrementInt {
        /// Variable to increment.
        var: IntAddr,
    },
    /// `int16s[dst] := int16s[lhs] op int16s[rhs]`
    Arith {
        /// Operation.
        op: ArithOp,
        /// Destination variable.
        dst: IntAddr,
        /// Left operand.
        lhs: IntAddr,
        /// Right operand (divisor for `Div`).
        rhs: IntAddr,
    },
    /// Jumps when `bits[bit]` is clear. Compiler name: `IF_BIT_SET`.
    JumpIfBitClear {
        /// Relay tested.
        bit: BitAddr,
        /// Where execution resumes when the jump is taken.
        target: JumpTarget,
    },
    /// Jumps when `bits[bit]` is set. Compiler name: `IF_BIT_CLEAR`.
    JumpIfBitSet {
        /// Relay tested.
        bit: BitAddr,
        /// Where execution resumes when the jump is taken.
        target: JumpTarget,
    },
    /// Jumps unless `int16s[var] < literal`. Compiler name: `IF_VARIABLE_LES_LITERAL`.
    JumpUnlessLess {
        /// Variable tested.
        var: IntAddr,
        /// Comparison literal.
        literal: i16,
        /// Where execution resumes when the jump is taken.
        target: JumpTarget,
    },
    /// Jumps unless `int16s[lhs] == int16s[rhs]`. Compiler name: `IF_VARIABLE_EQUALS_VARIABLE`.
    JumpUnlessEqual {
        /// Left variable.
        lhs: IntAddr,
        /// Right variable.
        rhs: IntAddr,
        /// Where execution resumes when the jump is taken.
        target: JumpTarget,
    },
    /// Jumps unless `int16s[lhs] > int16s[rhs]`. Compiler name: `IF_VARIABLE_GRT_VARIABLE`.
    JumpUnlessGreater {
        /// Left variable.
        lhs: IntAddr,
        /// Right variable.
        rhs: IntAddr,
        /// Where execution resumes when the jump is taken.
        target: JumpTarget,
    },
    /// Unconditional jump. Compiler name: `ELSE`.
    Jump {
        /// Where execution resumes.
        target: JumpTarget,
    },
    /// Ends the cycle.
    EndOfProgram,
}

impl Instruction {
    /// Returns the record opcode of this instruction.
    pub const fn opcode(&self) -> u16 {
        match self {
            Self::SetBit { .. } => opcodes::SET_BIT,
            Self::ClearBit { .. } => opcodes::CLEAR_BIT,
            Self::CopyBit { .. } => opcodes::COPY_BIT_TO_BIT,
            Self::SetInt { .. } => opcodes::SET_VARIABLE_TO_LITERAL,
            Self::CopyInt { .. } => opcodes::SET_VARIABLE_TO_VARIABLE,
            Self::IncrementInt { .. } => opcodes::INCREMENT_VARIABLE,
            Self::Arith { op, .. } => op.opcode(),
            Self::JumpIfBitClear { .. } => opcodes::IF_BIT_SET,
            Self::JumpIfBitSet { .. } => opcodes::IF_BIT_CLEAR,
            Self::JumpUnlessLess { .. } => opcodes::IF_VARIABLE_LES_LITERAL,
            Self::JumpUnlessEqual { .. } => opcodes::IF_VARIABLE_EQUALS_VARIABLE,
            Self::JumpUnlessGreater { .. } => opcodes::IF_VARIABLE_GRT_VARIABLE,
            Self::Jump { .. } => opcodes::ELSE,
            Self::EndOfProgram => opcodes::END_OF_PROGRAM,
        }
    }

    /// Returns the jump target, if this instruction can transfer control.
    pub const fn jump_target(&self) -> Option<JumpTarget> {
        match *self {
            Self::JumpIfBitClear { target, .. }
            | Self::JumpIfBitSet { target, .. }
            | Self::JumpUnlessLess { target, .. }
            | Self::JumpUnlessEqual { target, .. }
            | Self::JumpUnlessGreater { target, .. }
            | Self::Jump { target } => Some(target),
            _ => None,
        }
    }

    /// Returns the relay addresses this instruction reads or writes.
    pub const fn bit_operands(&self) -> [Option<BitAddr>; 2] {
        match *self {
            Self::SetBit { bit }
            | Self::ClearBit { bit }
            | Self::JumpIfBitClear { bit, .. }
            | Self::JumpIfBitSet { bit, .. } => [Some(bit), None],
            Self::CopyBit { dst, src } => [Some(dst), Some(src)],
            _ => [None, None],
        }
    }

    /// Returns the integer addresses this instruction reads or writes.
    pub const fn int_operands(&self) -> [Option<IntAddr>; 3] {
        match *self {
            Self::SetInt { dst, .. } => [Some(dst), None, None],
            Self::IncrementInt { var } | Self::JumpUnlessLess { var, .. } => [Some(var), None, None],
            Self::CopyInt { dst, src } => [Some(dst), Some(src), None],
            Self::Arith { dst, lhs, rhs, .. } => [Some(dst), Some(lhs), Some(rhs)],
            Self::JumpUnlessEqual { lhs, rhs, .. } | Self::JumpUnlessGreater { lhs, rhs, .. } => {
                [Some(lhs), Some(rhs), None]
            }
            _ => [None, None, None],
        }
    }

    /// Returns true for the end-of-cycle marker.
    pub const fn is_end(&self) -> bool {
        matches!(self, Self::EndOfProgram)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::isa::disasm::disassemble(self))
    }
}
