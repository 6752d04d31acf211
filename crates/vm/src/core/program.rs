//! Validated Program Store.
//!
//! A [`Program`] is an immutable instruction sequence that has passed every
//! load-time check, so the engine never has to bounds-check an operand:
//! 1. **Length:** at most `max_ops` instructions, ending with `EndOfProgram`.
//! 2. **Addresses:** every relay and integer operand lies inside its bank.
//! 3. **Jumps:** every stored jump target names a position inside the program.

use std::ops::Index;

use crate::common::constants::RECORD_FIRST_LINE;
use crate::common::{Bank, LoadError};
use crate::config::MemoryConfig;
use crate::isa::Instruction;

/// Program-text line on which the record for `pc` appears.
pub(crate) const fn record_line(pc: usize) -> usize {
    pc + RECORD_FIRST_LINE
}

/// An immutable, validated instruction sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
    relay_capacity: usize,
    integer_capacity: usize,
}

impl Program {
    /// Validates `instructions` against the bank and store sizes in `memory`.
    ///
    /// Errors carry the program-text line the offending record would sit on
    /// (line 1 is the header, the first record is on line 2).
    ///
    /// # Errors
    ///
    /// * [`LoadError::ProgramTooLarge`] when there are more than `memory.max_ops` instructions.
    /// * [`LoadError::MissingEndOfProgram`] when the last instruction is not `EndOfProgram`.
    /// * [`LoadError::AddressOutOfRange`] for any operand outside its bank.
    /// * [`LoadError::JumpOutOfRange`] for any stored jump target outside the program.
    ///   A target naming the last instruction is accepted; taking it runs off the end
    ///   and fails at execution time with [`crate::common::ExecError::PcOutOfRange`].
    pub fn new(instructions: Vec<Instruction>, memory: &MemoryConfig) -> Result<Self, LoadError> {
        let len = instructions.len();
        if len > memory.max_ops {
            return Err(LoadError::ProgramTooLarge {
                line: record_line(memory.max_ops),
                max: memory.max_ops,
            });
        }
        if !instructions.last().is_some_and(Instruction::is_end) {
            return Err(LoadError::MissingEndOfProgram {
                line: record_line(len.saturating_sub(1)),
            });
        }

        for (pc, inst) in instructions.iter().enumerate() {
            let line = record_line(pc);
            for bit in inst.bit_operands().into_iter().flatten() {
                if bit.index() >= memory.relay_capacity {
                    return Err(LoadError::AddressOutOfRange {
                        line,
                        bank: Bank::Relay,
                        addr: u32::from(bit.val()),
                        capacity: memory.relay_capacity,
                    });
                }
            }
            for var in inst.int_operands().into_iter().flatten() {
                if var.index() >= memory.integer_capacity {
                    return Err(LoadError::AddressOutOfRange {
                        line,
                        bank: Bank::Integer,
                        addr: u32::from(var.val()),
                        capacity: memory.integer_capacity,
                    });
                }
            }
            if let Some(target) = inst.jump_target()
                && usize::from(target.encoded()) >= len
            {
                return Err(LoadError::JumpOutOfRange {
                    line,
                    target: target.encoded(),
                    len,
                });
            }
        }

        Ok(Self {
            instructions,
            relay_capacity: memory.relay_capacity,
            integer_capacity: memory.integer_capacity,
        })
    }

    /// Number of instructions, end marker included.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Always false: a valid program holds at least its end marker.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instruction at `pc`, or `None` past the end.
    #[inline(always)]
    pub fn get(&self, pc: usize) -> Option<&Instruction> {
        self.instructions.get(pc)
    }

    /// All instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Relay bank size the program was validated against.
    pub const fn relay_capacity(&self) -> usize {
        self.relay_capacity
    }

    /// Integer bank size the program was validated against.
    pub const fn integer_capacity(&self) -> usize {
        self.integer_capacity
    }
}

impl Index<usize> for Program {
    type Output = Instruction;

    fn index(&self, pc: usize) -> &Instruction {
        &self.instructions[pc]
    }
}
