//! Cycle Execution.
//!
//! This module implements the interpreter loop. It performs the following:
//! 1. **Fetch:** Reads the instruction at the program counter.
//! 2. **Execute:** Applies its effect to the banks with signed 16-bit wrapping semantics.
//! 3. **Sequence:** Advances the program counter, or replaces it with a jump destination.
//! 4. **Bound:** Stops a cycle that runs past the step limit and reports it as fatal.
//!
//! Jump destinations are already normalized by the decoder, so a taken jump sets
//! the program counter to the destination directly.

use tracing::{Level, enabled, trace};

use crate::common::ExecError;
use crate::core::machine::Machine;
use crate::core::program::Program;
use crate::isa::Instruction;

/// Result of executing a single instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// More instructions remain in this cycle.
    Continue,
    /// `EndOfProgram` was reached; the cycle is complete.
    Halted,
}

/// Summary of one completed cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Instructions executed, end marker included.
    pub steps: u64,
}

impl Machine {
    /// Executes the instruction at the program counter.
    ///
    /// # Errors
    ///
    /// * [`ExecError::BanksTooSmall`] when [`Machine::fits`] does not hold for `program`.
    /// * [`ExecError::PcOutOfRange`] when the program counter is outside `program`.
    #[inline]
    pub fn step(&mut self, program: &Program) -> Result<StepOutcome, ExecError> {
        self.check_fits(program)?;
        self.execute(program)
    }

    fn check_fits(&self, program: &Program) -> Result<(), ExecError> {
        if self.fits(program) {
            Ok(())
        } else {
            Err(ExecError::BanksTooSmall {
                relays_needed: program.relay_capacity(),
                integers_needed: program.integer_capacity(),
                relays: self.relays.capacity(),
                integers: self.integers.capacity(),
            })
        }
    }

    /// Executes one instruction of a program already known to fit.
    fn execute(&mut self, program: &Program) -> Result<StepOutcome, ExecError> {
        let pc = self.pc;
        let inst = *program.get(pc).ok_or(ExecError::PcOutOfRange {
            pc,
            len: program.len(),
        })?;

        if (self.trace || cfg!(feature = "always-trace"))
            && enabled!(target: "ldvm::exec", Level::TRACE)
        {
            trace!(target: "ldvm::exec", "{pc:03x}: {inst}");
        }

        let mut next = pc + 1;
        match inst {
            Instruction::SetBit { bit } => self.relays.write(bit, true),
            Instruction::ClearBit { bit } => self.relays.write(bit, false),
            Instruction::CopyBit { dst, src } => {
                let val = self.relays.read(src);
                self.relays.write(dst, val);
            }
            Instruction::SetInt { dst, value } => self.integers.write(dst, value),
            Instruction::CopyInt { dst, src } => {
                let val = self.integers.read(src);
                self.integers.write(dst, val);
            }
            Instruction::IncrementInt { var } => {
                let val = self.integers.read(var).wrapping_add(1);
                self.integers.write(var, val);
            }
            Instruction::Arith { op, dst, lhs, rhs } => {
                let a = self.integers.read(lhs);
                let b = self.integers.read(rhs);
                // Division by zero leaves the destination untouched.
                if let Some(val) = op.apply(a, b) {
                    self.integers.write(dst, val);
                }
            }
            Instruction::JumpIfBitClear { bit, target } => {
                if !self.relays.read(bit) {
                    next = target.dest();
                }
            }
            Instruction::JumpIfBitSet { bit, target } => {
                if self.relays.read(bit) {
                    next = target.dest();
                }
            }
            Instruction::JumpUnlessLess {
                var,
                literal,
                target,
            } => {
                if self.integers.read(var) >= literal {
                    next = target.dest();
                }
            }
            Instruction::JumpUnlessEqual { lhs, rhs, target } => {
                if self.integers.read(lhs) != self.integers.read(rhs) {
                    next = target.dest();
                }
            }
            Instruction::JumpUnlessGreater { lhs, rhs, target } => {
                if self.integers.read(lhs) <= self.integers.read(rhs) {
                    next = target.dest();
                }
            }
            Instruction::Jump { target } => next = target.dest(),
            Instruction::EndOfProgram => {
                self.pc = 0;
                return Ok(StepOutcome::Halted);
            }
        }

        self.pc = next;
        Ok(StepOutcome::Continue)
    }

    /// Executes `program` from the first instruction to `EndOfProgram`, once.
    ///
    /// The banks are mutated in place and keep their contents for the next
    /// cycle. The program counter is rewound to zero on entry and on completion.
    ///
    /// # Errors
    ///
    /// * [`ExecError::StepLimitExceeded`] when the cycle executes more than
    ///   [`Machine::step_limit`] instructions, e.g. a program jumping to itself.
    /// * [`ExecError::PcOutOfRange`] when control leaves the program.
    /// * [`ExecError::BanksTooSmall`] when [`Machine::fits`] does not hold for
    ///   `program`; nothing is executed.
    ///
    /// A failed cycle leaves the banks in whatever state the failing instruction
    /// reached; callers must stop driving outputs from them.
    pub fn run_one_cycle(&mut self, program: &Program) -> Result<CycleReport, ExecError> {
        self.check_fits(program)?;
        self.pc = 0;
        let mut steps = 0u64;
        loop {
            if steps >= self.step_limit {
                return Err(ExecError::StepLimitExceeded {
                    limit: self.step_limit,
                    pc: self.pc,
                });
            }
            steps += 1;
            if self.execute(program)? == StepOutcome::Halted {
                return Ok(CycleReport { steps });
            }
        }
    }
}
