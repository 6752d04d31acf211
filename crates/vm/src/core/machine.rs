//! Execution Context.
//!
//! [`Machine`] owns everything a cycle mutates: the relay bank, the integer
//! bank, and the program counter. It is passed by `&mut` into the cycle
//! algorithm, so two cycles can never overlap on the same banks, and tests can
//! run any number of isolated machines side by side.

use crate::common::constants::{
    DEFAULT_INTEGER_CAPACITY, DEFAULT_RELAY_CAPACITY, DEFAULT_STEP_LIMIT,
};
use crate::config::Config;
use crate::core::banks::{IntegerBank, RelayBank};
use crate::core::program::Program;

/// Banks, program counter, and per-cycle execution limits.
#[derive(Clone, Debug)]
pub struct Machine {
    /// Boolean relay cells.
    pub relays: RelayBank,
    /// Signed 16-bit integer cells.
    pub integers: IntegerBank,
    /// Program counter of the instruction about to execute.
    pub(crate) pc: usize,
    /// Maximum instructions a single cycle may execute.
    pub step_limit: u64,
    /// Log every executed instruction at trace level.
    pub trace: bool,
}

impl Default for Machine {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_RELAY_CAPACITY, DEFAULT_INTEGER_CAPACITY)
    }
}

impl Machine {
    /// Creates a machine sized and bounded by `config`, with zeroed banks.
    pub fn new(config: &Config) -> Self {
        Self {
            relays: RelayBank::new(config.memory.relay_capacity),
            integers: IntegerBank::new(config.memory.integer_capacity),
            pc: 0,
            step_limit: config.general.step_limit,
            trace: config.general.trace_instructions,
        }
    }

    /// Creates a machine with the given bank sizes and the default step bound.
    pub fn with_capacity(relays: usize, integers: usize) -> Self {
        Self {
            relays: RelayBank::new(relays),
            integers: IntegerBank::new(integers),
            pc: 0,
            step_limit: DEFAULT_STEP_LIMIT,
            trace: false,
        }
    }

    /// Creates a machine whose banks exactly fit `program`.
    pub fn for_program(program: &Program) -> Self {
        Self::with_capacity(program.relay_capacity(), program.integer_capacity())
    }

    /// Program counter of the next instruction.
    pub const fn pc(&self) -> usize {
        self.pc
    }

    /// Returns true when every address `program` was validated against exists in this machine.
    pub fn fits(&self, program: &Program) -> bool {
        program.relay_capacity() <= self.relays.capacity()
            && program.integer_capacity() <= self.integers.capacity()
    }

    /// Zeroes both banks and rewinds the program counter, as at power-up.
    pub fn reset(&mut self) {
        self.relays.clear();
        self.integers.clear();
        self.pc = 0;
    }
}
