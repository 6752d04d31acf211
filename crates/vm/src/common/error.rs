//! Load, execution, and configuration error definitions.
//!
//! This module defines the two-tier error model of the interpreter. It provides:
//! 1. **Load Errors:** Every structural problem found while reading a program file.
//!    Loading is all-or-nothing, so any of these means no program exists.
//! 2. **Execution Errors:** The fatal conditions a cycle can end in. Division by zero
//!    is not one of them; it is a defined no-op.
//! 3. **Configuration Errors:** Problems reading or parsing a JSON configuration file.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::addr::Bank;

/// Errors raised while loading an interpretable program.
///
/// Line numbers are 1-based and refer to the program text.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The program file could not be read.
    #[error("couldn't open '{}': {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The program text is empty.
    #[error("bad program format: empty file")]
    Empty,

    /// The first line does not carry the `$$LDcode` marker.
    #[error("bad program format: line 1: missing header marker in {text:?}")]
    MissingHeader {
        /// Offending line.
        text: String,
    },

    /// The text ended before the `$$bits` delimiter.
    #[error("bad program format: line {line}: end of file before symbol section")]
    MissingSymbolSection {
        /// Line number just past the end of the text.
        line: usize,
    },

    /// An instruction line contains a character that is not a hex digit.
    #[error("bad program format: line {line}: bad hex digit {ch:?}")]
    BadHexDigit {
        /// Offending line.
        line: usize,
        /// The offending character.
        ch: char,
    },

    /// An instruction line does not have the fixed record width.
    #[error("bad program format: line {line}: record is {len} hex characters, expected {expected}")]
    RecordLength {
        /// Offending line.
        line: usize,
        /// Actual length.
        len: usize,
        /// Required length.
        expected: usize,
    },

    /// The program has more records than the program store holds.
    #[error("bad program format: line {line}: program exceeds {max} instructions")]
    ProgramTooLarge {
        /// Line of the first record that does not fit.
        line: usize,
        /// Program store capacity.
        max: usize,
    },

    /// A record carries an opcode this instruction set does not define.
    #[error("bad program format: line {line}: unknown opcode {opcode}")]
    UnknownOpcode {
        /// Offending line.
        line: usize,
        /// The raw opcode value.
        opcode: u16,
    },

    /// A record carries a peripheral opcode this interpreter cannot execute.
    #[error("bad program format: line {line}: opcode {opcode} ({name}) is not supported by the interpreter")]
    UnsupportedOpcode {
        /// Offending line.
        line: usize,
        /// The raw opcode value.
        opcode: u16,
        /// Compiler name of the operation.
        name: &'static str,
    },

    /// An operand or symbol refers to a cell outside its bank.
    #[error("bad program format: line {line}: {bank} address {addr} out of range (capacity {capacity})")]
    AddressOutOfRange {
        /// Offending line.
        line: usize,
        /// Bank the address indexes.
        bank: Bank,
        /// The address.
        addr: u32,
        /// Bank capacity.
        capacity: usize,
    },

    /// A stored jump target does not name an instruction of the program.
    #[error("bad program format: line {line}: jump target {target:03x} outside program of {len} instructions")]
    JumpOutOfRange {
        /// Line of the jumping instruction.
        line: usize,
        /// Stored (encoded) target.
        target: u16,
        /// Program length.
        len: usize,
    },

    /// The last record is not the end-of-program marker.
    #[error("bad program format: line {line}: program does not end with <end of program>")]
    MissingEndOfProgram {
        /// Line of the last record (or of the delimiter for an empty program).
        line: usize,
    },

    /// A symbol line is not `name,address`.
    #[error("bad program format: line {line}: malformed symbol {text:?}")]
    MalformedSymbol {
        /// Offending line.
        line: usize,
        /// Offending text.
        text: String,
    },

    /// The `$$cycle` directive could not be parsed.
    #[error("bad program format: line {line}: malformed cycle directive {text:?}")]
    MalformedCycle {
        /// Offending line.
        line: usize,
        /// Offending text.
        text: String,
    },

    /// The program was compiled for a different cycle period.
    #[error(
        "cycle time was {declared_us} us when compiled, interpreter runs at {expected_us} us; please fix that"
    )]
    CycleMismatch {
        /// Period declared by the program file.
        declared_us: u64,
        /// Period this interpreter is configured for.
        expected_us: u64,
    },
}

/// Fatal conditions that end a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecError {
    /// The cycle executed more instructions than the configured bound.
    #[error("cycle exceeded {limit} instructions without reaching <end of program> (pc={pc:03x})")]
    StepLimitExceeded {
        /// The configured bound.
        limit: u64,
        /// Program counter when the bound tripped.
        pc: usize,
    },

    /// The program counter left the program store.
    #[error("program counter {pc:03x} outside program of {len} instructions")]
    PcOutOfRange {
        /// The offending program counter.
        pc: usize,
        /// Program length.
        len: usize,
    },

    /// The machine's banks are smaller than the capacities the program was validated against.
    #[error(
        "banks too small for program: needs {relays_needed} relays and {integers_needed} integers, \
         machine has {relays} and {integers}"
    )]
    BanksTooSmall {
        /// Relay capacity the program was validated against.
        relays_needed: usize,
        /// Integer capacity the program was validated against.
        integers_needed: usize,
        /// Relay cells in the machine.
        relays: usize,
        /// Integer cells in the machine.
        integers: usize,
    },
}

/// Errors raised while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("couldn't read config '{}': {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration is not valid JSON for [`Config`](crate::config::Config).
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is structurally valid but unusable.
    #[error("invalid config: {0}")]
    Invalid(String),
}
