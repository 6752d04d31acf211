//! Instruction Set Definitions.
//!
//! Contains the opcode values emitted by the LDmicro compiler, the typed
//! instruction model, and the conversions between the two.
//!
//! # Layers
//!
//! * `opcodes`: Raw opcode numbers as they appear in program records.
//! * `instruction`: The fixed-width `Record` and the typed `Instruction` enum.
//! * `decode`: Hex text to `Record`, `Record` to `Instruction` (jump targets normalized).
//! * `encode`: The inverse of `decode`.
//! * `disasm`: Human-readable listing in the compiler's mnemonic conventions.

/// Instruction decoding from hex records.
pub mod decode;

/// Instruction disassembler for diagnostics.
pub mod disasm;

/// Instruction encoding back to hex records.
pub mod encode;

/// Record layout and typed instruction definitions.
pub mod instruction;

/// Opcode numbers of the interpretable instruction set.
pub mod opcodes;

pub use instruction::{ArithOp, Instruction, Record};
