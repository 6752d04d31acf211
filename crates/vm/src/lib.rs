//! LDmicro ladder-logic bytecode interpreter library.
//!
//! This crate loads and runs the interpretable programs the LDmicro compiler emits:
//! 1. **ISA:** Fixed-width hex records, the typed instruction set, encoder and disassembler.
//! 2. **Core:** Relay and integer banks, the validated program store, and the cycle interpreter.
//! 3. **Simulation:** Program loader and writer, symbol table, I/O bindings, and the cycle driver.
//! 4. **Support:** Configuration, error types, and cycle statistics.

/// Common types and constants (addresses, record layout, errors).
pub mod common;
/// Interpreter configuration (defaults, JSON loading, validation).
pub mod config;
/// Execution core (banks, program store, machine, cycle algorithm).
pub mod core;
/// Instruction set (opcodes, records, decode, encode, disassembly).
pub mod isa;
/// Program loading, symbols, I/O bindings, and the cycle driver.
pub mod sim;
/// Cycle statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or load it from JSON.
pub use crate::config::Config;
/// Execution context owning both banks and the program counter.
pub use crate::core::Machine;
/// Validated program store.
pub use crate::core::Program;
/// Loaded program with its symbols and cycle period.
pub use crate::sim::ProgramImage;
