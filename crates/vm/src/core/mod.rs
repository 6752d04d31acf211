//! Execution core.
//!
//! This module contains the interpreter proper: the two memory banks, the
//! validated program store, the execution context that owns banks and program
//! counter, and the single-pass cycle algorithm.

/// Relay and integer memory banks.
pub mod banks;

/// Cycle execution (`step`, `run_one_cycle`).
pub mod execution;

/// Execution context owning the banks and program counter.
pub mod machine;

/// Validated, immutable program store.
pub mod program;

pub use self::banks::{IntegerBank, RelayBank};
pub use self::execution::{CycleReport, StepOutcome};
pub use self::machine::Machine;
pub use self::program::Program;
