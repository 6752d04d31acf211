//! Common utilities and types used throughout the ladder-logic interpreter.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the interpreter. It includes:
//! 1. **Address Types:** Strong types for relay addresses, integer addresses, and jump targets.
//! 2. **Constants:** Record layout, section markers, and default capacities.
//! 3. **Error Handling:** Load-time and execution-time error types.

/// Address type definitions (relay, integer, and program addresses).
pub mod addr;

/// Common constants used throughout the interpreter.
pub mod constants;

/// Error types for loading and execution.
pub mod error;

pub use addr::{Bank, BitAddr, IntAddr, JumpTarget};
pub use error::{ConfigError, ExecError, LoadError};
