//! Global Interpreter Constants.
//!
//! This module defines constants shared by the loader, the disassembler, and the
//! execution engine. It includes:
//! 1. **Record Layout:** Size and field offsets of one encoded instruction.
//! 2. **File Format:** Section markers of the interpretable program text.
//! 3. **Capacities:** Default bank sizes and program length limit.
//! 4. **Timing:** The compiled cycle period this interpreter supports.

/// Number of bytes in one encoded instruction record (five 16-bit fields).
pub const RECORD_BYTES: usize = 10;

/// Number of hex characters in one instruction line (two per byte).
pub const RECORD_HEX_CHARS: usize = RECORD_BYTES * 2;

/// Byte offset of the opcode field within a record.
pub const OP_OFFSET: usize = 0;

/// Byte offset of the first operand (`name1`) within a record.
pub const NAME1_OFFSET: usize = 2;

/// Byte offset of the second operand (`name2`) within a record.
pub const NAME2_OFFSET: usize = 4;

/// Byte offset of the third operand / jump target (`name3`) within a record.
pub const NAME3_OFFSET: usize = 6;

/// Byte offset of the signed literal within a record.
pub const LITERAL_OFFSET: usize = 8;

/// Program-text line holding the first instruction record (line 1 is the header).
pub const RECORD_FIRST_LINE: usize = 2;

/// Marker token that must appear on the first line of a program file.
pub const HEADER_MARKER: &str = "$$LDcode";

/// Delimiter ending the instruction section and starting the relay symbols.
pub const BITS_MARKER: &str = "$$bits";

/// Section switch introducing integer-bank symbols.
pub const INT16S_MARKER: &str = "$$int16s";

/// Directive declaring the compiled cycle period in microseconds.
pub const CYCLE_MARKER: &str = "$$cycle";

/// Default number of relay cells.
pub const DEFAULT_RELAY_CAPACITY: usize = 128;

/// Default number of integer cells.
pub const DEFAULT_INTEGER_CAPACITY: usize = 128;

/// Default maximum number of instruction records in a program.
pub const DEFAULT_MAX_OPS: usize = 1024;

/// Cycle period, in microseconds, this interpreter build executes at.
pub const DEFAULT_CYCLE_PERIOD_US: u64 = 10_000;

/// Default bound on instructions executed in a single cycle.
///
/// Compiled ladder code only jumps forward, so a well-formed program executes
/// at most as many instructions as it has records.
pub const DEFAULT_STEP_LIMIT: u64 = 1_000_000;

/// Number of well-known GPIO pins resolved from the symbol table.
pub const GPIO_PIN_COUNT: usize = 8;

/// Symbol-name prefix marking a GPIO input contact.
pub const GPIO_INPUT_PREFIX: &str = "GPI";

/// Symbol-name prefix marking a GPIO output coil.
pub const GPIO_OUTPUT_PREFIX: &str = "GPO";
