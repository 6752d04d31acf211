//! Program Writer.
//!
//! Renders instructions and symbols back into the text format [`crate::sim::loader`]
//! reads. Used to produce program files from Rust and to round-trip loaded images.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::common::constants::{BITS_MARKER, CYCLE_MARKER, HEADER_MARKER, INT16S_MARKER};
use crate::common::{Bank, LoadError};
use crate::isa::Instruction;
use crate::isa::encode::encode_line;
use crate::sim::image::ProgramImage;
use crate::sim::symbols::SymbolTable;

/// Renders a program file.
///
/// Relay symbols are written before the `$$int16s` switch and integer symbols
/// after it, each group in table order. The switch is omitted when there are
/// no integer symbols. `cycle_us`, when given, is written as a trailing
/// `$$cycle` directive.
pub fn render(
    instructions: &[Instruction],
    symbols: &SymbolTable,
    cycle_us: Option<u64>,
) -> String {
    let mut out = String::new();
    out.push_str(HEADER_MARKER);
    out.push('\n');
    for inst in instructions {
        out.push_str(&encode_line(inst));
        out.push('\n');
    }
    out.push_str(BITS_MARKER);
    out.push('\n');

    for sym in symbols.iter().filter(|s| s.bank == Bank::Relay) {
        let _ = writeln!(out, "{},{}", sym.name, sym.addr);
    }
    let mut ints = symbols.iter().filter(|s| s.bank == Bank::Integer).peekable();
    if ints.peek().is_some() {
        out.push_str(INT16S_MARKER);
        out.push('\n');
        for sym in ints {
            let _ = writeln!(out, "{},{}", sym.name, sym.addr);
        }
    }

    if let Some(us) = cycle_us {
        let _ = writeln!(out, "{CYCLE_MARKER} {us} us");
    }
    out
}

/// Renders a loaded image, declaring its cycle period.
pub fn render_image(image: &ProgramImage) -> String {
    render(
        image.program().instructions(),
        image.symbols(),
        Some(image.cycle_period_us()),
    )
}

/// Writes a loaded image to `path`.
///
/// # Errors
///
/// [`LoadError::Io`] if the file cannot be written.
pub fn write_file(path: impl AsRef<Path>, image: &ProgramImage) -> Result<(), LoadError> {
    let path = path.as_ref();
    fs::write(path, render_image(image)).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
