//! Loaded Program Image.
//!
//! Everything a successful load produces: the validated program store, the
//! symbol table, and the cycle period the program runs at. The image is
//! read-only once built.

use std::time::Duration;

use crate::core::Program;
use crate::sim::symbols::SymbolTable;

/// A validated program together with its symbols and cycle period.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramImage {
    program: Program,
    symbols: SymbolTable,
    cycle_period_us: u64,
    declared_cycle_us: Option<u64>,
}

impl ProgramImage {
    /// Assembles an image from already validated parts.
    ///
    /// `cycle_period_us` is the period the interpreter runs at; `declared_cycle_us`
    /// is what the program file stated, if anything.
    pub const fn new(
        program: Program,
        symbols: SymbolTable,
        cycle_period_us: u64,
        declared_cycle_us: Option<u64>,
    ) -> Self {
        Self {
            program,
            symbols,
            cycle_period_us,
            declared_cycle_us,
        }
    }

    /// The program store.
    pub const fn program(&self) -> &Program {
        &self.program
    }

    /// The symbol table.
    pub const fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Cycle period in microseconds.
    pub const fn cycle_period_us(&self) -> u64 {
        self.cycle_period_us
    }

    /// Cycle period as a [`Duration`].
    pub const fn cycle_period(&self) -> Duration {
        Duration::from_micros(self.cycle_period_us)
    }

    /// Period declared by the `$$cycle` directive, if the file had one.
    pub const fn declared_cycle_us(&self) -> Option<u64> {
        self.declared_cycle_us
    }
}
