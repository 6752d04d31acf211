//! Relay and Integer Memory Banks.
//!
//! This module implements the only mutable state a ladder program has.
//! It performs the following:
//! 1. **Storage:** Fixed-capacity arrays of booleans (relays) and signed 16-bit values (integers).
//! 2. **Access:** Typed reads and writes by [`BitAddr`] / [`IntAddr`], plus checked
//!    access by raw index for I/O bindings.
//! 3. **Debugging:** Utilities for dumping bank contents.
//!
//! Typed accessors index directly: the loader has already checked every address a
//! program uses against the bank capacity, so an out-of-range typed access is a bug
//! and panics.

use std::fmt::Write;

use crate::common::{BitAddr, IntAddr};

/// Boolean relay bank (contacts, coils, internal relays).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayBank {
    cells: Vec<bool>,
}

impl RelayBank {
    /// Creates a relay bank with every cell cleared.
    pub fn new(capacity: usize) -> Self {
        Self {
            cells: vec![false; capacity],
        }
    }

    /// Number of cells.
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Reads a relay.
    ///
    /// # Panics
    ///
    /// If `addr` is outside the bank.
    #[inline(always)]
    pub fn read(&self, addr: BitAddr) -> bool {
        self.cells[addr.index()]
    }

    /// Writes a relay.
    ///
    /// # Panics
    ///
    /// If `addr` is outside the bank.
    #[inline(always)]
    pub fn write(&mut self, addr: BitAddr, val: bool) {
        self.cells[addr.index()] = val;
    }

    /// Reads a relay by raw index, or `None` past the end of the bank.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.cells.get(index).copied()
    }

    /// Writes a relay by raw index. Returns `false`, writing nothing, past the end of the bank.
    pub fn set(&mut self, index: usize, val: bool) -> bool {
        self.cells.get_mut(index).map(|cell| *cell = val).is_some()
    }

    /// Clears every relay.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// All cells in address order.
    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }

    /// Renders the bank as rows of sixteen `0`/`1` cells, each row prefixed with its base address.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (row, chunk) in self.cells.chunks(16).enumerate() {
            let bits: String = chunk.iter().map(|&b| if b { '1' } else { '0' }).collect();
            let _ = writeln!(out, "bits[{:03x}] {bits}", row * 16);
        }
        out
    }
}

/// Signed 16-bit integer bank (variables, timer and counter accumulators).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegerBank {
    cells: Vec<i16>,
}

impl IntegerBank {
    /// Creates an integer bank with every cell zeroed.
    pub fn new(capacity: usize) -> Self {
        Self {
            cells: vec![0; capacity],
        }
    }

    /// Number of cells.
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Reads a variable.
    ///
    /// # Panics
    ///
    /// If `addr` is outside the bank.
    #[inline(always)]
    pub fn read(&self, addr: IntAddr) -> i16 {
        self.cells[addr.index()]
    }

    /// Writes a variable.
    ///
    /// # Panics
    ///
    /// If `addr` is outside the bank.
    #[inline(always)]
    pub fn write(&mut self, addr: IntAddr, val: i16) {
        self.cells[addr.index()] = val;
    }

    /// Reads a variable by raw index, or `None` past the end of the bank.
    pub fn get(&self, index: usize) -> Option<i16> {
        self.cells.get(index).copied()
    }

    /// Writes a variable by raw index. Returns `false`, writing nothing, past the end of the bank.
    pub fn set(&mut self, index: usize, val: i16) -> bool {
        self.cells.get_mut(index).map(|cell| *cell = val).is_some()
    }

    /// Zeroes every variable.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// All cells in address order.
    pub fn as_slice(&self) -> &[i16] {
        &self.cells
    }

    /// Renders the non-zero variables, one per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (addr, &val) in self.cells.iter().enumerate().filter(|(_, v)| **v != 0) {
            let _ = writeln!(out, "int16s[{addr:03x}] = {val} (0x{:04x})", val as u16);
        }
        out
    }
}
