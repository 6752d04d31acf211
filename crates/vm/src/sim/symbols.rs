//! Symbol Table.
//!
//! Maps the variable names a user wrote on the ladder diagram to the bank and
//! address the compiler assigned them. The interpreter never consults it; it
//! exists so I/O bindings and tools can find the cells they care about.

use std::fmt;

use crate::common::{Bank, BitAddr, IntAddr};

/// One `name,address` entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    /// Name as it appears on the ladder diagram (e.g. `Xstart`, `Ymotor`, `Ccount`).
    pub name: String,
    /// Bank the address indexes.
    pub bank: Bank,
    /// Cell address within the bank.
    pub addr: u16,
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bank {
            Bank::Relay => write!(f, "{} -> {}", self.name, BitAddr(self.addr)),
            Bank::Integer => write!(f, "{} -> {}", self.name, IntAddr(self.addr)),
        }
    }
}

/// Symbols in the order the program file lists them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolTable {
    entries: Vec<Symbol>,
}

impl SymbolTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn push(&mut self, name: impl Into<String>, bank: Bank, addr: u16) {
        self.entries.push(Symbol {
            name: name.into(),
            bank,
            addr,
        });
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.iter()
    }

    /// First entry named exactly `name`.
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.entries.iter().find(|s| s.name == name)
    }

    /// Relay address of the symbol named exactly `name`.
    pub fn relay(&self, name: &str) -> Option<BitAddr> {
        self.get(name)
            .filter(|s| s.bank == Bank::Relay)
            .map(|s| BitAddr(s.addr))
    }

    /// Integer address of the symbol named exactly `name`.
    pub fn integer(&self, name: &str) -> Option<IntAddr> {
        self.get(name)
            .filter(|s| s.bank == Bank::Integer)
            .map(|s| IntAddr(s.addr))
    }

    /// Last relay symbol whose name contains `fragment`.
    ///
    /// The compiler prefixes contacts with `X` and coils with `Y`, so a binding
    /// looking for `GPI3` matches `XGPI3`. Later entries override earlier ones,
    /// as in LDmicro's own runtime.
    pub fn relay_containing(&self, fragment: &str) -> Option<&Symbol> {
        self.entries
            .iter()
            .rev()
            .find(|s| s.bank == Bank::Relay && s.name.contains(fragment))
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
