//! Relay, integer, and program address types.
//!
//! This module defines strong types for the three address spaces a ladder program touches,
//! so that a relay index can never be used to index the integer bank by accident. It provides:
//! 1. **Type Safety:** Distinguishes relay-bank and integer-bank addresses at compile time.
//! 2. **Jump Normalization:** Stores jump targets as the position execution resumes at.
//! 3. **Encoding Boundary:** Converts jump targets to and from the on-disk "one before" form.

use std::fmt;

/// Which of the two memory banks an address refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bank {
    /// Boolean relay cells (contacts, coils, internal relays).
    Relay,
    /// Signed 16-bit integer cells (variables, timer and counter accumulators).
    Integer,
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relay => write!(f, "relay"),
            Self::Integer => write!(f, "integer"),
        }
    }
}

/// An address into the relay (boolean) bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BitAddr(pub u16);

/// An address into the integer (signed 16-bit) bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct IntAddr(pub u16);

impl BitAddr {
    /// Creates a new relay address from a raw 16-bit value.
    #[inline(always)]
    pub const fn new(addr: u16) -> Self {
        Self(addr)
    }

    /// Returns the raw 16-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u16 {
        self.0
    }

    /// Returns the address as a bank index.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl IntAddr {
    /// Creates a new integer address from a raw 16-bit value.
    #[inline(always)]
    pub const fn new(addr: u16) -> Self {
        Self(addr)
    }

    /// Returns the raw 16-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u16 {
        self.0
    }

    /// Returns the address as a bank index.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BitAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bits[{:03x}]", self.0)
    }
}

impl fmt::Display for IntAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "int16s[{:03x}]", self.0)
    }
}

/// A normalized jump target.
///
/// Program files store the position *before* the real destination, because the
/// original engine advances the program counter after every instruction, jumps
/// included. `JumpTarget` holds the real destination; the off-by-one form only
/// exists at the decode/encode boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JumpTarget {
    dest: u32,
}

impl JumpTarget {
    /// Builds a target from the value stored in a program record.
    ///
    /// Execution resumes at `encoded + 1`.
    #[inline(always)]
    pub const fn from_encoded(encoded: u16) -> Self {
        Self {
            dest: encoded as u32 + 1,
        }
    }

    /// Builds a target that resumes execution at `dest`.
    ///
    /// Returns `None` for destinations the record format cannot express
    /// (position 0, or anything past `u16::MAX + 1`).
    pub const fn resume_at(dest: usize) -> Option<Self> {
        if dest == 0 || dest > u16::MAX as usize + 1 {
            None
        } else {
            Some(Self { dest: dest as u32 })
        }
    }

    /// Returns the program position execution resumes at.
    #[inline(always)]
    pub const fn dest(self) -> usize {
        self.dest as usize
    }

    /// Returns the value written to a program record (destination minus one).
    #[inline(always)]
    pub const fn encoded(self) -> u16 {
        (self.dest - 1) as u16
    }
}

impl fmt::Display for JumpTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03x}+1", self.encoded())
    }
}
