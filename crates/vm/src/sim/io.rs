//! External I/O Binding.
//!
//! This module connects the relay bank to the outside world between cycles. It provides:
//! 1. **Binding trait:** [`IoBinding`], called by the cycle driver before and after each cycle.
//! 2. **GPIO map:** Resolution of `GPI0..GPI7` and `GPO0..GPO7` symbols to relay addresses.
//! 3. **Simulated pins:** An in-memory binding that stands in for real GPIO hardware.

use std::fmt;

use tracing::{info, warn};

use crate::common::BitAddr;
use crate::common::constants::{GPIO_INPUT_PREFIX, GPIO_OUTPUT_PREFIX, GPIO_PIN_COUNT};
use crate::core::RelayBank;
use crate::sim::symbols::SymbolTable;

/// Moves external signals into and out of the relay bank.
///
/// The driver calls `read_inputs` immediately before a cycle and
/// `write_outputs` immediately after a successful one. Neither is called while
/// a cycle is executing.
pub trait IoBinding {
    /// Copies external input levels into relay cells.
    fn read_inputs(&mut self, relays: &mut RelayBank);

    /// Publishes relay cells to external outputs.
    fn write_outputs(&mut self, relays: &RelayBank);
}

/// A binding that does nothing; the program runs on its own relays.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoIo;

impl IoBinding for NoIo {
    fn read_inputs(&mut self, _relays: &mut RelayBank) {}

    fn write_outputs(&mut self, _relays: &RelayBank) {}
}

/// Direction a GPIO pin is driven in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinMode {
    /// External level is copied into the relay before each cycle.
    Input,
    /// Relay value is driven onto the pin after each cycle.
    Output,
}

/// A GPIO pin bound to a relay symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinBinding {
    /// Pin direction.
    pub mode: PinMode,
    /// Relay cell the pin is tied to.
    pub bit: BitAddr,
    /// Symbol the binding was resolved from.
    pub symbol: String,
}

/// Pin number to relay mapping for the eight well-known GPIO pins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GpioMap {
    pins: [Option<PinBinding>; GPIO_PIN_COUNT],
}

impl GpioMap {
    /// Resolves GPIO pins from relay symbols.
    ///
    /// Pin `n` is an input when a relay symbol contains `GPI<n>` and an output
    /// when one contains `GPO<n>`. When both exist the pin is an input and the
    /// output symbol is ignored.
    pub fn from_symbols(symbols: &SymbolTable) -> Self {
        let mut map = Self::default();
        for (pin, slot) in map.pins.iter_mut().enumerate() {
            let input = symbols.relay_containing(&format!("{GPIO_INPUT_PREFIX}{pin}"));
            let output = symbols.relay_containing(&format!("{GPIO_OUTPUT_PREFIX}{pin}"));
            *slot = match (input, output) {
                (Some(i), Some(o)) => {
                    warn!(pin, input = %i.name, output = %o.name, "pin conflict, using input");
                    Some((PinMode::Input, i))
                }
                (Some(i), None) => Some((PinMode::Input, i)),
                (None, Some(o)) => Some((PinMode::Output, o)),
                (None, None) => None,
            }
            .map(|(mode, sym)| PinBinding {
                mode,
                bit: BitAddr(sym.addr),
                symbol: sym.name.clone(),
            });
        }
        map
    }

    /// Binding for `pin`, if it is used.
    pub fn pin(&self, pin: usize) -> Option<&PinBinding> {
        self.pins.get(pin).and_then(Option::as_ref)
    }

    /// Input pins and their relays, in pin order.
    pub fn inputs(&self) -> impl Iterator<Item = (usize, BitAddr)> + '_ {
        self.with_mode(PinMode::Input)
    }

    /// Output pins and their relays, in pin order.
    pub fn outputs(&self) -> impl Iterator<Item = (usize, BitAddr)> + '_ {
        self.with_mode(PinMode::Output)
    }

    /// Returns true when no pin is bound.
    pub fn is_empty(&self) -> bool {
        self.pins.iter().all(Option::is_none)
    }

    fn with_mode(&self, mode: PinMode) -> impl Iterator<Item = (usize, BitAddr)> + '_ {
        self.pins.iter().enumerate().filter_map(move |(pin, b)| {
            b.as_ref()
                .filter(|b| b.mode == mode)
                .map(|b| (pin, b.bit))
        })
    }
}

impl fmt::Display for GpioMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (pin, slot) in self.pins.iter().enumerate() {
            match slot {
                Some(b) => {
                    let dir = match b.mode {
                        PinMode::Input => "input ",
                        PinMode::Output => "output",
                    };
                    writeln!(f, "pin {pin}: {dir} {} ({})", b.bit, b.symbol)?;
                }
                None => writeln!(f, "pin {pin}: unused")?,
            }
        }
        Ok(())
    }
}

/// In-memory GPIO pins.
///
/// Input levels are set by the caller; output levels follow the relays after
/// each cycle and every change is logged.
#[derive(Clone, Debug, Default)]
pub struct SimulatedPins {
    map: GpioMap,
    levels: [bool; GPIO_PIN_COUNT],
}

impl SimulatedPins {
    /// Creates pins for `map`, all low.
    pub fn new(map: GpioMap) -> Self {
        Self {
            map,
            levels: [false; GPIO_PIN_COUNT],
        }
    }

    /// The pin mapping.
    pub const fn map(&self) -> &GpioMap {
        &self.map
    }

    /// Sets the external level of `pin`. Has no effect on output pins.
    pub fn set_input(&mut self, pin: usize, level: bool) {
        if let Some(b) = self.map.pin(pin)
            && b.mode == PinMode::Input
        {
            self.levels[pin] = level;
        }
    }

    /// Current level of `pin`, low for unknown pins.
    pub fn level(&self, pin: usize) -> bool {
        self.levels.get(pin).copied().unwrap_or(false)
    }
}

impl IoBinding for SimulatedPins {
    fn read_inputs(&mut self, relays: &mut RelayBank) {
        for (pin, bit) in self.map.inputs() {
            let _ = relays.set(bit.index(), self.levels[pin]);
        }
    }

    fn write_outputs(&mut self, relays: &RelayBank) {
        for (pin, bit) in self.map.outputs() {
            let level = relays.get(bit.index()).unwrap_or(false);
            if level != self.levels[pin] {
                info!(pin, level, "output changed");
                self.levels[pin] = level;
            }
        }
    }
}
