//! Program loading and the cycle-driven runtime.
//!
//! Turns a program file into a [`ProgramImage`], and runs that image against
//! an [`IoBinding`] one scan cycle at a time.

pub mod driver;
pub mod image;
pub mod io;
pub mod loader;
pub mod symbols;
pub mod writer;

pub use driver::CycleDriver;
pub use image::ProgramImage;
pub use io::{GpioMap, IoBinding, NoIo, PinBinding, PinMode, SimulatedPins};
pub use loader::{load_file, load_str};
pub use symbols::{Symbol, SymbolTable};
