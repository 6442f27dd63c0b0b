//! A CHIP-8 interpreter: 4 KiB memory, sixteen 8-bit registers, a 64x32
//! XOR-composited display, a hex keypad and two 60 Hz timers.
//!
//! [`Emulator`] is the whole machine and has no windowing dependency, so it
//! can be driven headless. The `emuchip` binary wires it to a minifb window.

pub mod config;
pub mod decode;
pub mod display;
pub mod emulator;
pub mod error;
pub mod frontend;
pub mod keyboard;
pub mod memory;
pub mod registers;
pub mod timer;

pub use config::{Config, Quirks};
pub use decode::{AluOp, OpCode};
pub use emulator::{Emulator, StepOutcome};
pub use error::{Chip8Error, Result};
pub use registers::Register;
