//! A CHIP-8 interpreter.
//!
//! [`machine::MachineState`] holds everything a program can observe: memory,
//! registers, stack, timers, the 64x32 display and the keypad latches.
//! [`cpu::Cpu`] advances it one instruction per [`cpu::Cpu::cycle`] call and
//! has no notion of wall-clock time. Pacing, the 60 Hz timers, the window and
//! keyboard polling all live in [`emulator::Emulator`].

pub mod config;
pub mod cpu;
pub mod debug;
pub mod decode;
pub mod display;
pub mod emulator;
pub mod error;
pub mod keyboard;
pub mod machine;
pub mod memory;
pub mod registers;
pub mod rom;
pub mod timer;
pub mod window;

pub use cpu::{Cpu, Cycle};
pub use decode::Instruction;
pub use error::{Chip8Error, Result};
pub use machine::{Execution, MachineState};
