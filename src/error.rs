use crate::memory::TypeAddr;

/// Errors raised by the machine and its loader.
///
/// Unknown opcodes are deliberately absent: they are logged and skipped,
/// never surfaced as errors.
#[derive(Debug, thiserror::Error)]
pub enum Chip8Error {
    #[error("program counter out of bounds at {pc:#06X}")]
    ProgramCounterOverrun { pc: TypeAddr },

    #[error("stack overflow: CALL at {pc:#06X} with 16 return addresses already pushed")]
    StackOverflow { pc: TypeAddr },

    #[error("stack underflow: RET at {pc:#06X} with an empty call stack")]
    StackUnderflow { pc: TypeAddr },

    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },

    #[error("unable to read ROM: {0}")]
    Io(#[from] std::io::Error),

    #[error("window error: {0}")]
    Window(#[from] minifb::Error),
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
