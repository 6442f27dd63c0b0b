use crate::memory::TypeAddr;

pub type Result<T> = std::result::Result<T, Chip8Error>;

/// Fatal interpreter faults. None of these can be recovered from inside the
/// interpreter: they mean the guest program is malformed or unsupported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Chip8Error {
    #[error("unrecognized instruction {word:#06x} at pc {pc:#05x}")]
    Decode { word: u16, pc: TypeAddr },

    #[error("call stack overflow at pc {pc:#05x}")]
    StackOverflow { pc: TypeAddr },

    #[error("return with empty call stack at pc {pc:#05x}")]
    StackUnderflow { pc: TypeAddr },

    #[error("register index {index} out of range in {word:#06x} at pc {pc:#05x}")]
    OperandRange { index: u8, word: u16, pc: TypeAddr },

    #[error("rom is {size} bytes, at most {max} bytes fit in memory")]
    RomTooLarge { size: usize, max: usize },
}
