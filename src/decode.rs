use std::fmt;

use crate::error::{Chip8Error, Result};
use crate::memory::TypeAddr;
use crate::registers::Register;

/// Cursor over the four nibbles of an instruction word.
pub struct RawInstruction {
    code: u16,
    pc: TypeAddr,
    i: u8,
}

impl RawInstruction {
    pub fn new(code: u16, pc: TypeAddr) -> Self {
        RawInstruction { code, pc, i: 1 }
    }

    // n is starting digit, m is length
    pub fn nth_m_digits(&self, n: u8, m: u8) -> u16 {
        // 0110 1100 1111 0001
        // -------------------
        // 1111 1111 1111 1111
        //      1111 1111 1111
        //           1111 1111
        //                1111
        //
        // 4 - (m) - (n - 1), n = 2
        let shift_places = (4 - m - (n - 1)) * 4;
        let mask: u16 = if m == 4 { 0xFFFF } else { (1 << (4 * m)) - 1 };
        (self.code >> shift_places) & mask
    }

    // iterator like methods for decoding convenience
    fn take(&mut self, m: u8) -> u16 {
        debug_assert!(self.i + m <= 5, "read past the end of {:#06x}", self.code);
        let digits = self.nth_m_digits(self.i, m);
        self.i += m;
        digits
    }

    pub fn start_identifier(&mut self) -> u8 {
        debug_assert_eq!(self.i, 1);
        self.take(1) as u8
    }

    pub fn next_register(&mut self) -> Result<Register> {
        let index = self.take(1) as u8;
        Register::new(index).ok_or(Chip8Error::OperandRange {
            index,
            word: self.code,
            pc: self.pc,
        })
    }

    pub fn next_address(&mut self) -> TypeAddr {
        self.take(3)
    }

    pub fn next_u8(&mut self) -> u8 {
        self.take(2) as u8
    }

    pub fn next_u4(&mut self) -> u8 {
        self.take(1) as u8
    }

    fn unrecognized(&self) -> Chip8Error {
        Chip8Error::Decode {
            word: self.code,
            pc: self.pc,
        }
    }
}

/// 8XYn register-to-register operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    // 8XY0
    Copy,
    // 8XY1
    Or,
    // 8XY2
    And,
    // 8XY3
    XOr,
    // 8XY4, VF = carry
    Add,
    // 8XY5, VX = VX - VY, VF = no borrow
    SubtractForward,
    // 8XY6, VF = shifted-out bit
    RightShift,
    // 8XY7, VX = VY - VX, VF = no borrow
    SubtractBackward,
    // 8XYE, VF = shifted-out bit
    LeftShift,
}

impl AluOp {
    fn from_selector(n: u8) -> Option<Self> {
        Some(match n {
            0x0 => Self::Copy,
            0x1 => Self::Or,
            0x2 => Self::And,
            0x3 => Self::XOr,
            0x4 => Self::Add,
            0x5 => Self::SubtractForward,
            0x6 => Self::RightShift,
            0x7 => Self::SubtractBackward,
            0xE => Self::LeftShift,
            _ => return None,
        })
    }

    fn mnemonic(self) -> &'static str {
        match self {
            Self::Copy => "LD",
            Self::Or => "OR",
            Self::And => "AND",
            Self::XOr => "XOR",
            Self::Add => "ADD",
            Self::SubtractForward => "SUB",
            Self::RightShift => "SHR",
            Self::SubtractBackward => "SUBN",
            Self::LeftShift => "SHL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
    // 00E0
    // turn all pixels to 0
    ClearScreen,
    // 00EE
    PopSubroutine,
    // 1NNN
    // set PC to address NNN, "jump" to memory location
    Jump(TypeAddr),
    // 2NNN
    PushSubroutine(TypeAddr),

    // 3XNN
    SkipEqualConstant(Register, u8),
    // 4XNN
    SkipNotEqualConstant(Register, u8),
    // 5XY0
    SkipEqualRegister(Register, Register),
    // 9XY0
    SkipNotEqualRegister(Register, Register),

    // 6XNN
    // set register VX to value NN
    SetRegister(Register, u8),
    // 7XNN
    // add value NN to VX, no carry
    AddToRegister(Register, u8),
    // 8XYn
    Alu(AluOp, Register, Register),

    // ANNN
    // set index register I to address NNN
    SetIndexRegister(TypeAddr),
    // BNNN
    JumpWithOffset(TypeAddr),
    // CXNN
    Random(Register, u8),
    // DXYN
    // draw an N pixel tall sprite starting at I at coordinates (VX, VY)
    Display(Register, Register, u8),

    // EX9E
    SkipIfPressed(Register),
    // EXA1
    SkipIfNotPressed(Register),

    // FX07
    CopyDelayToRegister(Register),
    // FX0A
    GetKey(Register),
    // FX15
    CopyRegisterToDelay(Register),
    // FX18
    CopyRegisterToSound(Register),
    // FX1E
    AddToIndex(Register),
    // FX29
    PointChar(Register),
    // FX33
    ToDecimal(Register),
    // FX55
    StoreRegisterToMemory(Register),
    // FX65
    LoadRegisterFromMemory(Register),
}

impl OpCode {
    /// Decodes the word fetched from `pc`. Unknown families and selectors are
    /// reported with the word and its address.
    pub fn decode_raw(ins: u16, pc: TypeAddr) -> Result<Self> {
        let mut raw = RawInstruction::new(ins, pc);

        let op = match raw.start_identifier() {
            0x0 => match ins {
                0x00E0 => Self::ClearScreen,
                0x00EE => Self::PopSubroutine,
                // 0NNN machine routines are not supported
                _ => return Err(raw.unrecognized()),
            },
            0x1 => Self::Jump(raw.next_address()),
            0x2 => Self::PushSubroutine(raw.next_address()),
            0x3 => Self::SkipEqualConstant(raw.next_register()?, raw.next_u8()),
            0x4 => Self::SkipNotEqualConstant(raw.next_register()?, raw.next_u8()),
            0x5 => {
                let (x, y) = (raw.next_register()?, raw.next_register()?);
                match raw.next_u4() {
                    0x0 => Self::SkipEqualRegister(x, y),
                    _ => return Err(raw.unrecognized()),
                }
            }
            0x6 => Self::SetRegister(raw.next_register()?, raw.next_u8()),
            0x7 => Self::AddToRegister(raw.next_register()?, raw.next_u8()),
            0x8 => {
                let (x, y) = (raw.next_register()?, raw.next_register()?);
                match AluOp::from_selector(raw.next_u4()) {
                    Some(alu) => Self::Alu(alu, x, y),
                    None => return Err(raw.unrecognized()),
                }
            }
            0x9 => {
                let (x, y) = (raw.next_register()?, raw.next_register()?);
                match raw.next_u4() {
                    0x0 => Self::SkipNotEqualRegister(x, y),
                    _ => return Err(raw.unrecognized()),
                }
            }
            0xA => Self::SetIndexRegister(raw.next_address()),
            0xB => Self::JumpWithOffset(raw.next_address()),
            0xC => Self::Random(raw.next_register()?, raw.next_u8()),
            0xD => Self::Display(raw.next_register()?, raw.next_register()?, raw.next_u4()),
            0xE => {
                let x = raw.next_register()?;
                match raw.next_u8() {
                    0x9E => Self::SkipIfPressed(x),
                    0xA1 => Self::SkipIfNotPressed(x),
                    _ => return Err(raw.unrecognized()),
                }
            }
            0xF => {
                let x = raw.next_register()?;
                match raw.next_u8() {
                    0x07 => Self::CopyDelayToRegister(x),
                    0x0A => Self::GetKey(x),
                    0x15 => Self::CopyRegisterToDelay(x),
                    0x18 => Self::CopyRegisterToSound(x),
                    0x1E => Self::AddToIndex(x),
                    0x29 => Self::PointChar(x),
                    0x33 => Self::ToDecimal(x),
                    0x55 => Self::StoreRegisterToMemory(x),
                    0x65 => Self::LoadRegisterFromMemory(x),
                    _ => return Err(raw.unrecognized()),
                }
            }
            _ => return Err(raw.unrecognized()),
        };
        Ok(op)
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ClearScreen => write!(f, "CLS"),
            Self::PopSubroutine => write!(f, "RET"),
            Self::Jump(addr) => write!(f, "JP {addr:#05x}"),
            Self::PushSubroutine(addr) => write!(f, "CALL {addr:#05x}"),
            Self::SkipEqualConstant(x, nn) => write!(f, "SE {x}, {nn:#04x}"),
            Self::SkipNotEqualConstant(x, nn) => write!(f, "SNE {x}, {nn:#04x}"),
            Self::SkipEqualRegister(x, y) => write!(f, "SE {x}, {y}"),
            Self::SkipNotEqualRegister(x, y) => write!(f, "SNE {x}, {y}"),
            Self::SetRegister(x, nn) => write!(f, "LD {x}, {nn:#04x}"),
            Self::AddToRegister(x, nn) => write!(f, "ADD {x}, {nn:#04x}"),
            Self::Alu(alu, x, y) => write!(f, "{} {x}, {y}", alu.mnemonic()),
            Self::SetIndexRegister(addr) => write!(f, "LD I, {addr:#05x}"),
            Self::JumpWithOffset(addr) => write!(f, "JP V0, {addr:#05x}"),
            Self::Random(x, nn) => write!(f, "RND {x}, {nn:#04x}"),
            Self::Display(x, y, n) => write!(f, "DRW {x}, {y}, {n}"),
            Self::SkipIfPressed(x) => write!(f, "SKP {x}"),
            Self::SkipIfNotPressed(x) => write!(f, "SKNP {x}"),
            Self::CopyDelayToRegister(x) => write!(f, "LD {x}, DT"),
            Self::GetKey(x) => write!(f, "LD {x}, K"),
            Self::CopyRegisterToDelay(x) => write!(f, "LD DT, {x}"),
            Self::CopyRegisterToSound(x) => write!(f, "LD ST, {x}"),
            Self::AddToIndex(x) => write!(f, "ADD I, {x}"),
            Self::PointChar(x) => write!(f, "LD F, {x}"),
            Self::ToDecimal(x) => write!(f, "LD B, {x}"),
            Self::StoreRegisterToMemory(x) => write!(f, "LD [I], {x}"),
            Self::LoadRegisterFromMemory(x) => write!(f, "LD {x}, [I]"),
        }
    }
}
