use log::info;

use crate::error::{Chip8Error, Result};
use crate::registers::{IndexRegister, ProgramCounter};

pub type TypeAddr = u16; // in reality u12
type FontBytes = [u8; 5 * 16];

pub const MEMORY_SIZE: usize = 4096;
pub const PROGRAM_START: TypeAddr = 0x200;
pub const FONT_START: TypeAddr = 0x50;
pub const GLYPH_BYTES: TypeAddr = 5;
pub const STACK_DEPTH: usize = 16;

const ADDR_MASK: TypeAddr = (MEMORY_SIZE - 1) as TypeAddr;

const DEFAULT_FONT: FontBytes = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Address of the 5-byte glyph for the low nibble of `digit`.
pub fn glyph_addr(digit: u8) -> TypeAddr {
    FONT_START + (digit & 0xF) as TypeAddr * GLYPH_BYTES
}

pub struct Memory {
    // 4k bytes
    // font data stored from 050 -> 09F (000 -> 04F is empty by convention)
    bytes: [u8; MEMORY_SIZE],
    pub pc: ProgramCounter,
    pub index: IndexRegister,
    pub stack: Stack,
}

impl Memory {
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        let font_start = FONT_START as usize;
        bytes[font_start..font_start + DEFAULT_FONT.len()].copy_from_slice(&DEFAULT_FONT);

        Self {
            bytes,
            pc: ProgramCounter(PROGRAM_START),
            index: IndexRegister(0x0),
            stack: Stack::new(),
        }
    }

    // addresses past 0xFFF wrap back into memory
    pub fn set(&mut self, addr: TypeAddr, val: u8) {
        self.bytes[(addr & ADDR_MASK) as usize] = val;
    }

    pub fn get(&self, addr: TypeAddr) -> u8 {
        self.bytes[(addr & ADDR_MASK) as usize]
    }

    /// Big-endian instruction word at the program counter.
    pub fn instruction_at_pc(&self) -> u16 {
        let pc = self.pc.0;
        let (l, r) = (self.get(pc), self.get(pc.wrapping_add(1)));
        ((l as u16) << 8) | r as u16
    }

    pub fn increment_pc(&mut self) {
        self.pc.increment();
    }

    pub fn set_pc(&mut self, addr: TypeAddr) {
        self.pc.set_addr(addr);
    }

    pub fn set_index(&mut self, addr: TypeAddr) {
        self.index.set_addr(addr);
    }

    /// Copies a program image verbatim to 0x200.
    pub fn load_rom(&mut self, bytes: &[u8]) -> Result<()> {
        let start_index = PROGRAM_START as usize;
        let max = MEMORY_SIZE - start_index;
        if bytes.len() > max {
            return Err(Chip8Error::RomTooLarge {
                size: bytes.len(),
                max,
            });
        }
        self.bytes[start_index..start_index + bytes.len()].copy_from_slice(bytes);
        info!("loaded {} byte program at {:#05x}", bytes.len(), start_index);
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed 16-entry call stack of return addresses.
#[derive(Debug, Clone)]
pub struct Stack {
    addresses: [TypeAddr; STACK_DEPTH],
    sp: usize,
}

impl Stack {
    pub fn new() -> Self {
        Self {
            addresses: [0; STACK_DEPTH],
            sp: 0,
        }
    }

    /// Hands the address back when the stack is full.
    pub fn push(&mut self, addr: TypeAddr) -> std::result::Result<(), TypeAddr> {
        if self.sp == STACK_DEPTH {
            return Err(addr);
        }
        self.addresses[self.sp] = addr;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Option<TypeAddr> {
        if self.sp == 0 {
            return None;
        }
        self.sp -= 1;
        Some(self.addresses[self.sp])
    }

    pub fn depth(&self) -> usize {
        self.sp
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}
