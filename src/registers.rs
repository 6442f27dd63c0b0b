use std::fmt;

use crate::memory::TypeAddr;

/// Index of one of the 16 general registers V0..VF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Register(u8);

impl Register {
    pub const V0: Register = Register(0x0);
    // carry / borrow / shift-out / collision
    pub const FLAG: Register = Register(0xF);

    pub fn new(index: u8) -> Option<Self> {
        if index < 16 {
            Some(Register(index))
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// V0 up to and including `self`.
    pub fn range_inclusive(self) -> impl Iterator<Item = Register> {
        (0..=self.0).map(Register)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{:X}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Registers {
    registers: [u8; 16],
}

impl Registers {
    pub fn new() -> Self {
        Self { registers: [0; 16] }
    }

    pub fn set_register(&mut self, reg: Register, value: u8) {
        self.registers[reg.index()] = value;
    }

    // 8-bit wraparound, VF untouched
    pub fn add_to_register(&mut self, reg: Register, value: u8) {
        let total = self.get(reg).wrapping_add(value);
        self.set_register(reg, total);
    }

    pub fn set_flag(&mut self, on: bool) {
        self.set_register(Register::FLAG, on as u8);
    }

    pub fn get(&self, reg: Register) -> u8 {
        self.registers[reg.index()]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.registers
    }
}

// Special registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramCounter(pub TypeAddr);

impl ProgramCounter {
    pub fn increment(&mut self) {
        self.0 = self.0.wrapping_add(2);
    }

    pub fn set_addr(&mut self, addr: TypeAddr) {
        self.0 = addr;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRegister(pub TypeAddr);

impl IndexRegister {
    pub fn set_addr(&mut self, addr: TypeAddr) {
        self.0 = addr;
    }

    // full 16 bits, no overflow flag
    pub fn add(&mut self, value: u8) {
        self.0 = self.0.wrapping_add(value as u16);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_index_is_checked() {
        assert_eq!(Register::new(0xF), Some(Register::FLAG));
        assert_eq!(Register::new(16), None);
    }

    #[test]
    fn add_to_register_wraps_without_flag() {
        let mut regs = Registers::new();
        let v1 = Register::new(1).unwrap();
        regs.set_register(v1, 0xFF);
        regs.add_to_register(v1, 0x02);
        assert_eq!(regs.get(v1), 0x01);
        assert_eq!(regs.get(Register::FLAG), 0);
    }

    #[test]
    fn range_inclusive_covers_v0_to_vx() {
        let v3 = Register::new(3).unwrap();
        let all: Vec<usize> = v3.range_inclusive().map(Register::index).collect();
        assert_eq!(all, vec![0, 1, 2, 3]);
    }

    #[test]
    fn index_register_wraps_at_16_bits() {
        let mut i = IndexRegister(0xFFFF);
        i.add(2);
        assert_eq!(i.0, 0x0001);
    }
}
