use crate::memory::{TypeAddr, PROGRAM_START};

pub const FLAG: u8 = 0xF;

pub struct Registers {
    registers: [u8; 16],
}

impl Registers {
    pub fn new() -> Self {
        Self { registers: [0; 16] }
    }

    pub fn reset(&mut self) {
        self.registers = [0; 16];
    }

    pub fn set_register(&mut self, reg_num: u8, value: u8) {
        self.registers[(reg_num & 0xF) as usize] = value;
    }

    pub fn add_to_register(&mut self, reg_num: u8, value: u8) {
        let total = self.get(reg_num).wrapping_add(value);
        self.set_register(reg_num, total);
    }

    /// VF is always written after the primary result, so it wins when x == F.
    pub fn set_flag(&mut self, flag: bool) {
        self.set_register(FLAG, flag as u8);
    }

    pub fn get(&self, reg_num: u8) -> u8 {
        self.registers[(reg_num & 0xF) as usize]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.registers
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
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

impl Default for ProgramCounter {
    fn default() -> Self {
        ProgramCounter(PROGRAM_START)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexRegister(pub TypeAddr);

impl IndexRegister {
    pub fn set_addr(&mut self, addr: TypeAddr) {
        self.0 = addr;
    }

    pub fn add(&mut self, offset: u8) {
        self.0 = self.0.wrapping_add(offset as TypeAddr);
    }
}

#[test]
fn test_register_wraparound() {
    let mut regs = Registers::new();
    regs.set_register(3, 0xF0);
    regs.add_to_register(3, 0x20);
    assert_eq!(regs.get(3), 0x10);
    regs.set_flag(true);
    assert_eq!(regs.get(FLAG), 1);
}

#[test]
fn test_program_counter_defaults_to_program_start() {
    let mut pc = ProgramCounter::default();
    assert_eq!(pc, ProgramCounter(0x200));
    pc.increment();
    assert_eq!(pc.0, 0x202);
}
