use crate::error::{Chip8Error, Result};

pub type TypeAddr = u16; // in reality u12
type FontBytes = [u8; 5 * 16];

pub const MEMORY_SIZE: usize = 4096;
pub const PROGRAM_START: TypeAddr = 0x200;
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;
pub const FONT_START: TypeAddr = 0x50;
pub const FONT_GLYPH_SIZE: TypeAddr = 5;
pub const STACK_DEPTH: usize = 16;

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

/// Address of the glyph for the low nibble of `digit`.
pub fn glyph_addr(digit: u8) -> TypeAddr {
    FONT_START + FONT_GLYPH_SIZE * (digit & 0xF) as TypeAddr
}

pub struct Memory {
    // 4k bytes
    // font data stored from 050 -> 09F (000 -> 04F is empty by convention)
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        let mut memory = Self {
            bytes: [0; MEMORY_SIZE],
        };
        memory.install_font();
        memory
    }

    pub fn reset(&mut self) {
        self.bytes = [0; MEMORY_SIZE];
        self.install_font();
    }

    fn install_font(&mut self) {
        let start = FONT_START as usize;
        self.bytes[start..start + DEFAULT_FONT.len()].copy_from_slice(&DEFAULT_FONT);
    }

    // addresses past 0xFFF wrap around, so index arithmetic can never leave memory
    pub fn get(&self, addr: TypeAddr) -> u8 {
        self.bytes[addr as usize % MEMORY_SIZE]
    }

    pub fn set(&mut self, addr: TypeAddr, val: u8) {
        self.bytes[addr as usize % MEMORY_SIZE] = val;
    }

    // big-endian; bounds are the caller's job
    pub fn word(&self, addr: TypeAddr) -> u16 {
        let (l, r) = (self.get(addr), self.get(addr.wrapping_add(1)));
        ((l as u16) << 8) | r as u16
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    // copies program instructions starting at address 0x200
    pub fn load_rom(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.len() > MAX_PROGRAM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: bytes.len(),
                max_size: MAX_PROGRAM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Stack {
    addresses: [TypeAddr; STACK_DEPTH],
    pointer: usize,
}

impl Stack {
    pub fn new() -> Self {
        Self {
            addresses: [0; STACK_DEPTH],
            pointer: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// `None` when all 16 slots are taken; the stack is left as it was.
    pub fn push(&mut self, addr: TypeAddr) -> Option<()> {
        let slot = self.addresses.get_mut(self.pointer)?;
        *slot = addr;
        self.pointer += 1;
        Some(())
    }

    pub fn pop(&mut self) -> Option<TypeAddr> {
        self.pointer = self.pointer.checked_sub(1)?;
        Some(self.addresses[self.pointer])
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn entries(&self) -> &[TypeAddr] {
        &self.addresses[..self.pointer]
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}
