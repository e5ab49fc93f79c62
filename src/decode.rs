use std::fmt;

use crate::memory::TypeAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawInstruction {
    code: u16,
}

impl RawInstruction {
    pub fn new(code: u16) -> Self {
        RawInstruction { code }
    }

    // n is the starting digit (1-based, from the left), m is the length
    pub fn nth_m_digits(&self, n: u8, m: u8) -> u16 {
        let shift_places = (4 - m - (n - 1)) * 4;
        let mask = (1u32 << (m * 4)) - 1;
        (self.code >> shift_places) & mask as u16
    }

    pub fn identifier(&self) -> u8 {
        self.nth_m_digits(1, 1) as u8
    }

    pub fn nnn(&self) -> TypeAddr {
        self.nth_m_digits(2, 3)
    }

    pub fn kk(&self) -> u8 {
        self.nth_m_digits(3, 2) as u8
    }

    pub fn n(&self) -> u8 {
        self.nth_m_digits(4, 1) as u8
    }

    pub fn x(&self) -> u8 {
        self.nth_m_digits(2, 1) as u8
    }

    pub fn y(&self) -> u8 {
        self.nth_m_digits(3, 1) as u8
    }
}

impl PartialEq<u16> for RawInstruction {
    fn eq(&self, ins: &u16) -> bool {
        ins.eq(&self.code)
    }
}

#[test]
fn test_bit_manip() {
    assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(2, 1), 0xC);
    assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(3, 1), 0xE);
    assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(1, 1), 0x4);

    assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(1, 2), 0x4C);
    assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(2, 2), 0xCE);
    assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(2, 3), 0xCEE);
    assert_eq!(RawInstruction::new(0xFFFF).nth_m_digits(1, 4), 0xFFFF);
}

#[test]
fn test_fields() {
    let raw = RawInstruction::new(0xD12A);
    assert_eq!(raw.identifier(), 0xD);
    assert_eq!(raw.x(), 0x1);
    assert_eq!(raw.y(), 0x2);
    assert_eq!(raw.n(), 0xA);
    assert_eq!(raw.kk(), 0x2A);
    assert_eq!(raw.nnn(), 0x12A);
    assert!(raw == 0xD12A);
}

/// One decoded CHIP-8 instruction. Register operands are 0x0..=0xF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen,
    PopSubroutine,
    // 0nnn machine code routine, a no-op here
    System(TypeAddr),
    Jump(TypeAddr),
    PushSubroutine(TypeAddr),

    SkipEqualConstant(u8, u8),
    SkipNotEqualConstant(u8, u8),
    SkipEqualRegister(u8, u8),
    SkipNotEqualRegister(u8, u8),

    SetRegister(u8, u8),
    // 7xkk wraps and leaves VF alone
    AddToRegister(u8, u8),

    // 8xy_ group, VF written after the result
    CopyRegister(u8, u8),
    Or(u8, u8),
    And(u8, u8),
    XOr(u8, u8),
    Add(u8, u8),
    // Vx = Vx - Vy
    SubtractForward(u8, u8),
    // shifts Vx in place, y is ignored
    RightShift(u8),
    // Vx = Vy - Vx
    SubtractBackward(u8, u8),
    LeftShift(u8),

    SetIndexRegister(TypeAddr),
    // jumps to nnn + V0
    JumpWithOffset(TypeAddr),
    Random(u8, u8),
    Display(u8, u8, u8),

    SkipIfPressed(u8),
    SkipIfNotPressed(u8),

    CopyDelayToRegister(u8),
    GetKey(u8),
    CopyRegisterToDelay(u8),
    CopyRegisterToSound(u8),
    AddToIndex(u8),
    PointChar(u8),
    ToDecimal(u8),
    StoreRegisterToMemory(u8),
    LoadRegisterFromMemory(u8),

    // raw opcode of anything not matched above
    Unknown(u16),
}

impl Instruction {
    pub fn decode(ins: u16) -> Self {
        let raw = RawInstruction::new(ins);
        let (x, y, n, kk, nnn) = (raw.x(), raw.y(), raw.n(), raw.kk(), raw.nnn());

        match raw.identifier() {
            0x0 => match ins {
                0x00E0 => Self::ClearScreen,
                0x00EE => Self::PopSubroutine,
                _ => Self::System(nnn),
            },
            0x1 => Self::Jump(nnn),
            0x2 => Self::PushSubroutine(nnn),
            0x3 => Self::SkipEqualConstant(x, kk),
            0x4 => Self::SkipNotEqualConstant(x, kk),
            0x5 if n == 0 => Self::SkipEqualRegister(x, y),
            0x6 => Self::SetRegister(x, kk),
            0x7 => Self::AddToRegister(x, kk),
            0x8 => match n {
                0x0 => Self::CopyRegister(x, y),
                0x1 => Self::Or(x, y),
                0x2 => Self::And(x, y),
                0x3 => Self::XOr(x, y),
                0x4 => Self::Add(x, y),
                0x5 => Self::SubtractForward(x, y),
                0x6 => Self::RightShift(x),
                0x7 => Self::SubtractBackward(x, y),
                0xE => Self::LeftShift(x),
                _ => Self::Unknown(ins),
            },
            0x9 if n == 0 => Self::SkipNotEqualRegister(x, y),
            0xA => Self::SetIndexRegister(nnn),
            0xB => Self::JumpWithOffset(nnn),
            0xC => Self::Random(x, kk),
            0xD => Self::Display(x, y, n),
            0xE => match kk {
                0x9E => Self::SkipIfPressed(x),
                0xA1 => Self::SkipIfNotPressed(x),
                _ => Self::Unknown(ins),
            },
            0xF => match kk {
                0x07 => Self::CopyDelayToRegister(x),
                0x0A => Self::GetKey(x),
                0x15 => Self::CopyRegisterToDelay(x),
                0x18 => Self::CopyRegisterToSound(x),
                0x1E => Self::AddToIndex(x),
                0x29 => Self::PointChar(x),
                0x33 => Self::ToDecimal(x),
                0x55 => Self::StoreRegisterToMemory(x),
                0x65 => Self::LoadRegisterFromMemory(x),
                _ => Self::Unknown(ins),
            },
            _ => Self::Unknown(ins),
        }
    }

    pub fn draws(&self) -> bool {
        matches!(self, Self::ClearScreen | Self::Display(..))
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ClearScreen => write!(f, "CLS"),
            Self::PopSubroutine => write!(f, "RET"),
            Self::System(addr) => write!(f, "SYS {addr:03X}"),
            Self::Jump(addr) => write!(f, "JP {addr:03X}"),
            Self::PushSubroutine(addr) => write!(f, "CALL {addr:03X}"),
            Self::SkipEqualConstant(x, kk) => write!(f, "SE V{x:X}, {kk:#04X}"),
            Self::SkipNotEqualConstant(x, kk) => write!(f, "SNE V{x:X}, {kk:#04X}"),
            Self::SkipEqualRegister(x, y) => write!(f, "SE V{x:X}, V{y:X}"),
            Self::SkipNotEqualRegister(x, y) => write!(f, "SNE V{x:X}, V{y:X}"),
            Self::SetRegister(x, kk) => write!(f, "LD V{x:X}, {kk:#04X}"),
            Self::AddToRegister(x, kk) => write!(f, "ADD V{x:X}, {kk:#04X}"),
            Self::CopyRegister(x, y) => write!(f, "LD V{x:X}, V{y:X}"),
            Self::Or(x, y) => write!(f, "OR V{x:X}, V{y:X}"),
            Self::And(x, y) => write!(f, "AND V{x:X}, V{y:X}"),
            Self::XOr(x, y) => write!(f, "XOR V{x:X}, V{y:X}"),
            Self::Add(x, y) => write!(f, "ADD V{x:X}, V{y:X}"),
            Self::SubtractForward(x, y) => write!(f, "SUB V{x:X}, V{y:X}"),
            Self::RightShift(x) => write!(f, "SHR V{x:X}"),
            Self::SubtractBackward(x, y) => write!(f, "SUBN V{x:X}, V{y:X}"),
            Self::LeftShift(x) => write!(f, "SHL V{x:X}"),
            Self::SetIndexRegister(addr) => write!(f, "LD I, {addr:03X}"),
            Self::JumpWithOffset(addr) => write!(f, "JP V0, {addr:03X}"),
            Self::Random(x, kk) => write!(f, "RND V{x:X}, {kk:#04X}"),
            Self::Display(x, y, n) => write!(f, "DRW V{x:X}, V{y:X}, {n}"),
            Self::SkipIfPressed(x) => write!(f, "SKP V{x:X}"),
            Self::SkipIfNotPressed(x) => write!(f, "SKNP V{x:X}"),
            Self::CopyDelayToRegister(x) => write!(f, "LD V{x:X}, DT"),
            Self::GetKey(x) => write!(f, "LD V{x:X}, K"),
            Self::CopyRegisterToDelay(x) => write!(f, "LD DT, V{x:X}"),
            Self::CopyRegisterToSound(x) => write!(f, "LD ST, V{x:X}"),
            Self::AddToIndex(x) => write!(f, "ADD I, V{x:X}"),
            Self::PointChar(x) => write!(f, "LD F, V{x:X}"),
            Self::ToDecimal(x) => write!(f, "LD B, V{x:X}"),
            Self::StoreRegisterToMemory(x) => write!(f, "LD [I], V{x:X}"),
            Self::LoadRegisterFromMemory(x) => write!(f, "LD V{x:X}, [I]"),
            Self::Unknown(ins) => write!(f, "??? {ins:04X}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Instruction::*;
    use super::*;

    #[test]
    fn test_decode_table() {
        let cases = [
            (0x00E0, ClearScreen),
            (0x00EE, PopSubroutine),
            (0x0123, System(0x123)),
            (0x0000, System(0x000)),
            (0x1ABC, Jump(0xABC)),
            (0x2ABC, PushSubroutine(0xABC)),
            (0x3A42, SkipEqualConstant(0xA, 0x42)),
            (0x4A42, SkipNotEqualConstant(0xA, 0x42)),
            (0x5120, SkipEqualRegister(0x1, 0x2)),
            (0x6F01, SetRegister(0xF, 0x01)),
            (0x7E10, AddToRegister(0xE, 0x10)),
            (0x8120, CopyRegister(1, 2)),
            (0x8121, Or(1, 2)),
            (0x8122, And(1, 2)),
            (0x8123, XOr(1, 2)),
            (0x8124, Add(1, 2)),
            (0x8125, SubtractForward(1, 2)),
            (0x8126, RightShift(1)),
            (0x8127, SubtractBackward(1, 2)),
            (0x812E, LeftShift(1)),
            (0x9340, SkipNotEqualRegister(3, 4)),
            (0xA20A, SetIndexRegister(0x20A)),
            (0xB300, JumpWithOffset(0x300)),
            (0xC50F, Random(5, 0x0F)),
            (0xD015, Display(0, 1, 5)),
            (0xE79E, SkipIfPressed(7)),
            (0xE7A1, SkipIfNotPressed(7)),
            (0xF207, CopyDelayToRegister(2)),
            (0xF20A, GetKey(2)),
            (0xF215, CopyRegisterToDelay(2)),
            (0xF218, CopyRegisterToSound(2)),
            (0xF21E, AddToIndex(2)),
            (0xF229, PointChar(2)),
            (0xF233, ToDecimal(2)),
            (0xF255, StoreRegisterToMemory(2)),
            (0xF265, LoadRegisterFromMemory(2)),
        ];
        for (opcode, expected) in cases {
            assert_eq!(Instruction::decode(opcode), expected, "{opcode:04X}");
        }
    }

    #[test]
    fn test_decode_unknown() {
        for opcode in [0x5121, 0x912F, 0x8128, 0x812D, 0xE19F, 0xF100, 0xF1FF] {
            assert_eq!(Instruction::decode(opcode), Unknown(opcode), "{opcode:04X}");
        }
    }

    #[test]
    fn test_mnemonics() {
        assert_eq!(Instruction::decode(0x600A).to_string(), "LD V0, 0x0A");
        assert_eq!(Instruction::decode(0xD015).to_string(), "DRW V0, V1, 5");
        assert_eq!(Instruction::decode(0x1202).to_string(), "JP 202");
        assert_eq!(Instruction::decode(0xFA65).to_string(), "LD VA, [I]");
        assert_eq!(Instruction::decode(0x5121).to_string(), "??? 5121");
    }

    #[test]
    fn test_draws() {
        assert!(ClearScreen.draws());
        assert!(Display(0, 0, 1).draws());
        assert!(!Jump(0x200).draws());
    }
}
