use minifb::Key;

pub const KEY_COUNT: usize = 16;

// conventional layout: the left-hand 4x4 block of a QWERTY keyboard
//   1 2 3 C      1 2 3 4
//   4 5 6 D      Q W E R
//   7 8 9 E      A S D F
//   A 0 B F      Z X C V
pub const KEYMAP: [(Key, u8); KEY_COUNT] = [
    (Key::X, 0x0),
    (Key::Key1, 0x1),
    (Key::Key2, 0x2),
    (Key::Key3, 0x3),
    (Key::Q, 0x4),
    (Key::W, 0x5),
    (Key::E, 0x6),
    (Key::A, 0x7),
    (Key::S, 0x8),
    (Key::D, 0x9),
    (Key::Z, 0xA),
    (Key::C, 0xB),
    (Key::Key4, 0xC),
    (Key::R, 0xD),
    (Key::F, 0xE),
    (Key::V, 0xF),
];

pub fn key_to_num(key: Key) -> Option<u8> {
    KEYMAP
        .iter()
        .find(|(mapped, _)| *mapped == key)
        .map(|(_, num)| *num)
}

/// The sixteen key latches, rewritten by the input side before each cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self {
            keys: [false; KEY_COUNT],
        }
    }

    pub fn reset(&mut self) {
        self.keys = [false; KEY_COUNT];
    }

    pub fn set_all(&mut self, keys: [bool; KEY_COUNT]) {
        self.keys = keys;
    }

    pub fn press(&mut self, n: u8) {
        self.keys[(n & 0xF) as usize] = true;
    }

    pub fn release(&mut self, n: u8) {
        self.keys[(n & 0xF) as usize] = false;
    }

    // only the low nibble selects a key
    pub fn is_pressed(&self, n: u8) -> bool {
        self.keys[(n & 0xF) as usize]
    }

    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|down| *down).map(|n| n as u8)
    }

    pub fn from_keys(keys: &[Key]) -> Self {
        let mut keypad = Self::new();
        for num in keys.iter().filter_map(|key| key_to_num(*key)) {
            keypad.press(num);
        }
        keypad
    }

    pub fn as_array(&self) -> [bool; KEY_COUNT] {
        self.keys
    }
}
