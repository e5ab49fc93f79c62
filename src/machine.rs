use log::debug;

use crate::display::Display;
use crate::error::Result;
use crate::keyboard::{Keypad, KEY_COUNT};
use crate::memory::{Memory, Stack};
use crate::registers::{IndexRegister, ProgramCounter, Registers};
use crate::timer::Timer;

// whether the next cycle fetches or polls the keypad for FX0A
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Execution {
    #[default]
    Running,
    AwaitingKey(u8),
}

/// Everything a CHIP-8 program can observe or change.
///
/// Built once per run. All mutation during a run goes through
/// [`crate::cpu::Cpu::cycle`]; the driver only touches the keypad latches
/// and the two timers.
pub struct MachineState {
    pub mem: Memory,
    pub regs: Registers,
    pub index: IndexRegister,
    pub pc: ProgramCounter,
    pub stack: Stack,
    pub delay_timer: Timer,
    pub sound_timer: Timer,
    pub display: Display,
    pub keypad: Keypad,
    pub execution: Execution,
}

impl MachineState {
    pub fn new() -> Self {
        Self {
            mem: Memory::new(),
            regs: Registers::new(),
            index: IndexRegister::default(),
            pc: ProgramCounter::default(),
            stack: Stack::new(),
            delay_timer: Timer::default(),
            sound_timer: Timer::default(),
            display: Display::new(),
            keypad: Keypad::new(),
            execution: Execution::Running,
        }
    }

    // power-on: everything zeroed, font installed, pc at 0x200
    pub fn initialize(&mut self) {
        self.mem.reset();
        self.regs.reset();
        self.index = IndexRegister::default();
        self.pc = ProgramCounter::default();
        self.stack.reset();
        self.delay_timer = Timer::default();
        self.sound_timer = Timer::default();
        self.display.clear();
        self.keypad.reset();
        self.execution = Execution::Running;
    }

    // oversized images are rejected without touching memory
    pub fn load_program(&mut self, rom: &[u8]) -> Result<()> {
        self.mem.load_rom(rom)?;
        debug!("loaded {} byte program at {:#05X}", rom.len(), self.pc.0);
        Ok(())
    }

    pub fn with_program(rom: &[u8]) -> Result<Self> {
        let mut state = Self::new();
        state.load_program(rom)?;
        Ok(state)
    }

    pub fn set_keypad(&mut self, keys: [bool; KEY_COUNT]) {
        self.keypad.set_all(keys);
    }

    pub fn tick_timers(&mut self) {
        self.delay_timer.tick();
        self.sound_timer.tick();
    }

    pub fn stack_pointer(&self) -> usize {
        self.stack.pointer()
    }

    pub fn is_awaiting_key(&self) -> bool {
        matches!(self.execution, Execution::AwaitingKey(_))
    }
}

impl Default for MachineState {
    fn default() -> Self {
        Self::new()
    }
}
