use std::path::PathBuf;

use minifb::Scale;

pub const DEFAULT_INSTRUCTIONS_PER_SECOND: u64 = 700;
pub const MAX_INSTRUCTIONS_PER_SECOND: u64 = 1_000_000;
pub const DEFAULT_SCALE: u32 = 16;
pub const DEFAULT_HEADLESS_CYCLES: u64 = 1000;

/// Everything the driver needs to know about a run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub rom_path: PathBuf,
    pub instructions_per_second: u64,
    pub scale: u32,
    pub headless: bool,
    pub cycles: u64,
    pub dump: bool,
}

impl Settings {
    pub fn new(rom_path: impl Into<PathBuf>) -> Self {
        Self {
            rom_path: rom_path.into(),
            instructions_per_second: DEFAULT_INSTRUCTIONS_PER_SECOND,
            scale: DEFAULT_SCALE,
            headless: false,
            cycles: DEFAULT_HEADLESS_CYCLES,
            dump: false,
        }
    }

    pub fn window_scale(&self) -> Option<Scale> {
        match self.scale {
            1 => Some(Scale::X1),
            2 => Some(Scale::X2),
            4 => Some(Scale::X4),
            8 => Some(Scale::X8),
            16 => Some(Scale::X16),
            32 => Some(Scale::X32),
            _ => None,
        }
    }

    /// Cycles between two 60 Hz timer ticks, for runs without a wall clock.
    pub fn cycles_per_timer_tick(&self) -> u64 {
        (self.instructions_per_second / crate::timer::TIMER_DEC_PER_SECOND).max(1)
    }
}
