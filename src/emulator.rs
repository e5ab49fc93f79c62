use std::thread;

use log::{debug, info};

use crate::config::Settings;
use crate::cpu::{Cpu, Cycle};
use crate::error::Result;
use crate::machine::MachineState;
use crate::timer::{Cadence, TIMER_DEC_PER_SECOND};
use crate::window::FrameBuffer;

// upper bound on cycles caught up in one pass after a stall
const MAX_CATCH_UP: u32 = 64;

// owns the machine; cycles at a fixed rate, timers at 60 Hz
pub struct Emulator {
    pub state: MachineState,
    cpu: Cpu,
    fb: Option<FrameBuffer>,
    settings: Settings,
    cycles: u64,
}

impl Emulator {
    pub fn init(rom: &[u8], settings: Settings) -> Result<Self> {
        let state = MachineState::with_program(rom)?;
        debug!(
            "emulator ready: {} instructions/s, {} cycles per timer tick",
            settings.instructions_per_second,
            settings.cycles_per_timer_tick()
        );
        Ok(Self {
            state,
            cpu: Cpu::new(),
            fb: None,
            settings,
            cycles: 0,
        })
    }

    pub fn attach_window(&mut self, fb: FrameBuffer) {
        self.fb = Some(fb);
    }

    pub fn is_running(&self) -> bool {
        self.fb.as_ref().map_or(true, |fb| fb.is_open())
    }

    // errors are left to the caller to report
    pub fn tick(&mut self) -> Result<Cycle> {
        let cycle = self.cpu.cycle(&mut self.state)?;
        self.cycles += 1;
        Ok(cycle)
    }

    pub fn sync_timers(&mut self) {
        self.state.tick_timers();
    }

    pub fn sync_keys(&mut self) {
        if let Some(fb) = &self.fb {
            self.state.set_keypad(fb.keypad().as_array());
        }
    }

    pub fn sync_display(&mut self) -> Result<()> {
        if let Some(fb) = &mut self.fb {
            fb.sync(&self.state.display)?;
        }
        Ok(())
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Runs a fixed number of cycles without a wall clock, ticking the timers
    /// once every `cycles_per_timer_tick` executed cycles. Stops early if the
    /// window closes.
    pub fn run_for(&mut self, cycles: u64) -> Result<u64> {
        let per_tick = self.settings.cycles_per_timer_tick();
        for _ in 0..cycles {
            if !self.is_running() {
                break;
            }
            self.tick()?;
            if self.cycles % per_tick == 0 {
                self.sync_timers();
            }
        }
        info!("ran {} cycles", self.cycles);
        Ok(self.cycles)
    }

    // real-time loop, until the window closes or a fatal error
    pub fn run(&mut self) -> Result<()> {
        let mut cpu_clock = Cadence::per_second(self.settings.instructions_per_second);
        let mut timer_clock = Cadence::per_second(TIMER_DEC_PER_SECOND);
        let mut dirty = true;

        while self.is_running() {
            self.sync_keys();

            for _ in 0..cpu_clock.due().min(MAX_CATCH_UP) {
                if let Cycle::Executed(ins) = self.tick()? {
                    dirty |= ins.draws();
                }
            }

            let timer_ticks = timer_clock.due();
            for _ in 0..timer_ticks {
                self.sync_timers();
            }
            if timer_ticks > 0 {
                if dirty || self.state.is_awaiting_key() {
                    self.sync_display()?;
                    dirty = false;
                } else if let Some(fb) = &mut self.fb {
                    // keep the event queue moving
                    fb.window.update();
                }
            } else {
                thread::sleep(cpu_clock.interval());
            }
        }
        info!("window closed after {} cycles", self.cycles);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Chip8Error;

    fn settings(ips: u64) -> Settings {
        Settings {
            instructions_per_second: ips,
            ..Settings::new("test.ch8")
        }
    }

    #[test]
    fn test_run_for_ticks_timers() {
        // 200: LD V0, 0x3C; 202: LD DT, V0; 204: JP 204
        let rom = [0x60, 0x3C, 0xF0, 0x15, 0x12, 0x04];
        let mut emu = Emulator::init(&rom, settings(600)).unwrap();
        emu.run_for(2).unwrap();
        assert_eq!(emu.state.delay_timer.count, 60);
        // ticks land on cycles 10 and 20
        emu.run_for(18).unwrap();
        assert_eq!(emu.cycles(), 20);
        assert_eq!(emu.state.delay_timer.count, 58);
    }

    #[test]
    fn test_fatal_error_stops_run() {
        // JP FFF
        let rom = [0x1F, 0xFF];
        let mut emu = Emulator::init(&rom, settings(700)).unwrap();
        let err = emu.run_for(10).unwrap_err();
        assert!(matches!(
            err,
            Chip8Error::ProgramCounterOverrun { pc: 0xFFF }
        ));
        assert_eq!(emu.cycles(), 1);
    }

    #[test]
    fn test_init_rejects_oversized_rom() {
        let rom = vec![0u8; 5000];
        assert!(matches!(
            Emulator::init(&rom, settings(700)),
            Err(Chip8Error::RomTooLarge { .. })
        ));
    }

    #[test]
    fn test_headless_is_always_running() {
        let emu = Emulator::init(&[], settings(700)).unwrap();
        assert!(emu.is_running());
    }
}
