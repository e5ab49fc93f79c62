use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use env_logger::Env;
use log::info;

use emuchip::config::{
    Settings, DEFAULT_HEADLESS_CYCLES, DEFAULT_INSTRUCTIONS_PER_SECOND, DEFAULT_SCALE,
    MAX_INSTRUCTIONS_PER_SECOND,
};
use emuchip::debug::{dump_display, dump_memory, dump_registers};
use emuchip::emulator::Emulator;
use emuchip::memory::PROGRAM_START;
use emuchip::rom::read_rom;
use emuchip::window::FrameBuffer;

// Keypad:        Keyboard:
// 1 2 3 C        1 2 3 4
// 4 5 6 D        Q W E R
// 7 8 9 E        A S D F
// A 0 B F        Z X C V

#[derive(Parser, Debug)]
#[command(version, about = "A CHIP-8 interpreter", long_about = None)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Instructions per second
    #[arg(long, default_value_t = DEFAULT_INSTRUCTIONS_PER_SECOND,
          value_parser = clap::value_parser!(u64).range(1..=MAX_INSTRUCTIONS_PER_SECOND))]
    ips: u64,

    /// Window scale factor: 1, 2, 4, 8, 16 or 32
    #[arg(long, default_value_t = DEFAULT_SCALE)]
    scale: u32,

    /// Run without a window for a fixed number of cycles
    #[arg(long)]
    headless: bool,

    /// Cycles to run in headless mode
    #[arg(long, default_value_t = DEFAULT_HEADLESS_CYCLES)]
    cycles: u64,

    /// Print display, registers and program memory on exit
    #[arg(long)]
    dump: bool,
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        Settings {
            rom_path: args.rom,
            instructions_per_second: args.ips,
            scale: args.scale,
            headless: args.headless,
            cycles: args.cycles,
            dump: args.dump,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings = Settings::from(Args::parse());
    let rom = read_rom(&settings.rom_path)
        .with_context(|| format!("failed to load {}", settings.rom_path.display()))?;
    let mut emu = Emulator::init(&rom, settings.clone())?;

    let outcome = if settings.headless {
        emu.run_for(settings.cycles).map(|_| ())
    } else {
        let Some(scale) = settings.window_scale() else {
            bail!("unsupported scale {}, expected 1, 2, 4, 8, 16 or 32", settings.scale);
        };
        emu.attach_window(FrameBuffer::new(scale).context("failed to open window")?);
        emu.run()
    };

    if settings.dump {
        print!("{}", dump_display(&emu.state.display));
        print!("{}", dump_registers(&emu.state));
        print!(
            "{}",
            dump_memory(&emu.state.mem, PROGRAM_START as usize, rom.len())
        );
    }

    let cycles = emu.cycles();
    outcome.with_context(|| format!("stopped after {cycles} cycles"))?;
    info!("exiting after {cycles} cycles");
    Ok(())
}
