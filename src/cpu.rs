use log::{trace, warn};
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::decode::Instruction;
use crate::display::{HEIGHT, WIDTH};
use crate::error::{Chip8Error, Result};
use crate::machine::{Execution, MachineState};
use crate::memory::{glyph_addr, TypeAddr, MEMORY_SIZE};
use crate::registers::FLAG;

// highest pc that still leaves room for a two byte fetch
pub const LAST_FETCH_ADDR: TypeAddr = (MEMORY_SIZE - 2) as TypeAddr;

/// What a single call to [`Cpu::cycle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    Executed(Instruction),
    // parked on FX0A with no key held
    Waiting,
}

// holds only the random source; machine state is borrowed per cycle
pub struct Cpu<R: Rng = ThreadRng> {
    rng: R,
}

impl Cpu<ThreadRng> {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for Cpu<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Cpu<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Runs exactly one step. An `Err` is fatal for the run.
    pub fn cycle(&mut self, state: &mut MachineState) -> Result<Cycle> {
        if let Execution::AwaitingKey(vx) = state.execution {
            return Ok(Self::poll_key(state, vx));
        }

        let at = state.pc.0;
        let ins = Self::fetch_decode(state)?;
        trace!("{at:04X}  {ins}");
        self.execute_ins(state, ins, at)?;

        if state.is_awaiting_key() {
            Ok(Cycle::Waiting)
        } else {
            Ok(Cycle::Executed(ins))
        }
    }

    pub fn fetch_decode(state: &mut MachineState) -> Result<Instruction> {
        let pc = state.pc.0;
        if pc > LAST_FETCH_ADDR {
            return Err(Chip8Error::ProgramCounterOverrun { pc });
        }
        let ins = state.mem.word(pc);
        state.pc.increment();
        Ok(Instruction::decode(ins))
    }

    fn poll_key(state: &mut MachineState, vx: u8) -> Cycle {
        match state.keypad.first_pressed() {
            Some(key) => {
                trace!("key {key:X} -> V{vx:X}");
                state.regs.set_register(vx, key);
                state.execution = Execution::Running;
                Cycle::Executed(Instruction::GetKey(vx))
            }
            None => Cycle::Waiting,
        }
    }

    // `at` is where the instruction was fetched; pc has already moved past it
    pub fn execute_ins(
        &mut self,
        state: &mut MachineState,
        ins: Instruction,
        at: TypeAddr,
    ) -> Result<()> {
        let MachineState {
            mem,
            regs,
            index,
            pc,
            stack,
            delay_timer,
            sound_timer,
            display,
            keypad,
            execution,
        } = state;

        match ins {
            Instruction::ClearScreen => display.clear(),
            Instruction::PopSubroutine => {
                let addr = stack.pop().ok_or(Chip8Error::StackUnderflow { pc: at })?;
                pc.set_addr(addr);
            }
            Instruction::System(addr) => trace!("SYS {addr:03X} ignored"),
            Instruction::Jump(addr) => pc.set_addr(addr),
            Instruction::PushSubroutine(addr) => {
                // return address is the instruction after the CALL
                stack
                    .push(pc.0)
                    .ok_or(Chip8Error::StackOverflow { pc: at })?;
                pc.set_addr(addr);
            }
            Instruction::SkipEqualConstant(vx, nn) => {
                if regs.get(vx) == nn {
                    pc.increment();
                }
            }
            Instruction::SkipNotEqualConstant(vx, nn) => {
                if regs.get(vx) != nn {
                    pc.increment();
                }
            }
            Instruction::SkipEqualRegister(vx, vy) => {
                if regs.get(vx) == regs.get(vy) {
                    pc.increment();
                }
            }
            Instruction::SkipNotEqualRegister(vx, vy) => {
                if regs.get(vx) != regs.get(vy) {
                    pc.increment();
                }
            }
            Instruction::SetRegister(vx, nn) => regs.set_register(vx, nn),
            Instruction::AddToRegister(vx, nn) => regs.add_to_register(vx, nn),
            Instruction::CopyRegister(vx, vy) => regs.set_register(vx, regs.get(vy)),
            Instruction::Or(vx, vy) => regs.set_register(vx, regs.get(vx) | regs.get(vy)),
            Instruction::And(vx, vy) => regs.set_register(vx, regs.get(vx) & regs.get(vy)),
            Instruction::XOr(vx, vy) => regs.set_register(vx, regs.get(vx) ^ regs.get(vy)),
            Instruction::Add(vx, vy) => {
                let sum = regs.get(vx) as u16 + regs.get(vy) as u16;
                regs.set_register(vx, (sum & 0xFF) as u8);
                regs.set_flag(sum > 0xFF);
            }
            Instruction::SubtractForward(vx, vy) => {
                let (x, y) = (regs.get(vx), regs.get(vy));
                regs.set_register(vx, x.wrapping_sub(y));
                regs.set_flag(x > y); // no borrow
            }
            Instruction::SubtractBackward(vx, vy) => {
                let (x, y) = (regs.get(vx), regs.get(vy));
                regs.set_register(vx, y.wrapping_sub(x));
                regs.set_flag(y > x); // no borrow
            }
            Instruction::RightShift(vx) => {
                let vx_value = regs.get(vx);
                let vf = vx_value & 1;
                regs.set_register(vx, vx_value >> 1);
                regs.set_register(FLAG, vf);
            }
            Instruction::LeftShift(vx) => {
                let vx_value = regs.get(vx);
                let vf = (vx_value >> 7) & 1;
                regs.set_register(vx, vx_value << 1);
                regs.set_register(FLAG, vf);
            }
            Instruction::SetIndexRegister(addr) => index.set_addr(addr),
            Instruction::JumpWithOffset(addr) => pc.set_addr(addr + regs.get(0) as TypeAddr),
            Instruction::Random(vx, nn) => {
                let ransuu: u8 = self.rng.gen();
                regs.set_register(vx, nn & ransuu);
            }
            Instruction::Display(reg_x, reg_y, height) => {
                let x = regs.get(reg_x) as usize % WIDTH;
                let y = regs.get(reg_y) as usize % HEIGHT;
                let mut collision = false;
                for row in 0..height {
                    let sprite = mem.get(index.0.wrapping_add(row as TypeAddr));
                    collision |= display.paint_row(x, y + row as usize, sprite);
                }
                regs.set_flag(collision);
            }
            Instruction::SkipIfPressed(vx) => {
                if keypad.is_pressed(regs.get(vx)) {
                    pc.increment();
                }
            }
            Instruction::SkipIfNotPressed(vx) => {
                if !keypad.is_pressed(regs.get(vx)) {
                    pc.increment();
                }
            }
            Instruction::CopyDelayToRegister(vx) => regs.set_register(vx, delay_timer.count),
            Instruction::GetKey(vx) => match keypad.first_pressed() {
                Some(key) => regs.set_register(vx, key),
                None => *execution = Execution::AwaitingKey(vx),
            },
            Instruction::CopyRegisterToDelay(vx) => delay_timer.set(regs.get(vx)),
            Instruction::CopyRegisterToSound(vx) => sound_timer.set(regs.get(vx)),
            Instruction::AddToIndex(vx) => index.add(regs.get(vx)),
            Instruction::PointChar(vx) => index.set_addr(glyph_addr(regs.get(vx))),
            Instruction::ToDecimal(vx) => {
                let value = regs.get(vx);
                let digits = [value / 100, value / 10 % 10, value % 10];
                for (i, digit) in digits.iter().enumerate() {
                    mem.set(index.0.wrapping_add(i as TypeAddr), *digit);
                }
            }
            Instruction::StoreRegisterToMemory(vx) => {
                for reg in 0..=vx {
                    mem.set(index.0.wrapping_add(reg as TypeAddr), regs.get(reg));
                }
            }
            Instruction::LoadRegisterFromMemory(vx) => {
                for reg in 0..=vx {
                    regs.set_register(reg, mem.get(index.0.wrapping_add(reg as TypeAddr)));
                }
            }
            Instruction::Unknown(opcode) => {
                warn!("unknown instruction {opcode:04X} at {at:#05X}, skipping");
            }
        }
        Ok(())
    }
}
