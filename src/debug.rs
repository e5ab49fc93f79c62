//! Plain-text views of machine state, for logs and post-mortems.

use crate::display::{Display, HEIGHT, WIDTH};
use crate::machine::MachineState;
use crate::memory::{Memory, MEMORY_SIZE};

/// One line per display row, `#` for lit pixels and `.` for dark ones.
pub fn dump_display(display: &Display) -> String {
    let mut out = String::with_capacity((WIDTH + 1) * HEIGHT);
    for row in 0..HEIGHT {
        for col in 0..WIDTH {
            out.push(if display.get(col, row) { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}

pub fn dump_registers(state: &MachineState) -> String {
    let mut out = String::new();
    for (i, value) in state.regs.as_slice().iter().enumerate() {
        out.push_str(&format!("V{i:X}: {value:#04X} ({value:3})\n"));
    }
    out.push_str(&format!("I:  {:#05X}\n", state.index.0));
    out.push_str(&format!("PC: {:#05X}\n", state.pc.0));
    out.push_str(&format!("SP: {}\n", state.stack_pointer()));
    out.push_str(&format!(
        "DT: {}  ST: {}\n",
        state.delay_timer.count, state.sound_timer.count
    ));
    out
}

/// Classic hex dump: address, sixteen bytes, then their printable ASCII.
/// The range is clamped to the end of memory.
pub fn dump_memory(mem: &Memory, start: usize, len: usize) -> String {
    let start = start.min(MEMORY_SIZE);
    let end = start.saturating_add(len).min(MEMORY_SIZE);
    let bytes = &mem.as_slice()[start..end];

    let mut out = String::new();
    for (line, chunk) in bytes.chunks(16).enumerate() {
        let hex: String = chunk.iter().map(|byte| format!("{byte:02X} ")).collect();
        let ascii: String = chunk
            .iter()
            .map(|byte| if (32..=126).contains(byte) { *byte as char } else { '.' })
            .collect();
        out.push_str(&format!("{:04X}  {hex:<48} {ascii}\n", start + line * 16));
    }
    out
}
