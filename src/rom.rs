use std::fs;
use std::path::Path;

use log::info;

use crate::error::{Chip8Error, Result};
use crate::memory::MAX_PROGRAM_SIZE;

/// Reads a program image from disk, refusing anything that would not fit
/// between 0x200 and the end of memory.
pub fn read_rom<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let size = fs::metadata(path)?.len() as usize;
    check_size(size)?;

    let program = fs::read(path)?;
    // the file may have grown between the two calls
    check_size(program.len())?;

    info!("read {} byte ROM from {}", program.len(), path.display());
    Ok(program)
}

fn check_size(size: usize) -> Result<()> {
    if size > MAX_PROGRAM_SIZE {
        return Err(Chip8Error::RomTooLarge {
            size,
            max_size: MAX_PROGRAM_SIZE,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_file(name: &str, bytes: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("emuchip-{}-{name}", std::process::id()));
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_read_rom() {
        let path = scratch_file("ok.ch8", &[0x60, 0x0A, 0x12, 0x02]);
        let rom = read_rom(&path).unwrap();
        assert_eq!(rom, vec![0x60, 0x0A, 0x12, 0x02]);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_read_rom_too_large() {
        let path = scratch_file("big.ch8", &[0u8; MAX_PROGRAM_SIZE + 1]);
        let err = read_rom(&path).unwrap_err();
        assert!(matches!(err, Chip8Error::RomTooLarge { size: 3585, .. }));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_read_rom_missing() {
        let err = read_rom("/definitely/not/here.ch8").unwrap_err();
        assert!(matches!(err, Chip8Error::Io(_)));
    }
}
