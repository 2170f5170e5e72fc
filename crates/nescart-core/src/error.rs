use std::fmt;

use crate::cartridge::TRAINER_SIZE;
use crate::cartridge::header::NES_HEADER_LEN;

/// Identifies which ROM region came up short while slicing a cartridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RomRegion {
    Prg,
    Chr,
}

impl fmt::Display for RomRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prg => write!(f, "PRG ROM"),
            Self::Chr => write!(f, "CHR ROM"),
        }
    }
}

#[derive(Debug)]
pub enum Error {
    /// Provided buffer is shorter than the 16-byte header.
    TooShort { actual: usize },
    /// Magic number ("NES<EOF>") is missing.
    BadMagic,
    /// Header declares a trainer but the file ends inside the 512-byte block.
    TruncatedTrainer { actual: usize },
    /// A ROM region is shorter than the size the header declares.
    TruncatedRom {
        region: RomRegion,
        expected: usize,
        actual: usize,
    },
    /// Wrapper for I/O errors raised while reading ROMs from disk.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { actual } => {
                write!(f, "header expected {NES_HEADER_LEN} bytes, got {actual}")
            }
            Self::BadMagic => write!(f, "missing NES magic bytes"),
            Self::TruncatedTrainer { actual } => {
                write!(f, "trainer expected {TRAINER_SIZE} bytes, got {actual}")
            }
            Self::TruncatedRom {
                region,
                expected,
                actual,
            } => write!(f, "{region} section expected {expected} bytes, got {actual}"),
            Self::Io(err) => write!(f, "i/o error while reading cartridge: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
