//! iNES / NES 2.0 header decoding.
//!
//! The first 16 bytes of every `.nes` ROM describe how much PRG/CHR data the
//! cartridge exposes, which mapper is required, and a few compatibility
//! flags. Modern dumps may use the extended **NES 2.0** flavour of the
//! header, so the parser in this module understands both variants and
//! presents the data in a single [`Header`] structure.
//!
//! # Quick overview
//! - Pass (at least) the first 16 bytes of the file to [`Header::parse`].
//! - Inspect `header.mapper` to identify the board, optionally resolving a
//!   display name via [`super::mapper::mapper_name`].
//! - Use `header.prg_rom_size` / `header.chr_rom_size` to slice the raw
//!   PRG/CHR sections out of the file (see [`super::Cartridge::load`]).
//!
//! Undersized or damaged headers turn into a descriptive
//! [`Error`](crate::error::Error).

use std::fmt;

use bitflags::bitflags;

use crate::error::Error;

const NES_MAGIC: &[u8; 4] = b"NES\x1A";

/// Size of the fixed iNES header in bytes.
pub const NES_HEADER_LEN: usize = 16;

/// iNES 1.0 mappers assumed to carry 8 KiB of onboard PRG RAM when header
/// byte 8 stores zero. Legacy dumps of MMC1/MMC3 boards rarely fill the
/// field in, so this is a loading policy rather than a hardware fact.
const IMPLICIT_PRG_RAM_MAPPERS: &[u16] = &[1, 4];

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags6: u8 {
        const MIRRORING        = 0b0000_0001;
        const BATTERY          = 0b0000_0010;
        const TRAINER          = 0b0000_0100;
        const FOUR_SCREEN      = 0b0000_1000;
        const MAPPER_LOW_MASK  = 0b1111_0000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags7: u8 {
        const CONSOLE_TYPE_MASK = 0b0000_0011;
        const NES2_DETECTION    = 0b0000_1100;
        const MAPPER_HIGH_MASK  = 0b1111_0000;
    }
}

/// Layout mirroring type for the PPU nametables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mirroring {
    /// Two horizontal nametables that mirror vertically.
    Horizontal,
    /// Two vertical nametables that mirror horizontally.
    Vertical,
    /// Cartridge supplies its own four nametables.
    FourScreen,
}

impl fmt::Display for Mirroring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "Horizontal"),
            Self::Vertical => write!(f, "Vertical"),
            Self::FourScreen => write!(f, "Four-screen VRAM"),
        }
    }
}

/// Identifies the header flavour encountered.
///
/// Detection looks only at bits 2-3 of flags 7: `0b10` selects NES 2.0 and
/// every other value is read as iNES 1.0, including dumps that predate the
/// iNES standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RomFormat {
    /// The original iNES 1.0 specification.
    INes,
    /// NES 2.0 with extended sizing and metadata fields.
    Nes20,
}

impl RomFormat {
    fn from_flags7(flags7: Flags7) -> Self {
        match (flags7.bits() >> 2) & 0b11 {
            0b10 => Self::Nes20,
            _ => Self::INes,
        }
    }
}

impl fmt::Display for RomFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::INes => write!(f, "iNES 1.0"),
            Self::Nes20 => write!(f, "NES 2.0"),
        }
    }
}

/// Console type advertised by the two low bits of flags 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleType {
    /// Standard NES/Famicom cartridge.
    Standard,
    /// Vs. System arcade hardware.
    VsSystem,
    /// PlayChoice-10 hardware.
    PlayChoice10,
    /// NES 2.0 extended console type; the concrete machine lives in header
    /// byte 13, which this parser leaves undecoded.
    Extended,
}

impl ConsoleType {
    fn from_flags7(flags7: Flags7) -> Self {
        match flags7.bits() & 0b11 {
            0 => Self::Standard,
            1 => Self::VsSystem,
            2 => Self::PlayChoice10,
            3 => Self::Extended,
            _ => unreachable!("masked to 2 bits"),
        }
    }
}

impl fmt::Display for ConsoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "Standard NES/Famicom"),
            Self::VsSystem => write!(f, "Vs. System"),
            Self::PlayChoice10 => write!(f, "PlayChoice-10"),
            Self::Extended => write!(f, "Extended"),
        }
    }
}

/// Video timing hints embedded in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TvSystem {
    /// NTSC (60Hz) timing.
    Ntsc,
    /// PAL (50Hz) timing.
    Pal,
    /// Cartridge can run on either timing without modification.
    Multi,
    Unknown,
}

impl fmt::Display for TvSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ntsc => write!(f, "NTSC"),
            Self::Pal => write!(f, "PAL"),
            Self::Multi => write!(f, "Multi-region"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// High level representation of an iNES / NES 2.0 cartridge header.
///
/// Produced once per [`Header::parse`] call and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    /// Detected header flavour.
    pub format: RomFormat,
    /// Mapper ID (0 == NROM, 1 == MMC1, ...). 8 bits wide for iNES 1.0,
    /// 12 bits for NES 2.0.
    pub mapper: u16,
    /// NES 2.0 submapper value. Always 0 for legacy iNES files.
    pub submapper: u8,
    /// How the PPU nametables are mirrored.
    pub mirroring: Mirroring,
    /// Battery bit indicates the cartridge keeps RAM contents when powered off.
    pub battery_backed: bool,
    /// Whether the optional 512 byte trainer block is present between the header and PRG data.
    pub trainer_present: bool,
    /// Amount of PRG ROM in bytes. Always a multiple of 16 KiB.
    pub prg_rom_size: usize,
    /// Amount of CHR ROM in bytes. Always a multiple of 8 KiB; zero means
    /// the cartridge drives CHR out of writable memory instead.
    pub chr_rom_size: usize,
    /// Volatile PRG RAM size (CPU accessible).
    pub prg_ram_size: usize,
    /// Battery backed PRG RAM size. Only NES 2.0 can declare one.
    pub prg_nvram_size: usize,
    /// Volatile CHR RAM size located on the PPU side.
    pub chr_ram_size: usize,
    /// Battery backed CHR RAM size. Only NES 2.0 can declare one.
    pub chr_nvram_size: usize,
    /// Console type advertised by flags 7.
    pub console_type: ConsoleType,
    /// Region / timing hints described in the header.
    pub tv_system: TvSystem,
}

impl Header {
    /// Parse an iNES header from the given byte slice.
    ///
    /// Only the first 16 bytes are inspected; callers may pass the whole
    /// file. Fails with [`Error::TooShort`] before any field is decoded
    /// when fewer than 16 bytes are available.
    pub fn parse(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < NES_HEADER_LEN {
            return Err(Error::TooShort {
                actual: bytes.len(),
            });
        }

        if &bytes[0..4] != NES_MAGIC {
            return Err(Error::BadMagic);
        }

        let flags6 = Flags6::from_bits_truncate(bytes[6]);
        let flags7 = Flags7::from_bits_truncate(bytes[7]);

        let header = match RomFormat::from_flags7(flags7) {
            RomFormat::INes => Self::parse_ines(bytes, flags6, flags7),
            RomFormat::Nes20 => Self::parse_nes20(bytes, flags6, flags7),
        };
        Ok(header)
    }

    fn parse_ines(bytes: &[u8], flags6: Flags6, flags7: Flags7) -> Self {
        let mapper = combine_mapper(flags6, flags7, 0);
        let chr_rom_units = bytes[5] as usize;

        let prg_ram_units = bytes[8] as usize;
        let prg_ram_size = if prg_ram_units != 0 {
            prg_ram_units * 8 * 1024
        } else if IMPLICIT_PRG_RAM_MAPPERS.contains(&mapper) {
            8 * 1024
        } else {
            0
        };

        let tv_system = if bytes[9] & 0b1 == 0 {
            TvSystem::Ntsc
        } else {
            TvSystem::Pal
        };

        Self {
            format: RomFormat::INes,
            mapper,
            submapper: 0,
            mirroring: resolve_mirroring(flags6),
            battery_backed: flags6.contains(Flags6::BATTERY),
            trainer_present: flags6.contains(Flags6::TRAINER),
            prg_rom_size: bytes[4] as usize * 16 * 1024,
            chr_rom_size: chr_rom_units * 8 * 1024,
            prg_ram_size,
            // iNES 1.0 has no NVRAM fields.
            prg_nvram_size: 0,
            // No CHR ROM units declared means the board carries 8 KiB CHR RAM.
            chr_ram_size: if chr_rom_units == 0 { 8 * 1024 } else { 0 },
            chr_nvram_size: 0,
            console_type: ConsoleType::from_flags7(flags7),
            tv_system,
        }
    }

    fn parse_nes20(bytes: &[u8], flags6: Flags6, flags7: Flags7) -> Self {
        let prg_msb = bytes[9] & 0x0F;
        let chr_msb = bytes[9] >> 4;

        let tv_system = match bytes[12] & 0b11 {
            0b00 => TvSystem::Ntsc,
            0b01 => TvSystem::Pal,
            0b10 => TvSystem::Multi,
            _ => TvSystem::Unknown,
        };

        Self {
            format: RomFormat::Nes20,
            mapper: combine_mapper(flags6, flags7, bytes[8] & 0x0F),
            submapper: bytes[8] >> 4,
            mirroring: resolve_mirroring(flags6),
            battery_backed: flags6.contains(Flags6::BATTERY),
            trainer_present: flags6.contains(Flags6::TRAINER),
            prg_rom_size: nes20_rom_size(bytes[4], prg_msb, 16 * 1024),
            chr_rom_size: nes20_rom_size(bytes[5], chr_msb, 8 * 1024),
            prg_ram_size: nes20_ram_size(bytes[10] & 0x0F),
            prg_nvram_size: nes20_ram_size(bytes[10] >> 4),
            chr_ram_size: nes20_ram_size(bytes[11] & 0x0F),
            chr_nvram_size: nes20_ram_size(bytes[11] >> 4),
            console_type: ConsoleType::from_flags7(flags7),
            tv_system,
        }
    }
}

fn resolve_mirroring(flags6: Flags6) -> Mirroring {
    if flags6.contains(Flags6::FOUR_SCREEN) {
        Mirroring::FourScreen
    } else if flags6.contains(Flags6::MIRRORING) {
        Mirroring::Vertical
    } else {
        Mirroring::Horizontal
    }
}

fn combine_mapper(flags6: Flags6, flags7: Flags7, upper: u8) -> u16 {
    let lower = (flags6.bits() >> 4) as u16;
    let middle = (flags7.bits() & 0xF0) as u16;
    let upper = (upper as u16) << 8;
    lower | middle | upper
}

/// Combine the iNES unit count with its NES 2.0 extension nibble.
///
/// The nibble always extends the unit count numerically, giving a 12-bit
/// count; the `0xF` exponent-multiplier encoding used by some NES 2.0
/// decoders is intentionally not applied.
fn nes20_rom_size(lsb: u8, msb: u8, unit: usize) -> usize {
    (((msb as usize) << 8) | lsb as usize) * unit
}

/// NES 2.0 RAM/NVRAM nibble: 0 means absent, otherwise `64 << nibble` bytes.
fn nes20_ram_size(nibble: u8) -> usize {
    if nibble == 0 { 0 } else { 64usize << nibble }
}
