//! Mapper identification.
//!
//! The mapper number picks the memory-banking hardware the cartridge needs.
//! Emulation of those boards is a different concern; this module only maps
//! the number to a display name for reporting.

use phf::phf_map;

/// Name reported for mapper numbers missing from the table.
pub const UNKNOWN_MAPPER: &str = "Unknown/Custom";

/// Well-known iNES mapper numbers and the boards they designate.
/// Hundreds more are assigned; unknowns resolve to [`UNKNOWN_MAPPER`].
static MAPPER_NAMES: phf::Map<u16, &'static str> = phf_map! {
    0u16 => "NROM",
    1u16 => "MMC1 (SxROM)",
    2u16 => "UNROM (UxROM)",
    3u16 => "CNROM (CxROM)",
    4u16 => "MMC3 (TxROM)",
    5u16 => "MMC5 (ExROM)",
    7u16 => "AOROM (AxROM)",
    9u16 => "MMC2 (PxROM)",
    10u16 => "MMC4 (FxROM)",
    11u16 => "Color Dreams",
    13u16 => "CPROM",
    15u16 => "100-in-1",
    66u16 => "GxROM/MxROM",
    69u16 => "FME-7 / Sunsoft 5",
    71u16 => "Camerica (BF909x)",
    73u16 => "VRC3",
    75u16 => "VRC1",
    76u16 => "VRC4",
    78u16 => "Irem 74HC161/32",
    79u16 => "NINA-003/006",
    85u16 => "VRC7",
    87u16 => "VRC2",
    94u16 => "HVC-UN1ROM",
    118u16 => "TxSROM",
    119u16 => "TQROM",
    210u16 => "Namco 129/163",
};

/// Resolve a mapper number to a human readable board name.
pub fn mapper_name(mapper: u16) -> &'static str {
    MAPPER_NAMES.get(&mapper).copied().unwrap_or(UNKNOWN_MAPPER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_well_known_mappers() {
        assert_eq!(mapper_name(0), "NROM");
        assert_eq!(mapper_name(1), "MMC1 (SxROM)");
        assert_eq!(mapper_name(4), "MMC3 (TxROM)");
        assert_eq!(mapper_name(210), "Namco 129/163");
    }

    #[test]
    fn unknown_mappers_get_the_sentinel() {
        assert_eq!(mapper_name(6), UNKNOWN_MAPPER);
        assert_eq!(mapper_name(4095), UNKNOWN_MAPPER);
    }
}
