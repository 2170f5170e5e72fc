use nescart_core::cartridge::header::{
    ConsoleType, Header, Mirroring, NES_HEADER_LEN, RomFormat, TvSystem,
};
use nescart_core::error::Error;
use proptest::prelude::*;

fn blank_header() -> [u8; NES_HEADER_LEN] {
    let mut bytes = [0u8; NES_HEADER_LEN];
    bytes[..4].copy_from_slice(b"NES\x1A");
    bytes
}

fn ram_decode(nibble: u8) -> usize {
    if nibble == 0 { 0 } else { 64usize << nibble }
}

proptest! {
    #[test]
    fn short_buffers_never_parse(data in prop::collection::vec(any::<u8>(), 0..16)) {
        let err = Header::parse(&data).unwrap_err();
        let is_too_short = matches!(err, Error::TooShort { actual } if actual == data.len());
        prop_assert!(is_too_short);
    }

    #[test]
    fn wrong_magic_is_rejected(data in prop::collection::vec(any::<u8>(), 16..64)) {
        prop_assume!(&data[..4] != b"NES\x1A");
        let err = Header::parse(&data).unwrap_err();
        prop_assert!(matches!(err, Error::BadMagic));
    }

    #[test]
    fn format_detection_uses_only_the_detection_field(
        mut data in prop::collection::vec(any::<u8>(), 16..32),
        detection in 0u8..4,
    ) {
        data[..4].copy_from_slice(b"NES\x1A");
        data[7] = (data[7] & !0b0000_1100) | (detection << 2);

        let header = Header::parse(&data).unwrap();
        let expected = if detection == 0b10 {
            RomFormat::Nes20
        } else {
            RomFormat::INes
        };
        prop_assert_eq!(header.format, expected);
    }

    #[test]
    fn ram_nibbles_decode_monotonically(
        prg in 0u8..16,
        prg_nv in 0u8..16,
        chr in 0u8..16,
        chr_nv in 0u8..16,
    ) {
        let mut bytes = blank_header();
        bytes[7] = 0b0000_1000;
        bytes[10] = prg | (prg_nv << 4);
        bytes[11] = chr | (chr_nv << 4);

        let header = Header::parse(&bytes).unwrap();
        prop_assert_eq!(header.prg_ram_size, ram_decode(prg));
        prop_assert_eq!(header.prg_nvram_size, ram_decode(prg_nv));
        prop_assert_eq!(header.chr_ram_size, ram_decode(chr));
        prop_assert_eq!(header.chr_nvram_size, ram_decode(chr_nv));
    }

    #[test]
    fn ines_header_roundtrip(
        mapper in 0u16..256,
        prg_units in any::<u8>(),
        chr_units in any::<u8>(),
        prg_ram_units in any::<u8>(),
        vertical in any::<bool>(),
        battery in any::<bool>(),
        trainer in any::<bool>(),
        four_screen in any::<bool>(),
        console in 0u8..4,
        pal in any::<bool>(),
    ) {
        let mut bytes = blank_header();
        bytes[4] = prg_units;
        bytes[5] = chr_units;
        bytes[6] = ((mapper & 0x0F) as u8) << 4
            | (vertical as u8)
            | ((battery as u8) << 1)
            | ((trainer as u8) << 2)
            | ((four_screen as u8) << 3);
        bytes[7] = (mapper & 0xF0) as u8 | console;
        bytes[8] = prg_ram_units;
        bytes[9] = pal as u8;

        let header = Header::parse(&bytes).unwrap();

        prop_assert_eq!(header.format, RomFormat::INes);
        prop_assert_eq!(header.mapper, mapper);
        prop_assert_eq!(header.submapper, 0);
        prop_assert_eq!(header.prg_rom_size, prg_units as usize * 16 * 1024);
        prop_assert_eq!(header.chr_rom_size, chr_units as usize * 8 * 1024);
        prop_assert_eq!(header.battery_backed, battery);
        prop_assert_eq!(header.trainer_present, trainer);

        let mirroring = if four_screen {
            Mirroring::FourScreen
        } else if vertical {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };
        prop_assert_eq!(header.mirroring, mirroring);

        let console_type = match console {
            0 => ConsoleType::Standard,
            1 => ConsoleType::VsSystem,
            2 => ConsoleType::PlayChoice10,
            _ => ConsoleType::Extended,
        };
        prop_assert_eq!(header.console_type, console_type);

        let tv = if pal { TvSystem::Pal } else { TvSystem::Ntsc };
        prop_assert_eq!(header.tv_system, tv);

        let prg_ram = if prg_ram_units != 0 {
            prg_ram_units as usize * 8 * 1024
        } else if mapper == 1 || mapper == 4 {
            8 * 1024
        } else {
            0
        };
        prop_assert_eq!(header.prg_ram_size, prg_ram);
        prop_assert_eq!(header.prg_nvram_size, 0);
        prop_assert_eq!(
            header.chr_ram_size,
            if chr_units == 0 { 8 * 1024 } else { 0 }
        );
        prop_assert_eq!(header.chr_nvram_size, 0);

        // No hidden state: a second parse of the same buffer is identical.
        prop_assert_eq!(header, Header::parse(&bytes).unwrap());
    }

    #[test]
    fn nes20_header_roundtrip(
        mapper in 0u16..4096,
        submapper in 0u8..16,
        prg_units in 0u16..4096,
        chr_units in 0u16..4096,
        tv in 0u8..4,
    ) {
        let mut bytes = blank_header();
        bytes[4] = (prg_units & 0xFF) as u8;
        bytes[5] = (chr_units & 0xFF) as u8;
        bytes[6] = ((mapper & 0x0F) as u8) << 4;
        bytes[7] = (((mapper >> 4) & 0x0F) as u8) << 4 | 0b0000_1000;
        bytes[8] = (submapper << 4) | ((mapper >> 8) as u8 & 0x0F);
        bytes[9] = (((chr_units >> 8) as u8 & 0x0F) << 4) | ((prg_units >> 8) as u8 & 0x0F);
        bytes[12] = tv;

        let header = Header::parse(&bytes).unwrap();

        prop_assert_eq!(header.format, RomFormat::Nes20);
        prop_assert_eq!(header.mapper, mapper);
        prop_assert_eq!(header.submapper, submapper);
        prop_assert_eq!(header.prg_rom_size, prg_units as usize * 16 * 1024);
        prop_assert_eq!(header.chr_rom_size, chr_units as usize * 8 * 1024);

        let tv_system = match tv {
            0 => TvSystem::Ntsc,
            1 => TvSystem::Pal,
            2 => TvSystem::Multi,
            _ => TvSystem::Unknown,
        };
        prop_assert_eq!(header.tv_system, tv_system);

        prop_assert_eq!(header, Header::parse(&bytes).unwrap());
    }
}
