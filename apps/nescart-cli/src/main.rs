use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use nescart_core::{
    Cartridge,
    cartridge::{header::RomFormat, load_cartridge_from_file, mapper::mapper_name},
    display::format_size,
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Nescart cartridge inspector
#[derive(Parser, Debug)]
#[command(name = "nescart")]
#[command(about = "Inspect iNES / NES 2.0 cartridge headers", long_about = None)]
struct Args {
    /// Path to the NES ROM file
    #[arg(required = true)]
    rom: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: Level,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let cartridge = load_cartridge_from_file(&args.rom)
        .with_context(|| format!("failed to load {}", args.rom.display()))?;

    print_report(&args.rom, &cartridge);
    Ok(())
}

fn print_report(path: &Path, cartridge: &Cartridge) {
    let h = cartridge.header();

    println!("File:       {}", path.display());
    println!("Format:     {}", h.format);
    match h.format {
        RomFormat::INes => println!("Mapper:     {} ({})", h.mapper, mapper_name(h.mapper)),
        RomFormat::Nes20 => println!(
            "Mapper:     {} ({})  submapper {}",
            h.mapper,
            mapper_name(h.mapper),
            h.submapper
        ),
    }

    let chr_note = if h.chr_rom_size == 0 {
        "  (uses CHR-RAM)"
    } else {
        ""
    };
    println!("PRG-ROM:    {}", format_size(h.prg_rom_size));
    println!("CHR-ROM:    {}{}", format_size(h.chr_rom_size), chr_note);
    println!("PRG-RAM:    {}", format_size(h.prg_ram_size));
    println!("PRG-NVRAM:  {}", format_size(h.prg_nvram_size));
    println!("CHR-RAM:    {}", format_size(h.chr_ram_size));
    println!("CHR-NVRAM:  {}", format_size(h.chr_nvram_size));
    println!("Mirroring:  {}", h.mirroring);
    println!("Battery:    {}", if h.battery_backed { "yes" } else { "no" });
    println!(
        "Trainer:    {}",
        if h.trainer_present { "present" } else { "none" }
    );
    println!("Console:    {}", h.console_type);
    println!("TV system:  {}", h.tv_system);
}
