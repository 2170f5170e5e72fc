//! Cartridge inspection core for iNES / NES 2.0 ROM images.
//!
//! Everything in this crate is a synchronous pure function over an
//! in-memory byte buffer: [`Header::parse`] decodes the fixed 16-byte
//! header, [`Cartridge::load`] slices the trainer/PRG/CHR regions it
//! declares, and [`display`] / [`cartridge::mapper`] provide the small
//! presentation helpers a frontend needs to show the result. File I/O
//! happens once, in [`load_cartridge_from_file`]; nothing here holds
//! shared state, so independent buffers may be processed from any number
//! of threads.

pub mod cartridge;
pub mod display;
pub mod error;

pub use cartridge::header::{Header, NES_HEADER_LEN};
pub use cartridge::{Cartridge, TRAINER_SIZE, load_cartridge, load_cartridge_from_file};
pub use error::Error;
