//! Loads a raw ROM image into an [`AnnotatedMemory`], validating its size
//! and inferring the origin from the reset vector when none is given.
//!
//! Grounded on `examples/original_source/atari2600.py`'s `Memory.from_file`.

use std::collections::HashMap;

use crate::error::{DisassemblerError, Result};
use crate::memory::{default_symbols, AnnotatedMemory};

pub const ROM_SIZE: usize = 4096;

/// Builds a fresh memory model from `bytes`, pre-seeded with the TIA/RIOT
/// symbol table. `org` overrides the inferred origin when given; otherwise
/// the origin is the last two bytes of the image, little-endian, masked
/// to the nearest 4 KiB page (`$F000` for a standard 2600 cartridge).
pub fn load_rom(bytes: Vec<u8>, org: Option<u16>) -> Result<AnnotatedMemory> {
    if bytes.len() != ROM_SIZE {
        return Err(DisassemblerError::InvalidRomSize { got: bytes.len() });
    }

    let origin = org.unwrap_or_else(|| infer_origin(&bytes));
    let symbols: HashMap<u16, String> = default_symbols();

    Ok(AnnotatedMemory::new(bytes, origin, symbols))
}

fn infer_origin(bytes: &[u8]) -> u16 {
    let len = bytes.len();
    let lo = bytes[len - 4] as u16;
    let hi = bytes[len - 3] as u16;
    ((hi << 8) | lo) & 0xF000
}
