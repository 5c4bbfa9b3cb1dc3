use atari_dis6502::memory::AnnotatedMemory;
use atari_dis6502::rom;

pub const ORG: u16 = 0xF000;

/// Builds a full 4096-byte ROM image with `code` written at offset 0 and
/// the reset vector set to `$F000`, then loads it the way the driver does.
pub fn rom_with_code(code: &[u8]) -> AnnotatedMemory {
    rom_with_code_and_reset(code, ORG)
}

pub fn rom_with_code_and_reset(code: &[u8], reset: u16) -> AnnotatedMemory {
    let mut bytes = vec![0u8; rom::ROM_SIZE];
    bytes[..code.len()].copy_from_slice(code);
    bytes[rom::ROM_SIZE - 4] = (reset & 0xFF) as u8;
    bytes[rom::ROM_SIZE - 3] = (reset >> 8) as u8;
    rom::load_rom(bytes, None).expect("fixture ROM is always exactly 4096 bytes")
}

/// Writes `code` at absolute `addr` inside an already-built 4096-byte ROM
/// buffer (for scenarios needing more than one code region), returning the
/// raw bytes so the caller can set the reset vector before loading.
pub fn patch(bytes: &mut [u8], org: u16, addr: u16, code: &[u8]) {
    let offset = (addr - org) as usize;
    bytes[offset..offset + code.len()].copy_from_slice(code);
}
