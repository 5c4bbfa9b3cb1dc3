//! Literal scenarios for entry traces, branch targets, call/jump edges,
//! and symbol-aware operand rendering.

mod common;

use atari_dis6502::listing;
use atari_dis6502::memory::Annotation;
use atari_dis6502::rom;
use atari_dis6502::trace::trace_code;
use pretty_assertions::assert_eq;

use common::{patch, rom_with_code, ORG};

fn seed_and_trace(memory: &mut atari_dis6502::memory::AnnotatedMemory) -> Vec<u16> {
    let reset_vector = (memory.end() - 4) as u16;
    let seed = memory.get_word(reset_vector);
    memory.annotate(reset_vector, Annotation::CodePtr);
    memory.add_symbol(seed, "START");
    trace_code(memory, vec![seed]).unwrap();
    vec![seed]
}

#[test]
fn s1_single_nop_at_entry() {
    let mut memory = rom_with_code(&[0xEA]);
    seed_and_trace(&mut memory);

    assert!(memory.is_addr_executable(ORG));
    // The `$00` padding byte right after the NOP decodes as BRK, which
    // terminates the chain (see trace.rs's defensive `dst == Pc` arm) but,
    // like RTS/JMP elsewhere, is itself part of the traced block.
    assert!(memory.is_addr_executable(ORG + 1));
    assert!(!memory.is_addr_executable(ORG + 2));

    let listing = listing::render_listing(&memory);
    let first_code_line = listing.lines().find(|l| l.contains("NOP")).unwrap();
    assert!(first_code_line.contains("START"));
    assert!(listing.contains("BRK"));
}

#[test]
fn s2_branch_taken_produces_branch_and_target_annotations() {
    // F000: LDA #$01 ; F002: BEQ +2 ; F004: NOP ; F005: RTS ; F007: RTS
    let mut memory = rom_with_code(&[0xA9, 0x01, 0xF0, 0x02, 0xEA, 0x60, 0x00, 0x60]);
    seed_and_trace(&mut memory);

    assert!(memory.addr_is(0xF002, Annotation::Branch));
    assert!(memory.addr_is(0xF006, Annotation::Target));
    assert!(memory.is_addr_executable(0xF004));
    assert!(memory.is_addr_executable(0xF006));
}

#[test]
fn s3_jsr_then_rts_records_a_call_edge() {
    let mut bytes = vec![0u8; rom::ROM_SIZE];
    patch(&mut bytes, ORG, 0xF000, &[0x20, 0x10, 0xF0, 0x60]);
    patch(&mut bytes, ORG, 0xF010, &[0x60]);
    bytes[rom::ROM_SIZE - 4] = 0x00;
    bytes[rom::ROM_SIZE - 3] = 0xF0;
    let mut memory = rom::load_rom(bytes, None).unwrap();
    seed_and_trace(&mut memory);

    assert_eq!(memory.calls().get(&0xF000), Some(&0xF010));
    assert!(memory.addr_is(0xF010, Annotation::Jumped));
    assert!(memory.addr_is(0xF003, Annotation::Return));
    assert!(memory.addr_is(0xF010, Annotation::Return));
}

#[test]
fn s4_direct_jmp_records_a_jump_edge_and_blank_line() {
    let mut bytes = vec![0u8; rom::ROM_SIZE];
    patch(&mut bytes, ORG, 0xF000, &[0x4C, 0x20, 0xF0]);
    patch(&mut bytes, ORG, 0xF020, &[0x60]);
    bytes[rom::ROM_SIZE - 4] = 0x00;
    bytes[rom::ROM_SIZE - 3] = 0xF0;
    let mut memory = rom::load_rom(bytes, None).unwrap();
    seed_and_trace(&mut memory);

    assert!(memory.addr_is(0xF000, Annotation::Return));
    assert!(memory.addr_is(0xF000, Annotation::DirectJmp));
    assert_eq!(memory.jumps().get(&0xF000), Some(&0xF020));
    assert!(memory.is_addr_executable(0xF000) && !memory.is_addr_executable(0xF001));
    assert!(memory.is_addr_executable(0xF020) && !memory.is_addr_executable(0xF021));

    let listing = listing::render_listing(&memory);
    let jmp_pos = listing.find("JMP").unwrap();
    assert_eq!(&listing[jmp_pos..].lines().nth(1).unwrap(), &"");
}

#[test]
fn s5_indirect_jmp_has_no_jump_edge_or_new_seed() {
    let mut memory = rom_with_code(&[0x6C, 0xA2, 0x00]);
    seed_and_trace(&mut memory);

    assert!(memory.addr_is(0xF000, Annotation::Return));
    assert!(!memory.addr_is(0xF000, Annotation::DirectJmp));
    assert!(memory.jumps().is_empty());
}

#[test]
fn s6_tia_register_store_renders_symbol_name() {
    // LDA #$00 ; STA $09 ; RTS
    let mut memory = rom_with_code(&[0xA9, 0x00, 0x85, 0x09, 0x60]);
    seed_and_trace(&mut memory);

    assert!(memory.addr_is(0x0009, Annotation::Write));

    let listing = listing::render_listing(&memory);
    let sta_line = listing.lines().find(|l| l.contains("STA")).unwrap();
    assert!(sta_line.contains("COLUBK"), "line was: {sta_line}");
}
