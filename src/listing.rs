//! The listing formatter: walks a traced memory from start to end, emitting
//! one line per decoded instruction in executable runs and `.byt`/`.word`
//! directives for everything else.
//!
//! Grounded on `examples/original_source/memory.py`'s `dis`/`dis_instruction`.

use std::fmt::Write as _;

use crate::cpu::{decode_instruction, Mnemonic};
use crate::memory::{AnnotatedMemory, Annotation};

const BYTES_PER_DATA_LINE: usize = 16;

/// Renders the full listing for `memory`: a preamble of every symbol below
/// the image, then the interleaved code/data body.
pub fn render_listing(memory: &AnnotatedMemory) -> String {
    let mut out = String::new();
    write_preamble(&mut out, memory);
    write_body(&mut out, memory);
    out
}

fn write_preamble(out: &mut String, memory: &AnnotatedMemory) {
    let mut below: Vec<(u16, &str)> = memory
        .symbol_table()
        .iter()
        .filter(|(addr, _)| **addr < memory.start())
        .map(|(addr, name)| (*addr, name.as_str()))
        .collect();
    below.sort_unstable_by_key(|(addr, _)| *addr);

    for (addr, name) in below {
        let _ = writeln!(out, "{} = ${:04X}", name, addr);
    }
    let _ = writeln!(out, "* = ${:04X}", memory.start());
    let _ = writeln!(out, "code");
}

fn write_body(out: &mut String, memory: &AnnotatedMemory) {
    let mut cursor = memory.start();

    while (cursor as u32) < memory.end() {
        if memory.is_addr_executable(cursor) {
            cursor = write_code_run(out, memory, cursor);
        } else {
            cursor = write_data_run(out, memory, cursor);
        }
    }
}

/// Emits instructions while `cursor` stays inside an executable range.
/// Returns the address just past the last instruction emitted.
fn write_code_run(out: &mut String, memory: &AnnotatedMemory, mut cursor: u16) -> u16 {
    while (cursor as u32) < memory.end() && memory.is_addr_executable(cursor) {
        let instr = match decode_instruction(memory, cursor) {
            Ok(instr) => instr,
            Err(_) => break,
        };

        let label = label_column(memory, cursor);
        let operand = operand_column(memory, cursor, &instr);
        let _ = writeln!(out, "{:<6} {:<5} {}", label, instr.opcode.mnemonic, operand);

        // `memory.py: dis` only blank-lines after RTS/RTI; spec.md's S4
        // scenario explicitly requires one after a direct JMP too, so JMP
        // is kept here deliberately rather than ported verbatim (see
        // DESIGN.md).
        if matches!(instr.opcode.mnemonic, Mnemonic::RTS | Mnemonic::RTI | Mnemonic::JMP) {
            let _ = writeln!(out);
        }

        cursor = cursor.wrapping_add(instr.opcode.size as u16);
    }
    cursor
}

fn label_column(memory: &AnnotatedMemory, addr: u16) -> String {
    if let Some(name) = memory.symbol_at(addr) {
        name.to_string()
    } else if memory.addr_is(addr, Annotation::Target) || memory.addr_is(addr, Annotation::Jumped) {
        format!("L{:04X}", addr)
    } else {
        String::new()
    }
}

fn operand_column(memory: &AnnotatedMemory, addr: u16, instr: &crate::cpu::Instruction) -> String {
    let src = instr.src.render(addr, memory);
    if !src.is_empty() {
        return src;
    }
    instr.dst.render(addr, memory)
}

struct DataLineState {
    bytes_on_line: usize,
}

/// Emits `.word`/`.byt` directives while `cursor` stays non-executable.
/// Returns the address just past the last byte emitted.
fn write_data_run(out: &mut String, memory: &AnnotatedMemory, mut cursor: u16) -> u16 {
    let mut state = DataLineState { bytes_on_line: 0 };

    while (cursor as u32) < memory.end() && !memory.is_addr_executable(cursor) {
        if memory.addr_is(cursor, Annotation::CodePtr) {
            flush_byte_line(out, &mut state);
            let word = memory.get_word(cursor);
            let _ = writeln!(out, "L{:04X}  .word {}", cursor, memory.addr_label(word, 4));
            cursor = cursor.wrapping_add(2);
            continue;
        }

        if memory.addr_is(cursor, Annotation::Read) || memory.addr_is(cursor, Annotation::Write) {
            flush_byte_line(out, &mut state);
            let _ = write!(out, "L{:04X}  .byt ${:02X}", cursor, memory.byte(cursor));
            state.bytes_on_line = 1;
        } else {
            if state.bytes_on_line > BYTES_PER_DATA_LINE {
                let _ = writeln!(out);
                state.bytes_on_line = 0;
            }
            if state.bytes_on_line == 0 {
                let _ = write!(out, "       .byt ${:02X}", memory.byte(cursor));
            } else {
                let _ = write!(out, ", ${:02X}", memory.byte(cursor));
            }
            state.bytes_on_line += 1;
        }

        cursor = cursor.wrapping_add(1);
    }

    flush_byte_line(out, &mut state);
    cursor
}

fn flush_byte_line(out: &mut String, state: &mut DataLineState) {
    if state.bytes_on_line > 0 {
        let _ = writeln!(out);
        state.bytes_on_line = 0;
    }
}

/// Renders the `-m` memory map: one character per address, wrapped at
/// `width` per line, prefixed by the line's starting address.
pub fn render_memory_map(memory: &AnnotatedMemory, width: u16) -> String {
    let mut out = String::new();
    let mut prev_char = ' ';

    let mut addr = memory.start();
    let _ = write!(out, "{:04X}: ", addr);

    while (addr as u32) < memory.end() {
        let mut marker = if memory.is_addr_executable(addr) { '.' } else { ' ' };

        if memory.addr_is(addr, Annotation::Jumped) {
            marker = '[';
        } else if memory.addr_is(addr, Annotation::Return) {
            marker = if memory.addr_is(addr, Annotation::Target) { 'T' } else { ']' };
        } else if memory.addr_is(addr, Annotation::Branch) {
            marker = '/';
        } else if memory.addr_is(addr, Annotation::Target) {
            marker = '\\';
        } else if memory.addr_is(addr, Annotation::Read) && memory.addr_is(addr, Annotation::Write) {
            marker = '*';
        } else if memory.addr_is(addr, Annotation::Read) {
            marker = 'r';
        } else if memory.addr_is(addr, Annotation::Write) {
            marker = 'w';
        }

        if marker == ' ' && !matches!(prev_char, ']' | 'T' | ' ' | 'r' | 'w') {
            marker = '#';
        }

        // The wrap decision and the marker it gates both belong to the
        // address about to be pushed: a new line starts with that
        // address's own marker, prefixed by its own address.
        let offset = addr.wrapping_sub(memory.start());
        if offset != 0 && offset % width == 0 {
            let _ = write!(out, "\n{:04X}: ", addr);
        }

        out.push(marker);
        prev_char = marker;

        addr = addr.wrapping_add(1);
    }

    out
}
