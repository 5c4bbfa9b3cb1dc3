//! The fixed-point tracer: follows every control-flow edge reachable from
//! a set of seed addresses, annotating memory access and control transfers
//! as it goes, until no seed produces a new address to chase.
//!
//! Unlike a recursive-descent walk, this keeps an explicit worklist —
//! same fixed point, no call-stack depth tied to ROM size.

use std::collections::HashSet;

use crate::cpu::{decode_instruction, AddrMode, Mnemonic};
use crate::error::Result;
use crate::memory::{AnnotatedMemory, Annotation};

/// Traces every seed in `seeds` to a fixed point, mutating `memory` in
/// place with the discovered annotations, executable ranges, and
/// call/jump edges.
///
/// A seed outside `memory`'s bounds is an `OutOfRange` condition: it is
/// logged and dropped, never fatal. An opcode byte absent from the table
/// is not — it bubbles out as `UnknownOpcode` and aborts the whole trace,
/// matching `dis6502.py`, which lets `UnknownOpcodeError` propagate
/// uncaught out of `trace_code` to the top-level handler in `main`.
pub fn trace_code(memory: &mut AnnotatedMemory, seeds: Vec<u16>) -> Result<()> {
    let mut seen_starts: HashSet<u16> = HashSet::new();
    let mut starts = seeds;

    while !starts.is_empty() {
        let mut next_starts: HashSet<u16> = HashSet::new();

        for start in &starts {
            if seen_starts.contains(start) {
                continue;
            }
            seen_starts.insert(*start);

            if !memory.has_addr(*start) {
                tracing::warn!(addr = format!("${:04X}", start), "seed address out of range, dropping");
                continue;
            }

            if let Some(last_addr) = trace_one_chain(memory, *start, &seen_starts, &mut next_starts)? {
                memory.add_executable_range(*start, last_addr);
            }
        }

        let mut ordered: Vec<u16> = next_starts.into_iter().collect();
        ordered.sort_unstable();
        starts = ordered;
    }
    Ok(())
}

/// Walks forward from `start`, decoding and annotating one instruction at
/// a time, until a terminator (non-indirect `JMP`, `RTS`/`RTI`, the end of
/// the image, or end of the image) stops the chain. Returns the address of
/// the last instruction actually decoded, or `None` if `start` itself was
/// already at or past the end of the image (no executable range to add).
fn trace_one_chain(
    memory: &mut AnnotatedMemory,
    start: u16,
    seen_starts: &HashSet<u16>,
    next_starts: &mut HashSet<u16>,
) -> Result<Option<u16>> {
    let mut addr = start;
    let mut last_addr: Option<u16> = None;

    loop {
        if addr as u32 >= memory.end() {
            break;
        }

        let instr = decode_instruction(memory, addr)?;
        last_addr = Some(addr);

        if matches!(instr.opcode.src, AddrMode::Abs | AddrMode::Addr | AddrMode::AbsX | AddrMode::AbsY) {
            if let Some(a) = instr.src.addr() {
                memory.annotate(a, Annotation::Read);
            }
        }
        if matches!(instr.opcode.dst, AddrMode::Abs | AddrMode::Addr | AddrMode::AbsX | AddrMode::AbsY) {
            if let Some(a) = instr.dst.addr() {
                memory.annotate(a, Annotation::Write);
            }
        }

        let mut terminate = false;

        if instr.opcode.src == AddrMode::Rel {
            memory.annotate(addr, Annotation::Branch);
            if let Some(dest) = instr.src.branch_target(addr) {
                memory.annotate(dest, Annotation::Target);
                queue_if_new(memory, dest, seen_starts, next_starts);
            }
        } else if instr.opcode.mnemonic == Mnemonic::JSR {
            if let Some(target) = instr.src.addr() {
                memory.annotate(target, Annotation::Jumped);
                queue_if_new(memory, target, seen_starts, next_starts);
                memory.add_call(addr, target);
            }
        } else if instr.opcode.mnemonic == Mnemonic::JMP {
            memory.annotate(addr, Annotation::Return);
            if instr.opcode.src != AddrMode::AInd {
                memory.annotate(addr, Annotation::DirectJmp);
                if let Some(target) = instr.src.addr() {
                    memory.annotate(target, Annotation::Jumped);
                    queue_if_new(memory, target, seen_starts, next_starts);
                    memory.add_jump(addr, target);
                }
            }
            terminate = true;
        } else if matches!(instr.opcode.mnemonic, Mnemonic::RTS | Mnemonic::RTI) {
            memory.annotate(addr, Annotation::Return);
            terminate = true;
        } else if instr.opcode.dst == AddrMode::Pc {
            // Defensive catch-all: any other dst=PC instruction terminates
            // the block without further annotation. BRK is the one opcode
            // that actually reaches this arm today.
            terminate = true;
        }

        addr = addr.wrapping_add(instr.opcode.size as u16);
        if terminate {
            break;
        }
    }

    Ok(last_addr)
}

fn queue_if_new(memory: &AnnotatedMemory, addr: u16, seen_starts: &HashSet<u16>, next_starts: &mut HashSet<u16>) {
    if memory.has_addr(addr) && !seen_starts.contains(&addr) {
        next_starts.insert(addr);
    }
}
