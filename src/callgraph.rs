//! DOT call-graph emission: walks forward from each routine's entry point
//! until its terminator, emitting one edge per `JSR` site crossed plus one
//! more if the terminator itself is a direct `JMP` (a tail call).
//!
//! Grounded on `examples/original_source/memory.py`'s `call_graph`, whose
//! inner walk is a byte-by-byte scan from `start` to the first
//! `Return`-annotated address — not a flat dump of the `calls`/`jumps`
//! maps.

use std::collections::HashSet;
use std::fmt::Write as _;

use crate::memory::{AnnotatedMemory, Annotation};

/// Renders `digraph G { ... }`, breadth-first from `starts`.
pub fn render_call_graph(memory: &AnnotatedMemory, starts: &[u16]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "digraph G {{");

    let mut seen_starts: HashSet<u16> = HashSet::new();
    let mut frontier: Vec<u16> = starts.to_vec();

    while !frontier.is_empty() {
        let mut next: HashSet<u16> = HashSet::new();

        for &start in &frontier {
            seen_starts.insert(start);
            walk_routine(&mut out, memory, start, &seen_starts, &mut next);
        }

        let mut ordered: Vec<u16> = next.into_iter().collect();
        ordered.sort_unstable();
        frontier = ordered;
    }

    let _ = writeln!(out, "}}");
    out
}

fn walk_routine(
    out: &mut String,
    memory: &AnnotatedMemory,
    start: u16,
    seen_starts: &HashSet<u16>,
    next: &mut HashSet<u16>,
) {
    let start_label = memory.addr_label(start, 4);
    let mut addr = start;

    while memory.has_addr(addr) && !memory.addr_is(addr, Annotation::Return) {
        if let Some(&dest) = memory.calls().get(&addr) {
            if !seen_starts.contains(&dest) {
                next.insert(dest);
            }
            let _ = writeln!(out, "  {} -> {};", start_label, memory.addr_label(dest, 4));
        }
        addr = addr.wrapping_add(1);
    }

    if memory.addr_is(addr, Annotation::DirectJmp) {
        if let Some(&dest) = memory.jumps().get(&addr) {
            if !seen_starts.contains(&dest) {
                next.insert(dest);
            }
            let _ = writeln!(out, "  {} -> {};", start_label, memory.addr_label(dest, 4));
        }
    }
}
