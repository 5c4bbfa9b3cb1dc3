//! Static recursive-descent disassembler for 4 KiB Atari 2600 ROM images.
//!
//! The binary is a thin driver over this library: load a ROM into an
//! [`memory::AnnotatedMemory`], seed and trace it with [`trace::trace_code`],
//! and render one of the output modes in [`listing`] or [`callgraph`].

pub mod callgraph;
pub mod cli;
pub mod cpu;
pub mod error;
pub mod listing;
pub mod memory;
pub mod rom;
pub mod trace;
