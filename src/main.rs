//! Driver: load a ROM, seed and trace it, then render whichever output
//! mode the CLI selected.
//!
//! Phase order is fixed, mirroring `dis6502.py`'s `main`: load → apply
//! symbol overrides → log → derive seeds from the reset vector and
//! `--code_ref` → append `--code` → label seeds → trace → render.

use std::collections::HashSet;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use atari_dis6502::cli::Cli;
use atari_dis6502::error::Result;
use atari_dis6502::memory::{Annotation, AnnotatedMemory};
use atari_dis6502::{callgraph, listing, rom, trace};

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(cli.loglevel.as_filter_str()))
        .without_time()
        .init();

    match run(cli) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let bytes = std::fs::read(&cli.romfile)?;
    let mut memory = rom::load_rom(bytes, cli.org)?;

    for (name, value) in &cli.symbol {
        memory.add_symbol(*value, name.clone());
    }

    tracing::info!(start = format!("${:04X}", memory.start()), "loaded memory");

    let mut code_refs = vec![(memory.end() - 4) as u16];
    code_refs.extend(cli.code_ref.iter().copied());

    let mut starts = Vec::new();
    for code_ref in code_refs {
        memory.annotate(code_ref, Annotation::CodePtr);
        starts.push(memory.get_word(code_ref));
    }

    tracing::info!(seeds = ?starts.iter().map(|s| format!("${:04X}", s)).collect::<Vec<_>>(), "seeds from reset vector / code_ref");

    starts.extend(cli.code.iter().copied());

    if let Some((first, rest)) = starts.split_first() {
        memory.add_symbol(*first, "START");
        for start in rest {
            memory.add_symbol(*start, format!("L{:04X}", start));
        }
    }

    trace::trace_code(&mut memory, starts.clone())?;

    render(&cli.mode, &memory, &starts)
}

fn render(
    mode: &atari_dis6502::cli::OutputMode,
    memory: &AnnotatedMemory,
    starts: &[u16],
) -> Result<String> {
    if mode.memory_map {
        return Ok(listing::render_memory_map(memory, 128));
    }
    if mode.disassemble {
        return Ok(listing::render_listing(memory));
    }
    if mode.call_graph {
        return Ok(callgraph::render_call_graph(memory, starts));
    }
    if let Some(addr) = mode.addr_info {
        let tags: HashSet<char> = [
            Annotation::Read,
            Annotation::Write,
            Annotation::Branch,
            Annotation::Target,
            Annotation::Jumped,
            Annotation::Return,
            Annotation::DirectJmp,
            Annotation::CodePtr,
        ]
        .into_iter()
        .filter(|tag| memory.addr_is(addr, *tag))
        .map(Annotation::tag)
        .collect();
        let mut tag_list: Vec<char> = tags.into_iter().collect();
        tag_list.sort_unstable();
        let tag_str: String = tag_list.into_iter().collect();
        return Ok(format!("{:#06x} {} {{{}}}\n", addr, memory.addr_label(addr, 4), tag_str));
    }
    unreachable!("clap enforces exactly one output mode")
}
