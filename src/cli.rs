//! Command-line interface: flags match `dis6502.py`'s `argparse` layout,
//! ported onto `clap`'s derive API.

use clap::{Args, Parser};

use crate::error::{DisassemblerError, Result};

#[derive(Debug, Parser)]
#[command(name = "dis6502", about = "Static disassembler for Atari 2600 ROM images")]
pub struct Cli {
    /// Path to a raw 4 KiB ROM image.
    pub romfile: std::path::PathBuf,

    /// Explicit origin address; inferred from the reset vector if absent.
    #[arg(long, value_parser = parse_smart_int)]
    pub org: Option<u16>,

    /// Additional seed addresses to trace from.
    #[arg(long, value_parser = parse_smart_int, num_args = 0..)]
    pub code: Vec<u16>,

    /// Addresses whose word contents are additional seeds.
    #[arg(long, value_parser = parse_smart_int, num_args = 0..)]
    pub code_ref: Vec<u16>,

    /// `NAME=VALUE` symbol table overrides.
    #[arg(long, value_parser = parse_symbol_pair, num_args = 0..)]
    pub symbol: Vec<(String, u16)>,

    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub loglevel: LogLevel,

    #[command(flatten)]
    pub mode: OutputMode,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct OutputMode {
    /// Emit the annotated memory map.
    #[arg(short = 'm', long = "memory_map")]
    pub memory_map: bool,

    /// Emit the DOT call graph.
    #[arg(short = 'c', long = "call_graph")]
    pub call_graph: bool,

    /// Emit the full disassembly listing.
    #[arg(short = 'd', long = "disassemble")]
    pub disassemble: bool,

    /// Emit a single line describing one address.
    #[arg(short = 'a', long = "addr_info", value_parser = parse_smart_int)]
    pub addr_info: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
        }
    }
}

/// Parses `0x...`, `$...`, or plain-decimal integers, matching
/// `dis6502.py`'s `smart_int`.
fn parse_smart_int(s: &str) -> Result<u16> {
    let parsed = if let Some(hex) = s.strip_prefix("0x") {
        u32::from_str_radix(hex, 16)
    } else if let Some(hex) = s.strip_prefix('$') {
        u32::from_str_radix(hex, 16)
    } else {
        s.parse::<u32>()
    };

    let value = parsed.map_err(|_| DisassemblerError::MalformedArgument { value: s.to_string() })?;

    u16::try_from(value).map_err(|_| DisassemblerError::MalformedArgument { value: s.to_string() })
}

/// Parses a `NAME=VALUE` pair, matching `dis6502.py`'s `pair`.
fn parse_symbol_pair(s: &str) -> Result<(String, u16)> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| DisassemblerError::MalformedArgument { value: s.to_string() })?;
    let value = parse_smart_int(value)?;
    Ok((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smart_int_parses_hex_forms() {
        assert_eq!(parse_smart_int("0x1F").unwrap(), 0x1F);
        assert_eq!(parse_smart_int("$1F").unwrap(), 0x1F);
        assert_eq!(parse_smart_int("31").unwrap(), 31);
    }

    #[test]
    fn smart_int_rejects_garbage() {
        assert!(parse_smart_int("not-a-number").is_err());
    }

    #[test]
    fn symbol_pair_splits_on_equals() {
        let (name, value) = parse_symbol_pair("COLUBK=0x09").unwrap();
        assert_eq!(name, "COLUBK");
        assert_eq!(value, 0x09);
    }

    #[test]
    fn symbol_pair_requires_equals() {
        assert!(parse_symbol_pair("COLUBK").is_err());
    }
}
