//! Error types. One enum for everything that can make a run fail outright;
//! conditions the tracer can route around (an out-of-range branch target,
//! say) are logged via `tracing::warn!` and never reach this type.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DisassemblerError {
    #[error("ROM image is {got} bytes, expected exactly 4096")]
    InvalidRomSize { got: usize },

    #[error("unknown opcode ${byte:02X} at ${addr:04X}")]
    UnknownOpcode { byte: u8, addr: u16 },

    #[error("malformed argument: {value}")]
    MalformedArgument { value: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, DisassemblerError>;
