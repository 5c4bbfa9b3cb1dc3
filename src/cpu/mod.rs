//! 6502 instruction model: addressing modes, the opcode table, and the
//! decoder that ties them together into a concrete [`Instruction`].

pub mod instruction;
pub mod opcode;
pub mod operand;

pub use instruction::{decode_instruction, Instruction};
pub use opcode::{AddrMode, Mnemonic, Opcode};
pub use operand::Operand;

/// A 16-bit address into the cartridge image or the Atari 2600's address
/// space. The tracer and memory model never leave this space.
pub type Address = u16;
