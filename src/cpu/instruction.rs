//! Decodes a single instruction at an address: looks up the opcode byte,
//! reads however many operand bytes its addressing modes call for, and
//! builds the two [`Operand`] values (src/dst, possibly referring to the
//! same address).

use crate::cpu::opcode::{AddrMode, Opcode, OPCODE_TABLE};
use crate::cpu::operand::Operand;
use crate::error::{DisassemblerError, Result};
use crate::memory::AnnotatedMemory;

/// A decoded instruction at a specific address: purely value data, no
/// back-pointer into memory.
#[derive(Debug, Clone, Copy)]
pub struct Instruction {
    pub opcode: &'static Opcode,
    pub src: Operand,
    pub dst: Operand,
}

/// Decodes the instruction whose opcode byte sits at `addr`. Fails with
/// [`DisassemblerError::UnknownOpcode`] if the byte has no table entry.
pub fn decode_instruction(memory: &AnnotatedMemory, addr: u16) -> Result<Instruction> {
    let byte = memory.byte(addr);
    let opcode = OPCODE_TABLE[byte as usize]
        .as_ref()
        .ok_or(DisassemblerError::UnknownOpcode { byte, addr })?;

    // At most one mode carries operand bytes beyond the other
    // invariant); read once and build both operands from the same bytes.
    let operand = build_operand_bytes(memory, addr, opcode.src, opcode.dst);

    Ok(Instruction {
        opcode,
        src: make_operand(opcode.src, operand),
        dst: make_operand(opcode.dst, operand),
    })
}

/// The raw bytes following the opcode, interpreted generically as either a
/// 16-bit address or a single byte, depending on whichever of src/dst
/// needs operand bytes (generalized from the addressing-mode table: both
/// slots of a single opcode entry always agree on how many bytes to read).
#[derive(Clone, Copy)]
enum RawOperand {
    None,
    Byte(u8),
    Word(u16),
}

fn build_operand_bytes(memory: &AnnotatedMemory, addr: u16, src: AddrMode, dst: AddrMode) -> RawOperand {
    let needs_word = |m: AddrMode| {
        matches!(m, AddrMode::Addr | AddrMode::Abs | AddrMode::AbsX | AddrMode::AbsY | AddrMode::AInd)
    };
    let needs_byte = |m: AddrMode| {
        matches!(
            m,
            AddrMode::Imm
                | AddrMode::IndX
                | AddrMode::IndY
                | AddrMode::Rel
                | AddrMode::Zero
                | AddrMode::ZerX
                | AddrMode::ZerY
        )
    };

    if needs_word(src) || needs_word(dst) {
        RawOperand::Word(memory.get_word(addr.wrapping_add(1)))
    } else if needs_byte(src) || needs_byte(dst) {
        RawOperand::Byte(memory.byte(addr.wrapping_add(1)))
    } else {
        RawOperand::None
    }
}

fn make_operand(mode: AddrMode, raw: RawOperand) -> Operand {
    match (mode, raw) {
        (AddrMode::Abs, RawOperand::Word(a)) => Operand::Abs(a),
        (AddrMode::AbsX, RawOperand::Word(a)) => Operand::AbsX(a),
        (AddrMode::AbsY, RawOperand::Word(a)) => Operand::AbsY(a),
        (AddrMode::Addr, RawOperand::Word(a)) => Operand::Addr(a),
        (AddrMode::AInd, RawOperand::Word(a)) => Operand::AInd(a),
        (AddrMode::Zero, RawOperand::Byte(a)) => Operand::Zero(a),
        (AddrMode::ZerX, RawOperand::Byte(a)) => Operand::ZerX(a),
        (AddrMode::ZerY, RawOperand::Byte(a)) => Operand::ZerY(a),
        (AddrMode::Imm, RawOperand::Byte(v)) => Operand::Imm(v),
        (AddrMode::IndX, RawOperand::Byte(a)) => Operand::IndX(a),
        (AddrMode::IndY, RawOperand::Byte(a)) => Operand::IndY(a),
        (AddrMode::Rel, RawOperand::Byte(b)) => Operand::Rel(reinterpret_signed(b)),
        (AddrMode::Ac, _) => Operand::Ac,
        (AddrMode::Xr, _) => Operand::Xr,
        (AddrMode::Yr, _) => Operand::Yr,
        (AddrMode::Sp, _) => Operand::Sp,
        (AddrMode::Pc, _) => Operand::Pc,
        (AddrMode::Sr, _) => Operand::Sr,
        (AddrMode::Fc, _) => Operand::Fc,
        (AddrMode::Fd, _) => Operand::Fd,
        (AddrMode::Fi, _) => Operand::Fi,
        (AddrMode::Fv, _) => Operand::Fv,
        (AddrMode::None, _) => Operand::None,
        // A mode that needs bytes but didn't get the matching RawOperand
        // shape can't happen: build_operand_bytes derives its Word/Byte
        // choice from the same src/dst pair passed to make_operand.
        _ => Operand::None,
    }
}

/// The raw byte is read unsigned, then reinterpreted as signed —
/// values >= 128 become `v - 256`.
fn reinterpret_signed(v: u8) -> i8 {
    if v >= 128 {
        (v as i32 - 256) as i8
    } else {
        v as i8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn mem(bytes: Vec<u8>) -> AnnotatedMemory {
        AnnotatedMemory::new(bytes, 0xF000, HashMap::new())
    }

    #[test]
    fn decodes_nop() {
        let m = mem(vec![0xEA]);
        let instr = decode_instruction(&m, 0xF000).unwrap();
        assert_eq!(instr.opcode.mnemonic.as_str(), "NOP");
        assert_eq!(instr.opcode.size, 1);
    }

    #[test]
    fn decodes_lda_absolute() {
        let m = mem(vec![0xAD, 0xA0, 0xF0]);
        let instr = decode_instruction(&m, 0xF000).unwrap();
        assert_eq!(instr.opcode.mnemonic.as_str(), "LDA");
        assert_eq!(instr.src.addr(), Some(0xF0A0));
        assert_eq!(instr.dst, Operand::Ac);
    }

    #[test]
    fn decodes_branch_with_negative_offset() {
        let m = mem(vec![0xF0, 0x80]);
        let instr = decode_instruction(&m, 0xF000).unwrap();
        assert_eq!(instr.src.branch_target(0xF000), Some(0xEF82));
    }

    #[test]
    fn unknown_opcode_fails() {
        let m = mem(vec![0x02]);
        let err = decode_instruction(&m, 0xF000).unwrap_err();
        assert!(matches!(
            err,
            DisassemblerError::UnknownOpcode { byte: 0x02, addr: 0xF000 }
        ));
    }
}
