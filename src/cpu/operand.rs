//! The operand model: one variant per 6502 addressing mode.
//!
//! Each variant carries exactly the value its addressing mode yields (an
//! address, an immediate byte, or a signed branch offset) or nothing at
//! all for implied/register/flag modes. Rendering is split in two:
//! [`Operand::short`] is the context-free default text for a variant,
//! used by `Display` and by unit tests; [`Operand::render`] is what the
//! listing formatter actually calls, and resolves address-bearing and
//! `Rel` operands to the best available label via the annotated memory.

use std::fmt;

use crate::memory::AnnotatedMemory;

/// A decoded operand, carrying whatever value its addressing mode reads
/// out of the instruction stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Abs(u16),
    AbsX(u16),
    AbsY(u16),
    Addr(u16),
    AInd(u16),
    Zero(u8),
    ZerX(u8),
    ZerY(u8),
    Imm(u8),
    IndX(u8),
    IndY(u8),
    /// Already-resolved signed offset (raw byte reinterpreted as i8).
    Rel(i8),
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

impl Operand {
    /// The address this operand reads or writes, for the variants that
    /// carry one. `None` for immediate, branch, register and flag operands.
    pub fn addr(&self) -> Option<u16> {
        match *self {
            Operand::Abs(a)
            | Operand::AbsX(a)
            | Operand::AbsY(a)
            | Operand::Addr(a)
            | Operand::AInd(a) => Some(a),
            Operand::Zero(a) | Operand::ZerX(a) | Operand::ZerY(a) => Some(a as u16),
            Operand::IndX(a) | Operand::IndY(a) => Some(a as u16),
            _ => None,
        }
    }

    /// The resolved branch target for a `Rel` operand:
    /// `current_addr + 2 + offset`.
    pub fn branch_target(&self, current_addr: u16) -> Option<u16> {
        match *self {
            Operand::Rel(offset) => {
                Some((current_addr as i32 + 2 + offset as i32) as u16)
            }
            _ => None,
        }
    }

    /// Default short rendering, used where no address resolution is
    /// possible (register/flag operands, and as a fallback for `Display`).
    pub fn short(&self) -> &'static str {
        match self {
            Operand::Ac => "A",
            Operand::Xr => "X",
            Operand::Yr => "Y",
            Operand::Sp => "S",
            Operand::Pc => "PC",
            Operand::Sr => "P",
            Operand::Fc => "C",
            Operand::Fd => "D",
            Operand::Fi => "I",
            Operand::Fv => "V",
            Operand::None => "",
            _ => "",
        }
    }

    /// Render this operand the way the listing formatter wants it: label
    /// resolution (via [`AnnotatedMemory::addr_label`]) with the
    /// addressing mode's suffix/parens, for address-bearing and `Rel`
    /// operands; the empty string for everything else (registers, flags,
    /// and the implicit `None` operand never produce visible text in a
    /// listing).
    pub fn render(&self, current_addr: u16, memory: &AnnotatedMemory) -> String {
        match *self {
            Operand::Abs(a) => memory.addr_label(a, 4),
            Operand::AbsX(a) => format!("{},X", memory.addr_label(a, 4)),
            Operand::AbsY(a) => format!("{},Y", memory.addr_label(a, 4)),
            Operand::Addr(a) => memory.addr_label(a, 4),
            Operand::AInd(a) => format!("({})", memory.addr_label(a, 4)),
            Operand::Zero(a) => memory.addr_label(a as u16, 2),
            Operand::ZerX(a) => format!("{},X", memory.addr_label(a as u16, 2)),
            Operand::ZerY(a) => format!("{},Y", memory.addr_label(a as u16, 2)),
            Operand::Imm(v) => format!("#${:02X}", v),
            Operand::IndX(a) => format!("({},X)", memory.addr_label(a as u16, 2)),
            Operand::IndY(a) => format!("({}),Y", memory.addr_label(a as u16, 2)),
            Operand::Rel(offset) => {
                let target = self.branch_target(current_addr).unwrap_or(current_addr);
                memory.addr_label(target, 4)
            }
            _ => String::new(),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Operand::Abs(a) | Operand::Addr(a) => write!(f, "${:04X}", a),
            Operand::AbsX(a) => write!(f, "${:04X},X", a),
            Operand::AbsY(a) => write!(f, "${:04X},Y", a),
            Operand::AInd(a) => write!(f, "(${:04X})", a),
            Operand::Zero(a) => write!(f, "${:02X}", a),
            Operand::ZerX(a) => write!(f, "${:02X},X", a),
            Operand::ZerY(a) => write!(f, "${:02X},Y", a),
            Operand::Imm(v) => write!(f, "#${:02X}", v),
            Operand::IndX(a) => write!(f, "(${:02X},X)", a),
            Operand::IndY(a) => write!(f, "(${:02X}),Y", a),
            Operand::Rel(offset) => write!(f, ".{:+}", offset),
            _ => write!(f, "{}", self.short()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rel_decodes_signed_offset_and_target() {
        let op = Operand::Rel(-2);
        assert_eq!(op.branch_target(0xF002), Some(0xF002));
    }

    #[test]
    fn rel_positive_offset() {
        let op = Operand::Rel(0x7F);
        assert_eq!(op.branch_target(0xF000), Some(0xF081));
    }

    #[test]
    fn register_and_flag_operands_render_empty() {
        let mem = crate::memory::AnnotatedMemory::new(vec![0; 4], 0xF000, Default::default());
        for op in [
            Operand::Ac,
            Operand::Xr,
            Operand::Yr,
            Operand::Sp,
            Operand::Pc,
            Operand::Sr,
            Operand::Fc,
            Operand::Fd,
            Operand::Fi,
            Operand::Fv,
            Operand::None,
        ] {
            assert_eq!(op.render(0xF000, &mem), "");
        }
    }

    #[test]
    fn immediate_renders_without_label_lookup() {
        let mem = crate::memory::AnnotatedMemory::new(vec![0; 4], 0xF000, Default::default());
        assert_eq!(Operand::Imm(0x12).render(0xF000, &mem), "#$12");
    }

    #[test]
    fn short_display_matches_table() {
        assert_eq!(Operand::Ac.short(), "A");
        assert_eq!(Operand::Fc.short(), "C");
        assert_eq!(Operand::None.short(), "");
    }
}
