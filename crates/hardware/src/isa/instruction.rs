//! Instruction encoding and decoding utilities.
//!
//! Provides bit extraction functions and the `Decoded` structure for the fixed
//! 32-bit instruction format:
//!
//! ```text
//!  31      26 25   21 20   16 15   11 10     6 5      0
//! | opcode   |  rs   |  rt   |  rd   | unused  | funct  |   R-type
//! | opcode   |  rs   |  rt   |        imm16             |   I-type
//! ```

use crate::core::pipeline::signals::AluOp;

/// Bit position of the opcode field.
pub const OPCODE_SHIFT: u32 = 26;
/// Bit mask for the opcode field after shifting (6 bits).
pub const OPCODE_MASK: u32 = 0x3F;
/// Bit position of the first source register field.
pub const RS_SHIFT: u32 = 21;
/// Bit position of the second source (or I-type destination) register field.
pub const RT_SHIFT: u32 = 16;
/// Bit position of the R-type destination register field.
pub const RD_SHIFT: u32 = 11;
/// Bit mask for any register field after shifting (5 bits).
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for the function code (6 bits).
pub const FUNCT_MASK: u32 = 0x3F;
/// Bit mask for the 16-bit immediate.
pub const IMM_MASK: u32 = 0xFFFF;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the 6-bit opcode (bits 31-26).
    fn opcode(&self) -> u32;

    /// Extracts the first source register index (bits 25-21).
    fn rs(&self) -> usize;

    /// Extracts the second source register index (bits 20-16).
    ///
    /// This is the destination of ADDI and LW and the data source of SW.
    fn rt(&self) -> usize;

    /// Extracts the R-type destination register index (bits 15-11).
    fn rd(&self) -> usize;

    /// Extracts the ALU function code (bits 5-0).
    fn funct(&self) -> u32;

    /// Extracts the raw 16-bit immediate (bits 15-0), not sign-extended.
    fn imm16(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        (self >> OPCODE_SHIFT) & OPCODE_MASK
    }

    #[inline(always)]
    fn rs(&self) -> usize {
        ((self >> RS_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rt(&self) -> usize {
        ((self >> RT_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> RD_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn funct(&self) -> u32 {
        self & FUNCT_MASK
    }

    #[inline(always)]
    fn imm16(&self) -> u32 {
        self & IMM_MASK
    }
}

/// Branch comparison performed by a conditional branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchCond {
    /// Taken when the operands are equal.
    Eq,
    /// Taken when the operands differ.
    Ne,
    /// Taken when the first operand is less than the second (signed).
    Lt,
}

/// Operation identified by the opcode (and, for ALU instructions, the function code).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Opcode {
    /// No operation; also the class of every bubble.
    #[default]
    Nop,
    /// Register-register arithmetic.
    Alu(AluOp),
    /// Add immediate.
    Addi,
    /// Load word.
    Lw,
    /// Store word.
    Sw,
    /// Conditional branch.
    Branch(BranchCond),
    /// Halt; also produced for every unknown opcode or function code.
    Halt,
}

/// A decoded instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Raw 32-bit encoding.
    pub raw: u32,
    /// Decoded operation.
    pub opcode: Opcode,
    /// First source register.
    pub rs: usize,
    /// Second source register.
    pub rt: usize,
    /// R-type destination register field.
    pub rd: usize,
    /// Sign-extended immediate.
    pub imm: u32,
}

impl Decoded {
    /// Register written by this instruction, or 0 when it writes none.
    pub const fn dest(&self) -> usize {
        match self.opcode {
            Opcode::Alu(_) => self.rd,
            Opcode::Addi | Opcode::Lw => self.rt,
            Opcode::Nop | Opcode::Sw | Opcode::Branch(_) | Opcode::Halt => 0,
        }
    }

    /// Returns `true` if `rt` is read as an operand (R-type, stores, branches).
    pub const fn reads_rt(&self) -> bool {
        matches!(
            self.opcode,
            Opcode::Alu(_) | Opcode::Sw | Opcode::Branch(_)
        )
    }

    /// Returns `true` if `rs` is read as an operand.
    pub const fn reads_rs(&self) -> bool {
        !matches!(self.opcode, Opcode::Nop | Opcode::Halt)
    }
}
