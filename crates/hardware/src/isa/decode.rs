//! Instruction Decoder.
//!
//! This module turns a 32-bit encoding into a structured `Decoded` value. It extracts
//! the opcode, register indices, and function code, and sign-extends the 16-bit
//! immediate. Decoding is total: any opcode or ALU function code outside the defined
//! set decodes to `Opcode::Halt`.

use crate::core::pipeline::signals::AluOp;
use crate::isa::instruction::{BranchCond, Decoded, InstructionBits, Opcode};
use crate::isa::opcodes;

/// Sign-extends a 16-bit immediate to 32 bits.
///
/// # Arguments
///
/// * `imm` - Value whose low 16 bits hold the immediate; upper bits are ignored.
///
/// # Returns
///
/// The immediate as a two's-complement 32-bit word.
#[inline(always)]
pub const fn sign_extend16(imm: u32) -> u32 {
    (imm as u16 as i16) as i32 as u32
}

/// Maps an R-type function code to its ALU operation.
const fn alu_op(funct: u32) -> Option<AluOp> {
    match funct {
        opcodes::FUNCT_ADD => Some(AluOp::Add),
        opcodes::FUNCT_SUB => Some(AluOp::Sub),
        opcodes::FUNCT_AND => Some(AluOp::And),
        opcodes::FUNCT_OR => Some(AluOp::Or),
        opcodes::FUNCT_SLT => Some(AluOp::Slt),
        opcodes::FUNCT_MUL => Some(AluOp::Mul),
        _ => None,
    }
}

/// Decodes a 32-bit instruction.
///
/// # Arguments
///
/// * `inst` - The raw instruction word.
///
/// # Returns
///
/// A `Decoded` structure. Register fields are extracted unconditionally; whether
/// they are meaningful depends on `opcode`.
pub fn decode(inst: u32) -> Decoded {
    let opcode = match inst.opcode() {
        opcodes::OP_NOP => Opcode::Nop,
        opcodes::OP_ALU => match alu_op(inst.funct()) {
            Some(op) => Opcode::Alu(op),
            None => Opcode::Halt,
        },
        opcodes::OP_ADDI => Opcode::Addi,
        opcodes::OP_LW => Opcode::Lw,
        opcodes::OP_SW => Opcode::Sw,
        opcodes::OP_BEQ => Opcode::Branch(BranchCond::Eq),
        opcodes::OP_BNE => Opcode::Branch(BranchCond::Ne),
        opcodes::OP_BLT => Opcode::Branch(BranchCond::Lt),
        _ => Opcode::Halt,
    };

    Decoded {
        raw: inst,
        opcode,
        rs: inst.rs(),
        rt: inst.rt(),
        rd: inst.rd(),
        imm: sign_extend16(inst.imm16()),
    }
}
