//! Instruction Disassembler.
//!
//! Converts a 32-bit instruction encoding into a human-readable mnemonic
//! string for debug tracing, logging, and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use pipesim_core::isa::{disasm::disassemble, encode};
//! assert_eq!(disassemble(encode::addi(1, 0, 10)), "addi r1, r0, 10");
//! assert_eq!(disassemble(encode::lw(2, 1, -4)), "lw r2, -4(r1)");
//! ```

use crate::core::pipeline::signals::AluOp;
use crate::isa::decode::decode;
use crate::isa::instruction::{BranchCond, InstructionBits, Opcode};
use crate::isa::opcodes::OP_HALT;

const fn alu_mnemonic(op: AluOp) -> &'static str {
    match op {
        AluOp::Add => "add",
        AluOp::Sub => "sub",
        AluOp::And => "and",
        AluOp::Or => "or",
        AluOp::Slt => "slt",
        AluOp::Mul => "mul",
    }
}

const fn branch_mnemonic(cond: BranchCond) -> &'static str {
    match cond {
        BranchCond::Eq => "beq",
        BranchCond::Ne => "bne",
        BranchCond::Lt => "blt",
    }
}

/// Disassembles a 32-bit instruction into a human-readable string.
///
/// Encodings that decode to a halt without being the canonical `halt` word are
/// shown as `.word 0x........ (halt)`.
///
/// # Arguments
///
/// * `inst` - The raw 32-bit instruction encoding.
pub fn disassemble(inst: u32) -> String {
    let d = decode(inst);
    let imm = d.imm as i32;

    match d.opcode {
        Opcode::Nop => "nop".to_string(),
        Opcode::Alu(op) => format!("{} r{}, r{}, r{}", alu_mnemonic(op), d.rd, d.rs, d.rt),
        Opcode::Addi => format!("addi r{}, r{}, {imm}", d.rt, d.rs),
        Opcode::Lw => format!("lw r{}, {imm}(r{})", d.rt, d.rs),
        Opcode::Sw => format!("sw r{}, {imm}(r{})", d.rt, d.rs),
        Opcode::Branch(cond) => format!("{} r{}, r{}, {imm}", branch_mnemonic(cond), d.rs, d.rt),
        Opcode::Halt if inst.opcode() == OP_HALT => "halt".to_string(),
        Opcode::Halt => format!(".word {inst:#010x} (halt)"),
    }
}
