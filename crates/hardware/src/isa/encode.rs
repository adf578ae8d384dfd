//! Instruction encoders.
//!
//! One constructor per instruction, producing the 32-bit word the decoder accepts.
//! Register indices are truncated to 5 bits and immediates to 16 bits. Branch offsets
//! are relative to the instruction after the branch (`target = pc + 1 + offset`).

use crate::common::constants::NOP_INST;
use crate::isa::instruction::{IMM_MASK, OPCODE_SHIFT, RD_SHIFT, REG_MASK, RS_SHIFT, RT_SHIFT};
use crate::isa::opcodes::{
    FUNCT_ADD, FUNCT_AND, FUNCT_MUL, FUNCT_OR, FUNCT_SLT, FUNCT_SUB, OP_ADDI, OP_ALU, OP_BEQ,
    OP_BLT, OP_BNE, OP_HALT, OP_LW, OP_SW,
};

const fn r_type(funct: u32, rd: usize, rs: usize, rt: usize) -> u32 {
    (OP_ALU << OPCODE_SHIFT)
        | (((rs as u32) & REG_MASK) << RS_SHIFT)
        | (((rt as u32) & REG_MASK) << RT_SHIFT)
        | (((rd as u32) & REG_MASK) << RD_SHIFT)
        | funct
}

const fn i_type(opcode: u32, rs: usize, rt: usize, imm: i16) -> u32 {
    (opcode << OPCODE_SHIFT)
        | (((rs as u32) & REG_MASK) << RS_SHIFT)
        | (((rt as u32) & REG_MASK) << RT_SHIFT)
        | ((imm as u16 as u32) & IMM_MASK)
}

/// `nop`
pub const fn nop() -> u32 {
    NOP_INST
}

/// `halt`
pub const fn halt() -> u32 {
    OP_HALT << OPCODE_SHIFT
}

/// `add rd, rs, rt`
pub const fn add(rd: usize, rs: usize, rt: usize) -> u32 {
    r_type(FUNCT_ADD, rd, rs, rt)
}

/// `sub rd, rs, rt`
pub const fn sub(rd: usize, rs: usize, rt: usize) -> u32 {
    r_type(FUNCT_SUB, rd, rs, rt)
}

/// `and rd, rs, rt`
pub const fn and(rd: usize, rs: usize, rt: usize) -> u32 {
    r_type(FUNCT_AND, rd, rs, rt)
}

/// `or rd, rs, rt`
pub const fn or(rd: usize, rs: usize, rt: usize) -> u32 {
    r_type(FUNCT_OR, rd, rs, rt)
}

/// `slt rd, rs, rt`
pub const fn slt(rd: usize, rs: usize, rt: usize) -> u32 {
    r_type(FUNCT_SLT, rd, rs, rt)
}

/// `mul rd, rs, rt`
pub const fn mul(rd: usize, rs: usize, rt: usize) -> u32 {
    r_type(FUNCT_MUL, rd, rs, rt)
}

/// `addi rt, rs, imm`
pub const fn addi(rt: usize, rs: usize, imm: i16) -> u32 {
    i_type(OP_ADDI, rs, rt, imm)
}

/// `lw rt, imm(rs)`
pub const fn lw(rt: usize, rs: usize, imm: i16) -> u32 {
    i_type(OP_LW, rs, rt, imm)
}

/// `sw rt, imm(rs)`
pub const fn sw(rt: usize, rs: usize, imm: i16) -> u32 {
    i_type(OP_SW, rs, rt, imm)
}

/// `beq rs, rt, offset`
pub const fn beq(rs: usize, rt: usize, offset: i16) -> u32 {
    i_type(OP_BEQ, rs, rt, offset)
}

/// `bne rs, rt, offset`
pub const fn bne(rs: usize, rt: usize, offset: i16) -> u32 {
    i_type(OP_BNE, rs, rt, offset)
}

/// `blt rs, rt, offset`
pub const fn blt(rs: usize, rt: usize, offset: i16) -> u32 {
    i_type(OP_BLT, rs, rt, offset)
}
