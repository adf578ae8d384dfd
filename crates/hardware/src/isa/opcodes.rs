//! Major opcodes (bits 31-26) and ALU function codes (bits 5-0).

/// No operation. The all-zero word is also the bubble encoding.
pub const OP_NOP: u32 = 0x00;

/// Register-register arithmetic; the operation is selected by the function code.
pub const OP_ALU: u32 = 0x01;

/// Add sign-extended immediate (ADDI).
pub const OP_ADDI: u32 = 0x02;

/// Load word (LW).
pub const OP_LW: u32 = 0x03;

/// Store word (SW).
pub const OP_SW: u32 = 0x04;

/// Branch if equal (BEQ).
pub const OP_BEQ: u32 = 0x05;

/// Branch if not equal (BNE).
pub const OP_BNE: u32 = 0x06;

/// Branch if less than, signed (BLT).
pub const OP_BLT: u32 = 0x07;

/// Stop the machine when the instruction reaches writeback.
pub const OP_HALT: u32 = 0x3F;

/// ADD: `rd = rs + rt`.
pub const FUNCT_ADD: u32 = 0;

/// SUB: `rd = rs - rt`.
pub const FUNCT_SUB: u32 = 1;

/// AND: `rd = rs & rt`.
pub const FUNCT_AND: u32 = 2;

/// OR: `rd = rs | rt`.
pub const FUNCT_OR: u32 = 3;

/// SLT: `rd = (rs < rt) as signed`.
pub const FUNCT_SLT: u32 = 4;

/// MUL: low 32 bits of `rs * rt`.
pub const FUNCT_MUL: u32 = 5;
