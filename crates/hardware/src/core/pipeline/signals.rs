//! Pipeline control signals and operation types.
//!
//! This module defines the signals that control instruction execution. It performs:
//! 1. **Operation Classification:** Categorizes ALU operations and branch conditions.
//! 2. **Operand Selection:** Chooses between a register and the immediate for ALU input B.
//! 3. **Memory and Writeback Control:** Enables loads, stores, and register writes.
//! 4. **Machine Control:** Marks the halt instruction.

use crate::isa::instruction::{BranchCond, Opcode};

/// ALU operation types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Integer addition (also address generation).
    #[default]
    Add,

    /// Integer subtraction.
    Sub,

    /// Bitwise AND.
    And,

    /// Bitwise OR.
    Or,

    /// Set less than (signed).
    Slt,

    /// Integer multiply (low 32 bits).
    Mul,
}

/// Source selection for ALU operand B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpBSrc {
    /// Second source register (`rt`).
    #[default]
    Reg,

    /// Sign-extended immediate.
    Imm,
}

/// Control signals generated by the decode stage.
///
/// The all-default value is the signal set of a bubble: it writes nothing, touches
/// no memory, and never redirects or halts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Enable write to the destination register.
    pub reg_write: bool,
    /// Enable memory read operation (load).
    pub mem_read: bool,
    /// Enable memory write operation (store).
    pub mem_write: bool,
    /// Conditional branch comparison, if this is a branch.
    pub branch: Option<BranchCond>,
    /// ALU operation to perform.
    pub alu: AluOp,
    /// Source selection for ALU operand B.
    pub b_src: OpBSrc,
    /// Instruction stops the machine when it reaches writeback.
    pub halt: bool,
}

impl ControlSignals {
    /// Derives the control signals for a decoded operation.
    ///
    /// # Arguments
    ///
    /// * `opcode` - The decoded operation.
    ///
    /// # Returns
    ///
    /// The signal set that drives execute, memory, and writeback for it.
    pub const fn for_opcode(opcode: Opcode) -> Self {
        let none = Self {
            reg_write: false,
            mem_read: false,
            mem_write: false,
            branch: None,
            alu: AluOp::Add,
            b_src: OpBSrc::Reg,
            halt: false,
        };
        match opcode {
            Opcode::Nop => none,
            Opcode::Alu(op) => Self {
                reg_write: true,
                alu: op,
                ..none
            },
            Opcode::Addi => Self {
                reg_write: true,
                b_src: OpBSrc::Imm,
                ..none
            },
            Opcode::Lw => Self {
                reg_write: true,
                mem_read: true,
                b_src: OpBSrc::Imm,
                ..none
            },
            Opcode::Sw => Self {
                mem_write: true,
                b_src: OpBSrc::Imm,
                ..none
            },
            Opcode::Branch(cond) => Self {
                branch: Some(cond),
                ..none
            },
            Opcode::Halt => Self { halt: true, ..none },
        }
    }

    /// Returns `true` for the signal set of a no-op or bubble.
    pub fn is_nop(&self) -> bool {
        *self == Self::default()
    }
}
