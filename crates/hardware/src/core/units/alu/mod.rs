//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used in the Execute stage. All
//! operations work on 32-bit words and wrap on overflow.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul
//! - [`logic`]:      Or, And, Slt, and the branch comparisons

/// Integer arithmetic operations (add, subtract, multiply).
pub mod arithmetic;

/// Bitwise logical and comparison operations (or, and, slt, branch conditions).
pub mod logic;

use crate::core::pipeline::signals::AluOp;
use crate::isa::instruction::BranchCond;

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand
    /// * `b`  - Second operand (register or sign-extended immediate)
    ///
    /// # Returns
    ///
    /// The 32-bit result of the ALU operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipesim_core::core::units::alu::Alu;
    /// use pipesim_core::core::pipeline::signals::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 42, 8), 50);
    /// assert_eq!(Alu::execute(AluOp::Add, u32::MAX, 1), 0);
    /// assert_eq!(Alu::execute(AluOp::Slt, -5_i32 as u32, 10), 1);
    /// assert_eq!(Alu::execute(AluOp::Mul, 0x1_0000, 0x1_0000), 0);
    /// ```
    pub const fn execute(op: AluOp, a: u32, b: u32) -> u32 {
        match op {
            AluOp::Add | AluOp::Sub | AluOp::Mul => arithmetic::execute(op, a, b),
            AluOp::Or | AluOp::And | AluOp::Slt => logic::execute(op, a, b),
        }
    }

    /// Evaluates a branch condition.
    ///
    /// # Arguments
    ///
    /// * `cond` - The comparison encoded by the branch opcode.
    /// * `a`    - Value of `rs`.
    /// * `b`    - Value of `rt`.
    ///
    /// # Returns
    ///
    /// `true` if the branch is taken.
    pub const fn branch_taken(cond: BranchCond, a: u32, b: u32) -> bool {
        logic::compare(cond, a, b)
    }
}
