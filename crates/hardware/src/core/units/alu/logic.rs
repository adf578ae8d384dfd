//! ALU logical and comparison operations.
//!
//! Implements bitwise OR and AND, signed set-less-than, and the three branch
//! comparisons. Comparison results are always 0 or 1.

use crate::core::pipeline::signals::AluOp;
use crate::isa::instruction::BranchCond;

/// Executes a logical or comparison operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be a logic/comparison variant).
/// * `a`  - First operand.
/// * `b`  - Second operand.
///
/// # Returns
///
/// The 32-bit result. Returns `0` for non-logic opcodes.
pub const fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    match op {
        AluOp::Or => a | b,
        AluOp::And => a & b,
        AluOp::Slt => ((a as i32) < (b as i32)) as u32,
        AluOp::Add | AluOp::Sub | AluOp::Mul => 0,
    }
}

/// Evaluates a branch comparison; `Lt` is signed.
pub const fn compare(cond: BranchCond, a: u32, b: u32) -> bool {
    match cond {
        BranchCond::Eq => a == b,
        BranchCond::Ne => a != b,
        BranchCond::Lt => (a as i32) < (b as i32),
    }
}
