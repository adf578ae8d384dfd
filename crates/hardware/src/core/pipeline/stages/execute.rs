//! Instruction Execute (EX) Stage.
//!
//! This module implements the third stage of the instruction pipeline. It performs:
//! 1. **Operand Forwarding:** Picks up results still in EX/MEM and MEM/WB.
//! 2. **ALU Execution:** Computes arithmetic results and load/store addresses.
//! 3. **Branch Resolution:** Evaluates branch conditions and reports taken targets.
//! 4. **Squashing:** Marks the wrong-path instruction behind a taken branch as inert.

use crate::core::pipeline::hazards::forward_rs;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, MemWbEntry};
use crate::core::pipeline::signals::OpBSrc;
use crate::core::units::alu::Alu;

/// Result of the execute stage for one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecuteOutput {
    /// Entry for the EX/MEM latch.
    pub entry: ExMemEntry,
    /// Branch target when a live branch resolved taken.
    pub redirect: Option<u32>,
}

/// Executes the instruction execute stage of the pipeline.
///
/// # Arguments
///
/// * `id_ex` - The ID/EX latch.
/// * `ex_mem` - The EX/MEM latch at the start of the cycle (forwarding source).
/// * `mem_wb` - The MEM/WB latch at the start of the cycle (forwarding source).
/// * `squash` - The taken-branch flag: the instruction in execute is on the wrong path.
///
/// # Returns
///
/// The EX/MEM entry and, for a taken branch that is not squashed, its target.
/// A branch that already redirected (`id_ex.redirected`) is neither squashed nor
/// redirects again.
pub fn execute_stage(
    id_ex: &IdExEntry,
    ex_mem: &ExMemEntry,
    mem_wb: &MemWbEntry,
    squash: bool,
) -> ExecuteOutput {
    let ctrl = id_ex.ctrl;
    let squash = squash && !id_ex.redirected;
    let (a, b_reg) = forward_rs(id_ex, ex_mem, mem_wb);

    let b = match ctrl.b_src {
        OpBSrc::Reg => b_reg,
        OpBSrc::Imm => id_ex.imm,
    };
    let alu = Alu::execute(ctrl.alu, a, b);

    let branch_taken = ctrl
        .branch
        .is_some_and(|cond| Alu::branch_taken(cond, a, b_reg));

    let entry = ExMemEntry {
        pc: id_ex.pc,
        inst: id_ex.inst,
        rd: id_ex.rd,
        alu,
        store_data: b_reg,
        branch_taken,
        ctrl,
        squashed: squash,
    };

    if squash {
        if !ctrl.is_nop() {
            tracing::debug!(pc = id_ex.pc, "EX squashed behind taken branch");
        }
        return ExecuteOutput {
            entry,
            redirect: None,
        };
    }

    let redirect =
        (branch_taken && !id_ex.redirected).then(|| id_ex.next_pc.wrapping_add(id_ex.imm));
    if let Some(target) = redirect {
        tracing::debug!(pc = id_ex.pc, target, "branch taken");
    }
    if !ctrl.is_nop() {
        tracing::trace!(
            pc = id_ex.pc,
            inst = %crate::isa::disasm::disassemble(id_ex.inst),
            alu,
            "EX"
        );
    }

    ExecuteOutput { entry, redirect }
}
