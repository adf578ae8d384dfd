//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the instruction pipeline. It selects the
//! register write for the MEM/WB instruction and reports whether it retires. A MEM/WB
//! entry that is held across frozen cycles is written back only once.

use crate::core::pipeline::latches::MemWbEntry;

/// Outcome of the writeback stage for one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WritebackOutput {
    /// Register write `(rd, value)` committed this cycle.
    pub write: Option<(usize, u32)>,
    /// A real (non-bubble, non-squashed) instruction retired this cycle.
    pub retired: bool,
    /// A squashed instruction left the pipeline this cycle.
    pub squashed: bool,
}

/// Executes the writeback stage of the pipeline.
///
/// # Arguments
///
/// * `mem_wb` - The MEM/WB latch.
/// * `fresh` - `true` on the first cycle this entry sits in MEM/WB.
///
/// # Returns
///
/// The register write and retire outcome. Stale entries produce nothing.
pub fn wb_stage(mem_wb: &MemWbEntry, fresh: bool) -> WritebackOutput {
    if !fresh {
        return WritebackOutput::default();
    }
    if mem_wb.squashed {
        return WritebackOutput {
            squashed: !mem_wb.ctrl.is_nop(),
            ..WritebackOutput::default()
        };
    }
    if mem_wb.ctrl.is_nop() {
        return WritebackOutput::default();
    }

    let write = mem_wb
        .writes_reg()
        .then(|| (mem_wb.rd, mem_wb.result()));

    if let Some((rd, val)) = write {
        tracing::trace!(pc = mem_wb.pc, rd, val, "WB");
    }

    WritebackOutput {
        write,
        retired: true,
        squashed: false,
    }
}
