//! Pipeline Stall and Flush Controller.
//!
//! Every cycle this module decides, for the PC and each of the four pipeline latches,
//! whether the register latches its new value, holds its current one, or is cleared
//! to the no-op encoding. It is a pure function of the cycle's hazard signals:
//! 1. **Fetch/Decode Freeze:** Any cache stall or a load-use hazard holds the PC and IF/ID.
//! 2. **Bubble Insertion:** When the front end is frozen but execute keeps moving, ID/EX is cleared.
//! 3. **Memory Freeze:** A data cache stall holds EX/MEM and MEM/WB, and with them ID/EX.
//!    ID/EX holds instead of taking a bubble: execute cannot pass its instruction to a
//!    frozen EX/MEM, so a bubble there would drop it.
//! 4. **Branch Redirect:** A taken branch redirects the PC, clears IF/ID, and arms the squash flag.
//!    A branch held in execute by a data stall redirects once; the flag then waits for the
//!    instruction that follows it.

use crate::core::pipeline::latches::LatchAction;

/// Per-cycle decision for the program counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PcAction {
    /// Step to the next sequential instruction.
    #[default]
    Advance,
    /// Keep the current PC.
    Hold,
    /// Jump to the given target.
    Redirect(u32),
}

/// Hazard signals sampled by the controller in one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlInputs {
    /// The instruction cache cannot deliver the word at the PC this cycle.
    pub icache_stall: bool,
    /// The data cache cannot complete the memory stage's access this cycle.
    pub dcache_stall: bool,
    /// The instruction in decode reads the destination of the load in execute.
    pub load_use: bool,
    /// Target of a branch resolved taken in execute this cycle.
    pub redirect: Option<u32>,
    /// The instruction currently in execute is on the wrong path of a taken branch.
    pub branch_taken: bool,
    /// The instruction in execute is a taken branch that already redirected while held.
    pub resolved_branch: bool,
}

/// Actions for every pipeline register in one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlDecision {
    /// Program counter.
    pub pc: PcAction,
    /// IF/ID latch.
    pub if_id: LatchAction,
    /// ID/EX latch.
    pub id_ex: LatchAction,
    /// EX/MEM latch.
    pub ex_mem: LatchAction,
    /// MEM/WB latch.
    pub mem_wb: LatchAction,
    /// Next value of the taken-branch (squash) flag.
    pub branch_taken_next: bool,
}

/// Computes the stall and flush actions for one cycle.
///
/// # Arguments
///
/// * `inputs` - The cache stall signals, load-use hazard, branch outcome, and squash flag.
///
/// # Returns
///
/// The `ControlDecision` to apply when the cycle commits.
///
/// # Examples
///
/// ```
/// use pipesim_core::core::pipeline::control::{decide, ControlInputs, PcAction};
/// use pipesim_core::core::pipeline::latches::LatchAction;
///
/// let d = decide(&ControlInputs { icache_stall: true, ..ControlInputs::default() });
/// assert_eq!(d.pc, PcAction::Hold);
/// assert_eq!(d.if_id, LatchAction::Hold);
/// assert_eq!(d.id_ex, LatchAction::Clear);
/// assert_eq!(d.mem_wb, LatchAction::Advance);
/// ```
pub const fn decide(inputs: &ControlInputs) -> ControlDecision {
    let front_frozen = inputs.icache_stall || inputs.dcache_stall || inputs.load_use;

    let (pc, if_id) = match inputs.redirect {
        Some(target) => (PcAction::Redirect(target), LatchAction::Clear),
        None if front_frozen => (PcAction::Hold, LatchAction::Hold),
        None => (PcAction::Advance, LatchAction::Advance),
    };

    // Execute cannot hand its instruction to a frozen memory stage, so ID/EX keeps it.
    let id_ex = if inputs.dcache_stall {
        LatchAction::Hold
    } else if inputs.icache_stall || inputs.load_use {
        LatchAction::Clear
    } else {
        LatchAction::Advance
    };

    let back = if inputs.dcache_stall {
        LatchAction::Hold
    } else {
        LatchAction::Advance
    };

    // The flag covers one advancing cycle of execute; a frozen execute keeps it armed,
    // and a resolved branch leaving execute passes it on to its successor.
    let branch_taken_next = if inputs.dcache_stall {
        inputs.branch_taken || inputs.redirect.is_some()
    } else {
        inputs.redirect.is_some() || (inputs.branch_taken && inputs.resolved_branch)
    };

    ControlDecision {
        pc,
        if_id,
        id_ex,
        ex_mem: back,
        mem_wb: back,
        branch_taken_next,
    }
}
