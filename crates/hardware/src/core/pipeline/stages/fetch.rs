//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the instruction pipeline. It drives
//! the instruction cache with the current Program Counter and, when the cache does
//! not stall, produces the IF/ID entry for the word it returned.

use crate::common::data::CacheAccess;
use crate::core::pipeline::latches::IfIdEntry;
use crate::core::units::cache::CacheOutput;

/// Returns the instruction cache access for this cycle: a read of the word at `pc`.
pub const fn fetch_access(pc: u32) -> CacheAccess {
    CacheAccess::read(pc)
}

/// Executes the instruction fetch stage of the pipeline.
///
/// # Arguments
///
/// * `pc` - Program counter at the start of the cycle.
/// * `icache` - Outputs of the instruction cache for `fetch_access(pc)`.
///
/// # Returns
///
/// The IF/ID entry. It is only latched when the controller advances IF/ID, which
/// never happens while `icache.stall` is set.
pub fn fetch_stage(pc: u32, icache: &CacheOutput) -> IfIdEntry {
    let entry = IfIdEntry {
        pc,
        next_pc: pc.wrapping_add(1),
        inst: icache.read_data,
    };
    if !icache.stall {
        tracing::trace!(
            pc,
            inst = %crate::isa::disasm::disassemble(entry.inst),
            "IF"
        );
    }
    entry
}
