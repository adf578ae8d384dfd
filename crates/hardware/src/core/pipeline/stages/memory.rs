//! Memory Access (MEM) Stage.
//!
//! This module implements the fourth stage of the instruction pipeline. It drives the
//! data cache from the EX/MEM latch and captures the loaded word into MEM/WB. Squashed
//! instructions and non-memory instructions leave the cache idle.

use crate::common::data::CacheAccess;
use crate::core::pipeline::latches::{ExMemEntry, MemWbEntry};
use crate::core::units::cache::CacheOutput;

/// Returns the data cache access for the instruction in EX/MEM.
///
/// # Arguments
///
/// * `ex_mem` - The EX/MEM latch at the start of the cycle.
///
/// # Returns
///
/// A read for live loads, a write of `store_data` for live stores, otherwise idle.
pub const fn data_access(ex_mem: &ExMemEntry) -> CacheAccess {
    if ex_mem.squashed {
        return CacheAccess::idle();
    }
    if ex_mem.ctrl.mem_read {
        CacheAccess::read(ex_mem.alu)
    } else if ex_mem.ctrl.mem_write {
        CacheAccess::write(ex_mem.alu, ex_mem.store_data)
    } else {
        CacheAccess::idle()
    }
}

/// Executes the memory stage of the pipeline.
///
/// # Arguments
///
/// * `ex_mem` - The EX/MEM latch.
/// * `dcache` - Outputs of the data cache for `data_access(ex_mem)`.
///
/// # Returns
///
/// The MEM/WB entry. It is only latched when the data cache does not stall.
pub fn mem_stage(ex_mem: &ExMemEntry, dcache: &CacheOutput) -> MemWbEntry {
    let load_data = if ex_mem.ctrl.mem_read {
        dcache.read_data
    } else {
        0
    };

    if !dcache.stall && !ex_mem.squashed && (ex_mem.ctrl.mem_read || ex_mem.ctrl.mem_write) {
        tracing::trace!(
            pc = ex_mem.pc,
            addr = ex_mem.alu,
            load = ex_mem.ctrl.mem_read,
            data = if ex_mem.ctrl.mem_read { load_data } else { ex_mem.store_data },
            "MEM"
        );
    }

    MemWbEntry {
        pc: ex_mem.pc,
        inst: ex_mem.inst,
        rd: ex_mem.rd,
        alu: ex_mem.alu,
        load_data,
        ctrl: ex_mem.ctrl,
        squashed: ex_mem.squashed,
    }
}
