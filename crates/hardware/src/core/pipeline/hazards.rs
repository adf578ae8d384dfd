//! Data Hazard Detection and Forwarding.
//!
//! This module implements the logic for maintaining pipeline consistency when data
//! dependencies exist between instructions. It provides:
//! 1. **Hazard Detection:** Identifies load-use hazards that require a one-cycle stall.
//! 2. **Operand Forwarding:** Resolves Read-After-Write (RAW) hazards by bypassing the register file.
//! 3. **Decode Bypass:** Lets decode observe the value being written back in the same cycle.

use crate::common::reg::RegisterFile;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry};
use crate::isa::decode::decode;

/// Checks if a pipeline stall is needed due to a load-use data hazard.
///
/// A load-use hazard occurs when an instruction in the Decode (ID) stage depends on
/// data that is currently being loaded from memory by an instruction in the Execute
/// (EX) stage. Loaded data is only available after the memory stage, one cycle too
/// late for forwarding into execute.
///
/// # Arguments
///
/// * `id_ex` - The ID/EX latch holding the instruction in execute.
/// * `if_id` - The IF/ID latch holding the instruction being decoded.
/// * `squashed` - The instruction in execute is on the wrong path and will not load.
///
/// # Returns
///
/// `true` if a stall is required to resolve the load-use hazard, `false` otherwise.
///
/// # Examples
///
/// ```text
/// ID/EX stage: lw  r1, 0(r2)    <- loads into r1 (in execute)
/// IF/ID stage: add r3, r1, r4   <- uses r1 (in decode)
/// ```
pub fn need_stall_load_use(id_ex: &IdExEntry, if_id: &IfIdEntry, squashed: bool) -> bool {
    if squashed || !id_ex.ctrl.mem_read || id_ex.rd == 0 {
        return false;
    }

    let next = decode(if_id.inst);
    (next.reads_rs() && next.rs == id_ex.rd) || (next.reads_rt() && next.rt == id_ex.rd)
}

/// Where a forwarded operand came from, for tracing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForwardSource {
    /// Value read in decode.
    RegFile,
    /// ALU result of the instruction one stage ahead.
    ExMem,
    /// Writeback value of the instruction two stages ahead.
    MemWb,
}

/// Forwards register values from later pipeline stages to resolve data hazards.
///
/// This function implements the register forwarding (bypassing) logic. It prefers the
/// most recent producer: EX/MEM (non-load ALU results) over MEM/WB (ALU results and
/// load data) over the value read in decode.
///
/// # Arguments
///
/// * `id_entry` - The instruction in execute requiring its operands.
/// * `ex_mem` - The EX/MEM latch (one instruction older).
/// * `mem_wb` - The MEM/WB latch (two instructions older).
///
/// # Returns
///
/// A tuple `(rs_val, rt_val)` containing the most recent available register values.
pub fn forward_rs(id_entry: &IdExEntry, ex_mem: &ExMemEntry, mem_wb: &MemWbEntry) -> (u32, u32) {
    let (a, a_src) = forward_one(id_entry.rs, id_entry.rv1, ex_mem, mem_wb);
    let (b, b_src) = forward_one(id_entry.rt, id_entry.rv2, ex_mem, mem_wb);

    if a_src != ForwardSource::RegFile || b_src != ForwardSource::RegFile {
        tracing::trace!(
            pc = id_entry.pc,
            rs = id_entry.rs,
            ?a_src,
            rt = id_entry.rt,
            ?b_src,
            "operand forwarded"
        );
    }
    (a, b)
}

fn forward_one(
    src: usize,
    decoded: u32,
    ex_mem: &ExMemEntry,
    mem_wb: &MemWbEntry,
) -> (u32, ForwardSource) {
    if src == 0 {
        return (0, ForwardSource::RegFile);
    }
    if ex_mem.writes_reg() && !ex_mem.ctrl.mem_read && ex_mem.rd == src {
        return (ex_mem.alu, ForwardSource::ExMem);
    }
    if mem_wb.writes_reg() && mem_wb.rd == src {
        return (mem_wb.result(), ForwardSource::MemWb);
    }
    (decoded, ForwardSource::RegFile)
}

/// Reads a register in decode, observing a write committed by writeback this cycle.
///
/// # Arguments
///
/// * `regs` - Register file as of the start of the cycle.
/// * `idx` - Register to read.
/// * `wb` - Register write performed by writeback this cycle, if any.
pub fn read_with_bypass(regs: &RegisterFile, idx: usize, wb: Option<(usize, u32)>) -> u32 {
    match wb {
        Some((rd, val)) if rd == idx && idx != 0 => val,
        _ => regs.read(idx),
    }
}
