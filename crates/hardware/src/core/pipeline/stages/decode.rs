//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the instruction pipeline. It decodes
//! the IF/ID instruction, derives its control signals, and reads its source operands
//! from the register file. A register written back in the same cycle is observed
//! here (write-before-read).

use crate::common::reg::RegisterFile;
use crate::core::pipeline::hazards::read_with_bypass;
use crate::core::pipeline::latches::{IdExEntry, IfIdEntry};
use crate::core::pipeline::signals::ControlSignals;
use crate::isa::decode::decode;

/// Executes the instruction decode stage of the pipeline.
///
/// # Arguments
///
/// * `if_id` - The IF/ID latch.
/// * `regs` - Register file as of the start of the cycle.
/// * `wb` - Register write performed by writeback this cycle, if any.
///
/// # Returns
///
/// The ID/EX entry for the decoded instruction.
pub fn decode_stage(if_id: &IfIdEntry, regs: &RegisterFile, wb: Option<(usize, u32)>) -> IdExEntry {
    let d = decode(if_id.inst);
    let ctrl = ControlSignals::for_opcode(d.opcode);

    let entry = IdExEntry {
        pc: if_id.pc,
        next_pc: if_id.next_pc,
        inst: if_id.inst,
        rs: d.rs,
        rt: d.rt,
        rd: d.dest(),
        imm: d.imm,
        rv1: read_with_bypass(regs, d.rs, wb),
        rv2: read_with_bypass(regs, d.rt, wb),
        ctrl,
        redirected: false,
    };

    if !ctrl.is_nop() {
        tracing::trace!(
            pc = entry.pc,
            inst = %crate::isa::disasm::disassemble(entry.inst),
            rv1 = entry.rv1,
            rv2 = entry.rv2,
            "ID"
        );
    }
    entry
}
