//! Main Execution Loop.
//!
//! This module implements the clock cycle of the CPU. It performs the following:
//! 1. **Halt Detection:** Stops all state changes once a live halt sits in MEM/WB.
//! 2. **Memory Port:** Drives both caches, arbitrates their requests, and steps them.
//! 3. **Stage Evaluation:** Computes every stage's output from the pre-cycle snapshot.
//! 4. **Control and Commit:** Applies the controller's decision to the PC and all latches at once.
//! 5. **Observability:** Counts statistics and emits a per-cycle pipeline trace.

use super::Cpu;
use crate::core::pipeline::control::{ControlInputs, PcAction, decide};
use crate::core::pipeline::hazards::need_stall_load_use;
use crate::core::pipeline::latches::LatchAction;
use crate::core::pipeline::stages::{
    data_access, decode_stage, execute_stage, fetch_access, fetch_stage, mem_stage, wb_stage,
};
use crate::core::units::cache::CacheEvent;
use crate::isa::disasm::disassemble;

impl Cpu {
    /// Advances the machine by one clock cycle.
    ///
    /// All stages read the state as it was at the start of the cycle; the new PC,
    /// latches, register write, and squash flag are committed together at the end.
    /// Once the core has halted this is a no-op.
    pub fn tick(&mut self) {
        if self.halted {
            return;
        }
        if self.mem_wb.is_halt() {
            self.halted = true;
            if self.wb_pending {
                self.stats.instructions_retired += 1;
            }
            tracing::info!(
                pc = self.mem_wb.pc,
                cycles = self.stats.cycles,
                retired = self.stats.instructions_retired,
                "halted"
            );
            return;
        }

        self.stats.cycles += 1;

        // Memory port: both caches present requests, the arbiter picks one, both step.
        let iaccess = fetch_access(self.pc);
        let daccess = data_access(&self.ex_mem);
        let ireq = self.icache.request(&iaccess);
        let dreq = self.dcache.request(&daccess);
        let (port, grant) = self.bus.cycle(ireq, dreq);
        let iout = self.icache.step(&iaccess, &port.response(grant.instruction));
        let dout = self.dcache.step(&daccess, &port.response(grant.data));

        // Stages, all from the pre-cycle snapshot.
        let wb = wb_stage(&self.mem_wb, self.wb_pending);
        let squash = self.branch_taken;
        let ex = execute_stage(&self.id_ex, &self.ex_mem, &self.mem_wb, squash);
        let load_use = need_stall_load_use(&self.id_ex, &self.if_id, squash);

        let decision = decide(&ControlInputs {
            icache_stall: iout.stall,
            dcache_stall: dout.stall,
            load_use,
            redirect: ex.redirect,
            branch_taken: squash,
            resolved_branch: self.id_ex.redirected,
        });

        let id_next = decode_stage(&self.if_id, &self.regs, wb.write);
        let if_next = fetch_stage(self.pc, &iout);
        let mem_next = mem_stage(&self.ex_mem, &dout);

        if self.trace {
            tracing::info!(
                cycle = self.stats.cycles,
                pc = self.pc,
                if_id = %disassemble(self.if_id.inst),
                id_ex = %disassemble(self.id_ex.inst),
                ex_mem = %disassemble(self.ex_mem.inst),
                mem_wb = %disassemble(self.mem_wb.inst),
                istall = iout.stall,
                dstall = dout.stall,
                load_use,
                squash,
                "pipeline"
            );
        }
        if iout.stall || dout.stall || load_use || ex.redirect.is_some() {
            tracing::debug!(?decision, "pipeline control");
        }

        // Statistics.
        let stats = &mut self.stats;
        match iout.event {
            CacheEvent::Hit if decision.pc == PcAction::Advance => stats.icache_hits += 1,
            CacheEvent::Miss => stats.icache_misses += 1,
            _ => {}
        }
        match dout.event {
            CacheEvent::Hit => stats.dcache_hits += 1,
            CacheEvent::Miss => stats.dcache_misses += 1,
            CacheEvent::WriteThrough => stats.dcache_writes += 1,
            _ => {}
        }
        stats.port_grants_instruction += u64::from(grant.instruction);
        stats.port_grants_data += u64::from(grant.data);
        stats.port_deferred_instruction += u64::from(ireq.is_some() && grant.data);
        stats.stalls_icache += u64::from(iout.stall);
        stats.stalls_dcache += u64::from(dout.stall);
        stats.stalls_load_use += u64::from(load_use && !iout.stall && !dout.stall);
        stats.branches_taken += u64::from(ex.redirect.is_some());
        stats.squashed += u64::from(wb.squashed);
        stats.instructions_retired += u64::from(wb.retired);

        // Commit.
        if let Some((rd, val)) = wb.write {
            self.regs.write(rd, val);
        }

        self.pc = match decision.pc {
            PcAction::Advance => self.pc.wrapping_add(1),
            PcAction::Hold => self.pc,
            PcAction::Redirect(target) => target,
        };
        decision.if_id.apply(&mut self.if_id, if_next);
        decision.id_ex.apply(&mut self.id_ex, id_next);
        if ex.redirect.is_some() && decision.id_ex == LatchAction::Hold {
            self.id_ex.redirected = true;
        }
        decision.ex_mem.apply(&mut self.ex_mem, ex.entry);
        decision.mem_wb.apply(&mut self.mem_wb, mem_next);
        self.wb_pending = decision.mem_wb == LatchAction::Advance;
        self.branch_taken = decision.branch_taken_next;
    }
}
