//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! entire processor state. It coordinates the following:
//! 1. **State Management:** Maintains registers, the program counter, and the halt flag.
//! 2. **Pipeline Control:** Owns the four latches, the writeback-pending bit, and the squash flag.
//! 3. **Memory Hierarchy:** Owns the instruction and data caches.
//! 4. **System Integration:** Owns the arbiter and backing store through `System`.

/// Per-cycle execution and commit.
pub mod execution;

use crate::common::RegisterFile;
use crate::config::Config;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry};
use crate::core::units::cache::Cache;
use crate::isa::disasm::disassemble;
use crate::soc::System;
use crate::stats::SimStats;

/// Main CPU structure containing all processor state and components.
///
/// The CPU advances the five-stage pipeline one clock at a time through
/// [`Cpu::tick`], driving both caches against the shared memory port.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// General-purpose registers.
    pub regs: RegisterFile,
    /// Program Counter (word address).
    pub pc: u32,

    /// Arbiter and backing store.
    pub bus: System,
    /// Instruction cache.
    pub icache: Cache,
    /// Data cache.
    pub dcache: Cache,

    /// IF/ID Latch.
    pub if_id: IfIdEntry,
    /// ID/EX Latch.
    pub id_ex: IdExEntry,
    /// EX/MEM Latch.
    pub ex_mem: ExMemEntry,
    /// MEM/WB Latch.
    pub mem_wb: MemWbEntry,
    /// MEM/WB holds an entry that has not been written back yet.
    pub wb_pending: bool,
    /// The instruction in execute is on the wrong path of a taken branch.
    pub branch_taken: bool,

    /// A halt reached writeback; no further state changes happen.
    pub halted: bool,
    /// Emit per-stage `trace` events (in addition to the subscriber's own filter).
    pub trace: bool,
    /// Performance counters.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a new CPU with the given system and configuration.
    ///
    /// # Arguments
    ///
    /// * `system` - The memory side of the machine.
    /// * `config` - Cache sizes, start PC, and trace settings.
    ///
    /// # Returns
    ///
    /// A CPU with empty latches, cold caches, and zeroed registers, about to fetch
    /// from `config.general.start_pc`.
    pub fn new(system: System, config: &Config) -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: config.general.start_pc,
            bus: system,
            icache: Cache::from_config("icache", &config.cache.icache),
            dcache: Cache::from_config("dcache", &config.cache.dcache),
            if_id: IfIdEntry::default(),
            id_ex: IdExEntry::default(),
            ex_mem: ExMemEntry::default(),
            mem_wb: MemWbEntry::default(),
            wb_pending: false,
            branch_taken: false,
            halted: false,
            trace: config.general.trace_pipeline,
            stats: SimStats::default(),
        }
    }

    /// Returns `true` once a halt instruction has reached writeback.
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    /// Emits the PC, every latch, and the register file as `debug` events.
    pub fn dump_state(&self) {
        tracing::debug!(pc = self.pc, halted = self.halted, "cpu state");
        tracing::debug!(pc = self.if_id.pc, inst = %disassemble(self.if_id.inst), "IF/ID");
        tracing::debug!(pc = self.id_ex.pc, inst = %disassemble(self.id_ex.inst), "ID/EX");
        tracing::debug!(
            pc = self.ex_mem.pc,
            inst = %disassemble(self.ex_mem.inst),
            squashed = self.ex_mem.squashed,
            "EX/MEM"
        );
        tracing::debug!(
            pc = self.mem_wb.pc,
            inst = %disassemble(self.mem_wb.inst),
            squashed = self.mem_wb.squashed,
            "MEM/WB"
        );
        self.regs.dump();
    }
}
