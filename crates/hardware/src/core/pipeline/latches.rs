//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the entry types carried between the five stages:
//! Fetch → Decode → Execute → Memory → Writeback.
//!
//! 1. **Instruction Flow:** One record per stage boundary, overwritten on every advancing cycle.
//! 2. **Bubbles:** The `Default` value of every entry is the cleared (no-op) encoding.
//! 3. **Squash Propagation:** Instructions squashed by a taken branch keep flowing but are inert.
//! 4. **Latch Control:** `LatchAction` applies an advance, hold, or clear decision to a latch.

use crate::core::pipeline::signals::ControlSignals;

/// Entry in the IF/ID pipeline latch (Fetch to Decode stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct IfIdEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Sequential successor of `pc`.
    pub next_pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
}

/// Entry in the ID/EX pipeline latch (Decode to Execute stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct IdExEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Sequential successor of `pc`.
    pub next_pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// First source register index.
    pub rs: usize,
    /// Second source register index.
    pub rt: usize,
    /// Destination register index (0 when nothing is written).
    pub rd: usize,
    /// Sign-extended immediate value.
    pub imm: u32,
    /// Value read from `rs` in decode.
    pub rv1: u32,
    /// Value read from `rt` in decode.
    pub rv2: u32,
    /// Control signals for downstream pipeline stages.
    pub ctrl: ControlSignals,
    /// Taken branch that already redirected fetch while held here by a data stall.
    pub redirected: bool,
}

/// Entry in the EX/MEM pipeline latch (Execute to Memory stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct ExMemEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Destination register index.
    pub rd: usize,
    /// ALU result, or the effective address for loads and stores.
    pub alu: u32,
    /// Data to be stored (for store instructions).
    pub store_data: u32,
    /// Branch condition evaluated in execute.
    pub branch_taken: bool,
    /// Control signals for downstream pipeline stages.
    pub ctrl: ControlSignals,
    /// Instruction was on the wrong path of a taken branch; it has no effect.
    pub squashed: bool,
}

impl ExMemEntry {
    /// Returns `true` if this entry will write a register when it retires.
    pub const fn writes_reg(&self) -> bool {
        self.ctrl.reg_write && !self.squashed && self.rd != 0
    }
}

/// Entry in the MEM/WB pipeline latch (Memory to Writeback stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct MemWbEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Destination register index.
    pub rd: usize,
    /// ALU computation result (for non-load instructions).
    pub alu: u32,
    /// Data loaded from memory (for load instructions).
    pub load_data: u32,
    /// Control signals for the writeback stage.
    pub ctrl: ControlSignals,
    /// Instruction was on the wrong path of a taken branch; it has no effect.
    pub squashed: bool,
}

impl MemWbEntry {
    /// Returns `true` if this entry writes a register.
    pub const fn writes_reg(&self) -> bool {
        self.ctrl.reg_write && !self.squashed && self.rd != 0
    }

    /// Value this entry writes back: load data for loads, otherwise the ALU result.
    pub const fn result(&self) -> u32 {
        if self.ctrl.mem_read {
            self.load_data
        } else {
            self.alu
        }
    }

    /// Returns `true` if this entry is a live halt.
    pub const fn is_halt(&self) -> bool {
        self.ctrl.halt && !self.squashed
    }
}

/// Per-cycle decision for one pipeline latch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LatchAction {
    /// Latch the value computed by the preceding stage.
    #[default]
    Advance,
    /// Keep the stored value unchanged.
    Hold,
    /// Replace the stored value with the no-op encoding.
    Clear,
}

impl LatchAction {
    /// Applies this action to a latch.
    ///
    /// # Arguments
    ///
    /// * `latch` - The latch register being committed.
    /// * `next` - Value produced by the preceding stage this cycle.
    pub fn apply<T: Default>(self, latch: &mut T, next: T) {
        match self {
            Self::Advance => *latch = next,
            Self::Hold => {}
            Self::Clear => *latch = T::default(),
        }
    }
}
