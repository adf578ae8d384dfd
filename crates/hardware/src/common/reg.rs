//! General-Purpose Register File.
//!
//! This module provides the `RegisterFile` struct. It provides:
//! 1. **Storage:** Thirty-two 32-bit architectural registers.
//! 2. **Hardwired Zero:** Register `r0` always reads zero and ignores writes.
//! 3. **Observability:** Dumping register state through `tracing` during simulation.

use crate::common::constants::NUM_REGS;

/// Architectural register file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u32; NUM_REGS],
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a value from a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Register `r0` always returns 0.
    ///
    /// # Returns
    ///
    /// The 32-bit value stored in the specified register.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 {
            0
        } else {
            self.regs.get(idx).copied().unwrap_or(0)
        }
    }

    /// Writes a value to a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to `r0` are ignored.
    /// * `val` - The 32-bit value to write.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx == 0 {
            return;
        }
        if let Some(slot) = self.regs.get_mut(idx) {
            *slot = val;
        }
    }

    /// Returns a snapshot of all registers, `r0` included.
    pub const fn snapshot(&self) -> [u32; NUM_REGS] {
        self.regs
    }

    /// Emits the non-zero registers as a single `debug` event.
    pub fn dump(&self) {
        let live: Vec<String> = self
            .regs
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0)
            .map(|(i, v)| format!("r{i}={v:#010x}"))
            .collect();
        tracing::debug!(regs = %live.join(" "), "register file");
    }
}
