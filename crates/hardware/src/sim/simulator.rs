//! Simulator: owns the CPU and drives it clock by clock.
//!
//! The `Simulator` is the single owner of all machine state. One call to `tick` is one
//! full clock cycle; `run` repeats it until the core halts or the configured cycle
//! budget runs out.

use crate::common::error::{SimError, SimResult};
use crate::config::Config;
use crate::core::Cpu;
use crate::soc::System;
use crate::stats::SimStats;

/// Top-level simulator: CPU, caches, and memory, stepped in lockstep.
#[derive(Clone, Debug)]
pub struct Simulator {
    /// CPU state (registers, latches, caches, memory system, stats).
    pub cpu: Cpu,
    max_cycles: u64,
}

impl Simulator {
    /// Creates a new simulator with the given system and configuration.
    pub fn new(system: System, config: &Config) -> Self {
        Self {
            cpu: Cpu::new(system, config),
            max_cycles: config.general.max_cycles,
        }
    }

    /// Validates `config` and builds a simulator with a zero-filled memory.
    ///
    /// # Errors
    ///
    /// Returns `SimError::InvalidConfig` if any size is rejected.
    pub fn from_config(config: &Config) -> SimResult<Self> {
        config.validate()?;
        Ok(Self::new(System::new(config), config))
    }

    /// Copies a program image into memory at word address `base`.
    ///
    /// # Errors
    ///
    /// Returns `SimError::ImageTooLarge` if the image does not fit.
    pub fn load_program(&mut self, base: u32, image: &[u32]) -> SimResult<()> {
        self.cpu.bus.load_binary_at(image, base)?;
        tracing::debug!(base, words = image.len(), "program loaded");
        Ok(())
    }

    /// Advances the simulator by one clock cycle.
    pub fn tick(&mut self) {
        self.cpu.tick();
    }

    /// Runs until the core halts.
    ///
    /// # Returns
    ///
    /// The number of simulated cycles.
    ///
    /// # Errors
    ///
    /// Returns `SimError::CycleLimit` if no halt is reached within the budget.
    /// A halt that reaches MEM/WB on the last budgeted cycle still counts as finished.
    pub fn run(&mut self) -> SimResult<u64> {
        let limit = self.max_cycles;
        while !self.cpu.is_halted() {
            // Observing a halt already in MEM/WB costs no cycle.
            if self.cpu.stats.cycles >= limit && !self.cpu.mem_wb.is_halt() {
                self.cpu.dump_state();
                return Err(SimError::CycleLimit { limit });
            }
            self.tick();
        }
        Ok(self.cpu.stats.cycles)
    }

    /// Runs exactly `cycles` ticks (or fewer if the core halts first).
    pub fn run_for(&mut self, cycles: u64) {
        for _ in 0..cycles {
            if self.cpu.is_halted() {
                break;
            }
            self.tick();
        }
    }

    /// Returns `true` once the core has halted.
    pub const fn is_halted(&self) -> bool {
        self.cpu.is_halted()
    }

    /// Reads a general-purpose register.
    pub fn reg(&self, idx: usize) -> u32 {
        self.cpu.regs.read(idx)
    }

    /// Reads a word directly from the backing store, bypassing the caches.
    pub fn mem(&self, addr: u32) -> u32 {
        self.cpu.bus.memory.read(addr)
    }

    /// Returns the performance counters.
    pub const fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }
}
