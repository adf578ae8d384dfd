//! Core processor implementation.
//!
//! This module contains the CPU state and cycle loop, the instruction pipeline,
//! and the execution units it drives.

/// CPU core implementation and execution orchestration.
pub mod cpu;

/// Instruction pipeline implementation (stages, latches, hazards, control).
pub mod pipeline;

/// Execution units (ALU, cache).
pub mod units;

pub use self::cpu::Cpu;
