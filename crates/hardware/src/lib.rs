//! Five-stage pipelined CPU simulator library.
//!
//! This crate implements a cycle-accurate model of a small word-addressed processor with the following:
//! 1. **Core:** Pipeline (fetch, decode, execute, memory, writeback), forwarding, and the stall/flush controller.
//! 2. **Memory:** Direct-mapped write-through instruction and data caches with one-word lines.
//! 3. **ISA:** Decoding, encoding, and disassembly of the 32-bit instruction format.
//! 4. **SoC:** Single-port memory arbiter (data over instruction) and the backing store.
//! 5. **Simulation:** Image loader, configuration, and statistics collection.

/// Common types and constants (register file, access types, errors).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// CPU core (pipeline, execution units, cycle loop).
pub mod core;
/// Instruction set (opcodes, decode, encode, disassembly).
pub mod isa;
/// Program loading and the top-level simulator.
pub mod sim;
/// System side of the core (arbiter, backing store).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main CPU type; holds pipeline latches, caches, and stats.
pub use crate::core::Cpu;
/// Top-level simulator; owns the CPU and drives it clock by clock.
pub use crate::sim::Simulator;
/// Memory side of the machine (arbiter and backing store); construct with `System::new`.
pub use crate::soc::System;
