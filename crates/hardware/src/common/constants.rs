//! Global System Constants.
//!
//! This module defines machine-wide constants used across the simulator. It includes:
//! 1. **Architectural Constants:** Register count, word size, and the reset PC.
//! 2. **Encoding Constants:** The cleared (no-op) instruction word used for bubbles.

/// Number of general-purpose registers.
pub const NUM_REGS: usize = 32;

/// Size of a machine word in bytes, used when loading raw binary images.
pub const WORD_BYTES: usize = 4;

/// Encoding placed into a pipeline latch when it is cleared or bubbled.
pub const NOP_INST: u32 = 0x0000_0000;

/// Program counter after reset when no start address is configured.
pub const RESET_PC: u32 = 0;
