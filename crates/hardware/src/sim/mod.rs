//! Simulation driver and program loading.
//!
//! Provides the `Simulator` that steps the machine and utilities for reading
//! program images into memory.

/// Program image parsing (hex text or raw little-endian words).
pub mod loader;

/// The top-level `Simulator`.
pub mod simulator;

pub use simulator::Simulator;
