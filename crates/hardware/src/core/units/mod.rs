//! Execution units and functional components.
//!
//! This module contains the integer ALU used by the execute stage and the
//! direct-mapped cache instantiated for instruction fetch and data access.

/// Arithmetic Logic Unit for integer operations and branch comparisons.
pub mod alu;

/// Direct-mapped write-through cache with one-word lines.
pub mod cache;
