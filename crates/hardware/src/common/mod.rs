//! Common utilities and types used throughout the pipeline simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Constants:** Register count, word width, and the bubble encoding.
//! 2. **Memory Access:** Cache accesses, memory requests, and arbiter responses.
//! 3. **Error Handling:** The host-side `SimError` type.
//! 4. **Register Management:** The architectural register file.

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Host-side error types.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use data::{AccessType, CacheAccess, MemOp, MemRequest, PortResponse};
pub use error::{SimError, SimResult};
pub use reg::RegisterFile;
