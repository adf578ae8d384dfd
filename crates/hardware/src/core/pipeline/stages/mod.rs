//! Pipeline stage implementations.
//!
//! This module contains the individual implementations for the five stages of the
//! instruction pipeline. Every stage is a function of the pre-cycle latch snapshot and
//! returns the value its output latch takes if the controller lets it advance:
//! 1. **Fetch:** Captures the instruction cache's word for the current PC.
//! 2. **Decode:** Decodes instructions into control signals and reads operands.
//! 3. **Execute:** Performs ALU operations and resolves branches.
//! 4. **Memory:** Drives the data cache and captures load data.
//! 5. **Writeback:** Selects the register write and the retire/halt outcome.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

/// Decode stage entry point (ID stage).
pub use decode::decode_stage;
/// Execute stage entry point (EX stage).
pub use execute::{ExecuteOutput, execute_stage};
/// Fetch stage entry point (IF stage).
pub use fetch::{fetch_access, fetch_stage};
/// Memory stage entry point (MEM stage).
pub use memory::{data_access, mem_stage};
/// Writeback stage entry point (WB stage).
pub use writeback::{WritebackOutput, wb_stage};
