//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains definitions for opcodes, function codes, and decoding logic for the
//! fixed-width 32-bit word-addressed instruction set executed by the pipeline.

/// Instruction decoding and immediate sign extension.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Instruction encoders, one per mnemonic.
pub mod encode;

/// Instruction field layout, bit extraction, and the `Decoded` structure.
pub mod instruction;

/// Opcode and ALU function code constants.
pub mod opcodes;

pub use decode::{decode, sign_extend16};
pub use instruction::{BranchCond, Decoded, InstructionBits, Opcode};
