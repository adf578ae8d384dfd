//! System-on-Chip (SoC) Components.
//!
//! This module organizes the memory side of the simulated machine: the backing
//! store, the arbiter that serializes the two caches onto it, and the builder that
//! assembles them from configuration.

/// System builder and the top-level `System` type.
pub mod builder;

/// Fixed-priority memory arbiter.
pub mod interconnect;

/// Flat word-addressed backing store.
pub mod memory;

pub use builder::System;
