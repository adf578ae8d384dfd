//! System construction and top-level `System` type.
//!
//! This module builds the memory side of the machine from configuration. It performs:
//! 1. **Store setup:** Allocates the backing store with the configured size.
//! 2. **Port setup:** Places the fixed-priority arbiter in front of it.
//! 3. **Binary loading:** Copies program images into the store before simulation.

use crate::common::data::MemRequest;
use crate::common::error::SimResult;
use crate::config::Config;
use crate::soc::interconnect::{Arbiter, Grant, PortView};
use crate::soc::memory::BackingStore;

/// Memory side of the machine: the shared port and the store behind it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct System {
    /// Fixed-priority arbiter; the only writer of `memory` once simulation starts.
    pub arbiter: Arbiter,
    /// Flat word memory.
    pub memory: BackingStore,
}

impl System {
    /// Builds a new system from configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Simulator configuration; only `memory.size_words` is used.
    ///
    /// # Returns
    ///
    /// A zero-filled store behind an idle arbiter.
    pub fn new(config: &Config) -> Self {
        Self {
            arbiter: Arbiter::new(),
            memory: BackingStore::new(config.memory.size_words),
        }
    }

    /// Runs one cycle of arbitration against the backing store.
    ///
    /// # Arguments
    ///
    /// * `icache_req` - Request from the instruction cache.
    /// * `dcache_req` - Request from the data cache.
    ///
    /// # Returns
    ///
    /// The shared port outputs for this cycle and the per-client grant.
    pub fn cycle(
        &mut self,
        icache_req: Option<MemRequest>,
        dcache_req: Option<MemRequest>,
    ) -> (PortView, Grant) {
        self.arbiter
            .arbitrate(&mut self.memory, icache_req, dcache_req)
    }

    /// Writes a program image into memory at word address `base`.
    ///
    /// # Errors
    ///
    /// Returns `SimError::ImageTooLarge` if the image does not fit.
    pub fn load_binary_at(&mut self, image: &[u32], base: u32) -> SimResult<()> {
        self.memory.load(base, image)
    }
}
