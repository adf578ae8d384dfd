//! Memory Arbiter.
//!
//! This module implements the single port shared by the instruction and data caches.
//! It provides:
//! 1. **Fixed Priority:** A data-side request always wins; the instruction side is served
//!    only when the data side is silent.
//! 2. **Busy Latency:** A grant makes the port busy for exactly the following cycle, during
//!    which no request is accepted.
//! 3. **Shared Result:** The word read by the granted transaction is presented to both
//!    caches on the cycle `busy` deasserts.
//!
//! Writes commit to the backing store in their grant cycle, so a read granted later
//! always observes them. Instruction fetches can starve under back-to-back data traffic.

use crate::common::data::{MemOp, MemRequest, PortResponse};
use crate::soc::memory::BackingStore;

/// Registered outputs of the arbiter, shared by both clients.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PortView {
    /// A transaction granted last cycle is still being served.
    pub busy: bool,
    /// Word read by the most recent granted transaction.
    pub read_data: u32,
}

impl PortView {
    /// Builds the response seen by one client.
    pub const fn response(self, granted: bool) -> PortResponse {
        PortResponse {
            busy: self.busy,
            read_data: self.read_data,
            granted,
        }
    }
}

/// Which client, if any, was accepted this cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Grant {
    /// The instruction cache's request was accepted.
    pub instruction: bool,
    /// The data cache's request was accepted.
    pub data: bool,
}

/// Fixed-priority arbiter in front of the backing store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Arbiter {
    busy: bool,
    read_data: u32,
}

impl Arbiter {
    /// Creates an idle arbiter.
    pub const fn new() -> Self {
        Self {
            busy: false,
            read_data: 0,
        }
    }

    /// Returns the registered outputs visible this cycle.
    pub const fn port(&self) -> PortView {
        PortView {
            busy: self.busy,
            read_data: self.read_data,
        }
    }

    /// Returns `true` while a granted transaction is being served.
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Arbitrates one cycle.
    ///
    /// # Arguments
    ///
    /// * `store` - The backing store; written here on a granted write.
    /// * `icache_req` - Request from the instruction cache.
    /// * `dcache_req` - Request from the data cache.
    ///
    /// # Returns
    ///
    /// The port view for this cycle (the registered outputs from before the cycle) and
    /// the per-client grant.
    pub fn arbitrate(
        &mut self,
        store: &mut BackingStore,
        icache_req: Option<MemRequest>,
        dcache_req: Option<MemRequest>,
    ) -> (PortView, Grant) {
        let view = self.port();

        if self.busy {
            self.busy = false;
            return (view, Grant::default());
        }

        let (req, grant) = match (dcache_req, icache_req) {
            (Some(d), _) => (
                d,
                Grant {
                    instruction: false,
                    data: true,
                },
            ),
            (None, Some(i)) => (
                i,
                Grant {
                    instruction: true,
                    data: false,
                },
            ),
            (None, None) => return (view, Grant::default()),
        };

        if let MemOp::Write(val) = req.op {
            store.write(req.addr, val);
        }
        self.read_data = store.read(req.addr);
        self.busy = true;

        tracing::debug!(
            addr = req.addr,
            write = req.is_write(),
            data_side = grant.data,
            deferred_fetch = icache_req.is_some() && grant.data,
            "port granted"
        );

        (view, grant)
    }
}
