//! Memory Access Types.
//!
//! This module defines the values exchanged between the pipeline, the caches, and the
//! memory arbiter every cycle:
//! 1. **Cache Accesses:** What a pipeline stage asks of its cache (`CacheAccess`).
//! 2. **Memory Requests:** What a cache asks of the shared backing store (`MemRequest`).
//! 3. **Port Responses:** What the arbiter reports back to one client (`PortResponse`).

/// Type of operation a pipeline stage drives into its cache this cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccessType {
    /// The stage does not use its cache this cycle.
    #[default]
    None,

    /// Read the word at the access address.
    Read,

    /// Write the given word at the access address.
    Write(u32),
}

/// One cycle's request from a pipeline stage to a cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheAccess {
    /// Word address being accessed.
    pub addr: u32,
    /// Operation requested.
    pub kind: AccessType,
}

impl CacheAccess {
    /// An access that does not touch the cache.
    pub const fn idle() -> Self {
        Self {
            addr: 0,
            kind: AccessType::None,
        }
    }

    /// A read of the word at `addr`.
    pub const fn read(addr: u32) -> Self {
        Self {
            addr,
            kind: AccessType::Read,
        }
    }

    /// A write of `data` to the word at `addr`.
    pub const fn write(addr: u32, data: u32) -> Self {
        Self {
            addr,
            kind: AccessType::Write(data),
        }
    }
}

/// Operation carried by a memory request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemOp {
    /// Fetch the word at the request address.
    Read,
    /// Store the word at the request address.
    Write(u32),
}

/// Raw request a cache presents to the memory arbiter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemRequest {
    /// Word address of the request.
    pub addr: u32,
    /// Read or write.
    pub op: MemOp,
}

impl MemRequest {
    /// A read request for `addr`.
    pub const fn read(addr: u32) -> Self {
        Self {
            addr,
            op: MemOp::Read,
        }
    }

    /// A write request of `data` to `addr`.
    pub const fn write(addr: u32, data: u32) -> Self {
        Self {
            addr,
            op: MemOp::Write(data),
        }
    }

    /// Returns `true` if this request writes.
    pub const fn is_write(&self) -> bool {
        matches!(self.op, MemOp::Write(_))
    }
}

/// Arbiter outputs as seen by a single client in one cycle.
///
/// `busy` and `read_data` are shared by both caches; `granted` is private to the
/// client the response is addressed to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PortResponse {
    /// The backing store is serving the transaction granted last cycle.
    pub busy: bool,
    /// Word read by the most recently granted transaction.
    pub read_data: u32,
    /// This client's request was accepted this cycle.
    pub granted: bool,
}
