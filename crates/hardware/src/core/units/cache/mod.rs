//! Direct-Mapped Write-Through Cache.
//!
//! This module implements the cache unit instantiated twice by the core, once for
//! instruction fetch and once for data. Each line holds exactly one word. It models:
//! 1. **Lookup:** `index` is the low `log2(lines)` address bits, `tag` the remaining high bits.
//! 2. **Write-Through:** Every write is pushed to the backing store, hit or miss.
//! 3. **No-Write-Allocate:** A write miss never installs a line.
//! 4. **Miss Handling:** A read miss issues one request, waits out the busy cycle, and fills.
//!
//! A cache is stepped in two halves each cycle: `request` presents the raw memory
//! request to the arbiter, then `step` consumes the arbiter's response and produces
//! the data and stall outputs for the pipeline.

use crate::common::data::{AccessType, CacheAccess, MemRequest, PortResponse};
use crate::config::CacheConfig;

/// One cache line: a single word plus its tag and valid bit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Line holds a copy of memory.
    pub valid: bool,
    /// High address bits of the cached word.
    pub tag: u32,
    /// The cached word.
    pub data: u32,
}

/// Miss-handling state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CacheState {
    /// No transaction in flight.
    #[default]
    Idle,
    /// A read miss was granted; the line is filled when the port stops being busy.
    WaitForMemory,
}

/// What the cache did in one cycle, for statistics and tracing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CacheEvent {
    /// No access was presented.
    #[default]
    None,
    /// A read hit.
    Hit,
    /// A read miss was granted and the cache started waiting.
    Miss,
    /// A read miss lost arbitration or met a busy port; it is re-issued next cycle.
    MissDeferred,
    /// A write was pushed to the backing store.
    WriteThrough,
    /// A write lost arbitration or met a busy port; it is re-issued next cycle.
    WriteDeferred,
    /// Waiting for the backing store to finish a granted read.
    Waiting,
    /// The pending read completed and its line was filled.
    Fill,
}

/// Combinational outputs of a cache in one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheOutput {
    /// Word held by the line the access address indexes.
    pub read_data: u32,
    /// The access cannot complete this cycle.
    pub stall: bool,
    /// What happened this cycle.
    pub event: CacheEvent,
}

/// Direct-mapped cache with one-word lines, write-through and no-write-allocate.
#[derive(Clone, Debug)]
pub struct Cache {
    name: &'static str,
    lines: Vec<CacheLine>,
    index_bits: u32,
    state: CacheState,
    pending_addr: u32,
}

impl Cache {
    /// Creates an empty cache.
    ///
    /// # Arguments
    ///
    /// * `name` - Label used in trace output (e.g. `"icache"`).
    /// * `size_words` - Number of lines; rounded up to a power of two (minimum 1).
    ///
    /// # Returns
    ///
    /// A cache with every line invalid, in the `Idle` state.
    pub fn new(name: &'static str, size_words: usize) -> Self {
        let lines = size_words.max(1).next_power_of_two();
        Self {
            name,
            lines: vec![CacheLine::default(); lines],
            index_bits: lines.trailing_zeros(),
            state: CacheState::Idle,
            pending_addr: 0,
        }
    }

    /// Creates an empty cache sized by `config`.
    pub fn from_config(name: &'static str, config: &CacheConfig) -> Self {
        Self::new(name, config.size_words)
    }

    /// Invalidates every line and abandons any pending miss.
    pub fn reset(&mut self) {
        self.lines.fill(CacheLine::default());
        self.state = CacheState::Idle;
        self.pending_addr = 0;
    }

    #[inline]
    fn index(&self, addr: u32) -> usize {
        (addr as usize) & (self.lines.len() - 1)
    }

    #[inline]
    fn tag(&self, addr: u32) -> u32 {
        addr.checked_shr(self.index_bits).unwrap_or(0)
    }

    /// Checks if the cache holds a valid copy of the word at `addr`.
    pub fn contains(&self, addr: u32) -> bool {
        let line = self.line(addr);
        line.valid && line.tag == self.tag(addr)
    }

    /// Returns the line `addr` maps to, whether or not it matches the tag.
    pub fn line(&self, addr: u32) -> CacheLine {
        self.lines
            .get(self.index(addr))
            .copied()
            .unwrap_or_default()
    }

    /// Returns every line, in index order.
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// Returns the number of lines.
    pub fn size_words(&self) -> usize {
        self.lines.len()
    }

    /// Returns the miss-handling state.
    pub const fn state(&self) -> CacheState {
        self.state
    }

    /// Returns the address of the miss being served, if any.
    pub const fn pending_addr(&self) -> Option<u32> {
        match self.state {
            CacheState::WaitForMemory => Some(self.pending_addr),
            CacheState::Idle => None,
        }
    }

    /// Returns the trace label of this cache.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    fn write_line(&mut self, addr: u32, data: u32) {
        let tag = self.tag(addr);
        let idx = self.index(addr);
        if let Some(line) = self.lines.get_mut(idx) {
            *line = CacheLine {
                valid: true,
                tag,
                data,
            };
        }
    }

    /// Computes the raw memory request for this cycle's access.
    ///
    /// Reads that hit issue nothing. Reads that miss issue a read; every write issues
    /// a write. While a miss is outstanding no new request is issued.
    ///
    /// # Arguments
    ///
    /// * `access` - The pipeline's access this cycle.
    ///
    /// # Returns
    ///
    /// The request to present to the arbiter, if any.
    pub fn request(&self, access: &CacheAccess) -> Option<MemRequest> {
        match (self.state, access.kind) {
            (CacheState::WaitForMemory, _) | (CacheState::Idle, AccessType::None) => None,
            (CacheState::Idle, AccessType::Read) if self.contains(access.addr) => None,
            (CacheState::Idle, AccessType::Read) => Some(MemRequest::read(access.addr)),
            (CacheState::Idle, AccessType::Write(data)) => {
                Some(MemRequest::write(access.addr, data))
            }
        }
    }

    /// Advances the cache by one cycle.
    ///
    /// Must be called with the same `access` passed to `request` and the arbiter's
    /// response to that request.
    ///
    /// # Arguments
    ///
    /// * `access` - The pipeline's access this cycle.
    /// * `port` - Shared busy/read-data signals plus this cache's grant.
    ///
    /// # Returns
    ///
    /// The data and stall outputs seen by the pipeline this cycle.
    pub fn step(&mut self, access: &CacheAccess, port: &PortResponse) -> CacheOutput {
        let (stall, event) = match self.state {
            CacheState::Idle => self.step_idle(access, port),
            CacheState::WaitForMemory => self.step_wait(access, port),
        };

        CacheOutput {
            read_data: self.line(access.addr).data,
            stall,
            event,
        }
    }

    fn step_idle(&mut self, access: &CacheAccess, port: &PortResponse) -> (bool, CacheEvent) {
        match access.kind {
            AccessType::None => (false, CacheEvent::None),
            AccessType::Read if self.contains(access.addr) => (false, CacheEvent::Hit),
            AccessType::Read if port.granted => {
                self.state = CacheState::WaitForMemory;
                self.pending_addr = access.addr;
                tracing::debug!(cache = self.name, addr = access.addr, "read miss issued");
                (true, CacheEvent::Miss)
            }
            AccessType::Read => (true, CacheEvent::MissDeferred),
            AccessType::Write(data) if port.granted => {
                if self.contains(access.addr) {
                    self.write_line(access.addr, data);
                }
                tracing::debug!(cache = self.name, addr = access.addr, data, "write through");
                (false, CacheEvent::WriteThrough)
            }
            AccessType::Write(_) => (true, CacheEvent::WriteDeferred),
        }
    }

    fn step_wait(&mut self, access: &CacheAccess, port: &PortResponse) -> (bool, CacheEvent) {
        if port.busy {
            return (true, CacheEvent::Waiting);
        }

        let pending = self.pending_addr;
        self.write_line(pending, port.read_data);
        self.state = CacheState::Idle;
        tracing::debug!(
            cache = self.name,
            addr = pending,
            data = port.read_data,
            "miss resolved"
        );

        if access.addr != pending {
            tracing::debug!(
                cache = self.name,
                pending,
                current = access.addr,
                "access address changed while the miss was outstanding"
            );
        }

        // The filled line need not be the one the pipeline asks for now.
        let stall = match access.kind {
            AccessType::None => false,
            AccessType::Read => !self.contains(access.addr),
            AccessType::Write(_) => true,
        };
        (stall, CacheEvent::Fill)
    }
}
