//! Cache Unit Tests.
//!
//! Drives a single cache against a real arbiter and backing store, one cycle at a
//! time, to check hit/miss handling, the busy-cycle wait, write-through, and
//! no-write-allocate.

use pipesim_core::common::data::{CacheAccess, MemRequest, PortResponse};
use pipesim_core::core::units::cache::{Cache, CacheEvent, CacheOutput, CacheState};
use pipesim_core::soc::interconnect::Arbiter;
use pipesim_core::soc::memory::BackingStore;
use pretty_assertions::assert_eq;

/// A data cache alone on the port.
struct Rig {
    cache: Cache,
    arbiter: Arbiter,
    store: BackingStore,
}

impl Rig {
    fn new() -> Self {
        Self {
            cache: Cache::new("dcache", 16),
            arbiter: Arbiter::new(),
            store: BackingStore::new(64),
        }
    }

    fn cycle(&mut self, access: CacheAccess) -> CacheOutput {
        let req = self.cache.request(&access);
        let (port, grant) = self.arbiter.arbitrate(&mut self.store, None, req);
        self.cache.step(&access, &port.response(grant.data))
    }
}

// ══════════════════════════════════════════════════════════
// 1. Read path
// ══════════════════════════════════════════════════════════

#[test]
fn read_miss_resolves_after_one_busy_cycle() {
    let mut rig = Rig::new();
    rig.store.write(5, 0x55);
    let access = CacheAccess::read(5);

    let c1 = rig.cycle(access);
    assert!(c1.stall);
    assert_eq!(c1.event, CacheEvent::Miss);
    assert_eq!(rig.cache.state(), CacheState::WaitForMemory);
    assert_eq!(rig.cache.pending_addr(), Some(5));

    let c2 = rig.cycle(access);
    assert!(c2.stall);
    assert_eq!(c2.event, CacheEvent::Waiting);

    let c3 = rig.cycle(access);
    assert!(!c3.stall);
    assert_eq!(c3.event, CacheEvent::Fill);
    assert_eq!(c3.read_data, 0x55);
    assert_eq!(rig.cache.state(), CacheState::Idle);
    assert!(rig.cache.contains(5));

    let c4 = rig.cycle(access);
    assert_eq!(
        c4,
        CacheOutput {
            read_data: 0x55,
            stall: false,
            event: CacheEvent::Hit,
        }
    );
}

#[test]
fn read_hit_issues_no_request() {
    let mut rig = Rig::new();
    for _ in 0..3 {
        rig.cycle(CacheAccess::read(2));
    }
    assert!(rig.cache.contains(2));
    assert_eq!(rig.cache.request(&CacheAccess::read(2)), None);
    assert_eq!(
        rig.cache.request(&CacheAccess::read(3)),
        Some(MemRequest::read(3))
    );
}

#[test]
fn waiting_cache_issues_no_request() {
    let mut rig = Rig::new();
    rig.cycle(CacheAccess::read(5));
    assert_eq!(rig.cache.request(&CacheAccess::read(5)), None);
    assert_eq!(rig.cache.request(&CacheAccess::write(5, 1)), None);
}

#[test]
fn denied_read_stays_idle_and_retries() {
    let mut cache = Cache::new("icache", 4);
    let access = CacheAccess::read(1);
    let denied = PortResponse {
        busy: false,
        read_data: 0,
        granted: false,
    };

    let out = cache.step(&access, &denied);
    assert!(out.stall);
    assert_eq!(out.event, CacheEvent::MissDeferred);
    assert_eq!(cache.state(), CacheState::Idle);
    assert_eq!(cache.request(&access), Some(MemRequest::read(1)));
}

#[test]
fn conflicting_addresses_evict_each_other() {
    let mut rig = Rig::new();
    rig.store.write(1, 0x11);
    rig.store.write(17, 0x17);

    for _ in 0..3 {
        rig.cycle(CacheAccess::read(1));
    }
    for _ in 0..3 {
        rig.cycle(CacheAccess::read(17));
    }

    assert!(rig.cache.contains(17));
    assert!(!rig.cache.contains(1));
    assert_eq!(rig.cache.line(1).data, 0x17);
    assert_eq!(rig.cache.line(1).tag, 1);
}

#[test]
fn address_change_during_miss_fills_the_pending_word() {
    let mut rig = Rig::new();
    rig.store.write(5, 0x55);
    rig.store.write(6, 0x66);

    rig.cycle(CacheAccess::read(5));
    rig.cycle(CacheAccess::read(5));

    let out = rig.cycle(CacheAccess::read(6));
    assert_eq!(out.event, CacheEvent::Fill);
    assert!(out.stall, "the new address still misses");
    assert!(rig.cache.contains(5));
    assert!(!rig.cache.contains(6));
    assert_eq!(rig.cache.state(), CacheState::Idle);
}

#[test]
fn access_dropped_during_miss_does_not_stall() {
    let mut rig = Rig::new();
    rig.cycle(CacheAccess::read(5));
    rig.cycle(CacheAccess::read(5));
    let out = rig.cycle(CacheAccess::idle());
    assert!(!out.stall);
    assert!(rig.cache.contains(5));
}

// ══════════════════════════════════════════════════════════
// 2. Write path
// ══════════════════════════════════════════════════════════

#[test]
fn cold_write_goes_through_without_allocating() {
    let mut rig = Rig::new();
    let out = rig.cycle(CacheAccess::write(3, 0xAAAA));

    assert!(!out.stall);
    assert_eq!(out.event, CacheEvent::WriteThrough);
    assert_eq!(rig.store.read(3), 0xAAAA);
    assert!(!rig.cache.contains(3));
    assert!(!rig.cache.line(3).valid);
}

#[test]
fn write_hit_updates_line_and_store() {
    let mut rig = Rig::new();
    rig.store.write(7, 0x77);
    for _ in 0..3 {
        rig.cycle(CacheAccess::read(7));
    }

    let out = rig.cycle(CacheAccess::write(7, 0xBEEF));
    assert!(!out.stall);
    assert_eq!(out.event, CacheEvent::WriteThrough);
    assert_eq!(rig.cache.line(7).data, 0xBEEF);
    assert_eq!(rig.store.read(7), 0xBEEF);

    // The port is busy for one cycle after the write, but the read hits.
    let read = rig.cycle(CacheAccess::read(7));
    assert_eq!(read.read_data, 0xBEEF);
    assert!(!read.stall);
}

#[test]
fn write_stalls_until_granted() {
    let mut rig = Rig::new();
    rig.cycle(CacheAccess::write(1, 10));

    // Arbiter is busy from the first write.
    let out = rig.cycle(CacheAccess::write(2, 20));
    assert!(out.stall);
    assert_eq!(out.event, CacheEvent::WriteDeferred);
    assert_eq!(rig.store.read(2), 0);

    let out = rig.cycle(CacheAccess::write(2, 20));
    assert!(!out.stall);
    assert_eq!(rig.store.read(2), 20);
}

#[test]
fn denied_write_hit_leaves_line_untouched() {
    let mut rig = Rig::new();
    rig.store.write(4, 1);
    for _ in 0..3 {
        rig.cycle(CacheAccess::read(4));
    }
    let denied = PortResponse {
        busy: true,
        read_data: 0,
        granted: false,
    };
    let out = rig.cache.step(&CacheAccess::write(4, 2), &denied);
    assert!(out.stall);
    assert_eq!(rig.cache.line(4).data, 1);
}

// ══════════════════════════════════════════════════════════
// 3. Geometry and reset
// ══════════════════════════════════════════════════════════

#[test]
fn size_rounds_up_to_power_of_two() {
    assert_eq!(Cache::new("c", 12).size_words(), 16);
    assert_eq!(Cache::new("c", 0).size_words(), 1);
    assert_eq!(Cache::new("c", 8).lines().len(), 8);
}

#[test]
fn single_line_cache_tags_whole_address() {
    let mut cache = Cache::new("c", 1);
    let mut arbiter = Arbiter::new();
    let mut store = BackingStore::new(16);
    store.write(9, 99);
    let access = CacheAccess::read(9);
    for _ in 0..3 {
        let req = cache.request(&access);
        let (port, grant) = arbiter.arbitrate(&mut store, None, req);
        cache.step(&access, &port.response(grant.data));
    }
    assert!(cache.contains(9));
    assert!(!cache.contains(8));
    assert_eq!(cache.line(0).tag, 9);
}

#[test]
fn reset_invalidates_everything() {
    let mut rig = Rig::new();
    for _ in 0..3 {
        rig.cycle(CacheAccess::read(2));
    }
    rig.cycle(CacheAccess::read(3));
    rig.cache.reset();
    assert!(!rig.cache.contains(2));
    assert_eq!(rig.cache.state(), CacheState::Idle);
    assert_eq!(rig.cache.pending_addr(), None);
    assert_eq!(rig.cache.name(), "dcache");
}
