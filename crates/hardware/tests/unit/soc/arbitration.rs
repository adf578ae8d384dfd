//! Memory Arbiter Tests.
//!
//! Verifies data-over-instruction priority, the one-cycle busy window, write
//! commit timing, and that the port view reflects the registered outputs.

use pipesim_core::common::data::MemRequest;
use pipesim_core::config::Config;
use pipesim_core::soc::System;
use pipesim_core::soc::interconnect::{Arbiter, Grant, PortView};
use pipesim_core::soc::memory::BackingStore;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const NONE: Grant = Grant {
    instruction: false,
    data: false,
};
const DATA: Grant = Grant {
    instruction: false,
    data: true,
};
const INSTR: Grant = Grant {
    instruction: true,
    data: false,
};

fn store() -> BackingStore {
    let mut store = BackingStore::new(32);
    for addr in 0..32 {
        store.write(addr, 0x100 + addr);
    }
    store
}

#[test]
fn data_side_wins() {
    let mut arb = Arbiter::new();
    let mut mem = store();
    let (_, grant) = arb.arbitrate(&mut mem, Some(MemRequest::read(1)), Some(MemRequest::read(2)));
    assert_eq!(grant, DATA);
    assert_eq!(arb.port().read_data, 0x102);
}

#[test]
fn instruction_side_served_when_data_is_silent() {
    let mut arb = Arbiter::new();
    let mut mem = store();
    let (_, grant) = arb.arbitrate(&mut mem, Some(MemRequest::read(1)), None);
    assert_eq!(grant, INSTR);
    assert_eq!(arb.port().read_data, 0x101);
}

#[test]
fn grant_is_followed_by_exactly_one_busy_cycle() {
    let mut arb = Arbiter::new();
    let mut mem = store();
    let req = Some(MemRequest::read(3));

    let (view, grant) = arb.arbitrate(&mut mem, None, req);
    assert_eq!(grant, DATA);
    assert!(!view.busy, "the view is registered, not combinational");
    assert!(arb.is_busy());

    let (view, grant) = arb.arbitrate(&mut mem, req, req);
    assert_eq!(grant, NONE);
    assert_eq!(
        view,
        PortView {
            busy: true,
            read_data: 0x103,
        }
    );

    let (view, grant) = arb.arbitrate(&mut mem, req, None);
    assert_eq!(grant, INSTR);
    assert!(!view.busy);
    assert_eq!(view.read_data, 0x103);
}

#[test]
fn idle_cycle_keeps_last_read_data() {
    let mut arb = Arbiter::new();
    let mut mem = store();
    arb.arbitrate(&mut mem, None, Some(MemRequest::read(4)));
    arb.arbitrate(&mut mem, None, None);
    let (view, grant) = arb.arbitrate(&mut mem, None, None);
    assert_eq!(grant, NONE);
    assert_eq!(view.read_data, 0x104);
    assert!(!arb.is_busy());
}

#[test]
fn write_commits_in_grant_cycle() {
    let mut arb = Arbiter::new();
    let mut mem = store();
    arb.arbitrate(&mut mem, None, Some(MemRequest::write(6, 0xBEEF)));
    assert_eq!(mem.read(6), 0xBEEF);
    assert_eq!(arb.port().read_data, 0xBEEF);
}

#[test]
fn request_during_busy_is_not_performed() {
    let mut arb = Arbiter::new();
    let mut mem = store();
    arb.arbitrate(&mut mem, None, Some(MemRequest::read(0)));
    arb.arbitrate(&mut mem, None, Some(MemRequest::write(7, 1)));
    assert_eq!(mem.read(7), 0x107);
}

#[test]
fn back_to_back_data_traffic_starves_fetch() {
    let mut arb = Arbiter::new();
    let mut mem = store();
    let fetch = Some(MemRequest::read(0));
    for cycle in 0..10 {
        let (_, grant) = arb.arbitrate(&mut mem, fetch, Some(MemRequest::read(cycle)));
        assert!(!grant.instruction);
    }
}

#[test]
fn response_adds_the_private_grant() {
    let view = PortView {
        busy: true,
        read_data: 9,
    };
    let r = view.response(false);
    assert!(r.busy && !r.granted);
    assert_eq!(r.read_data, 9);
    assert!(view.response(true).granted);
}

#[test]
fn system_cycle_goes_through_its_store() {
    let mut system = System::new(&Config::default());
    system.load_binary_at(&[0xAA, 0xBB], 10).unwrap();
    let (_, grant) = system.cycle(Some(MemRequest::read(11)), None);
    assert_eq!(grant, INSTR);
    assert_eq!(system.arbiter.port().read_data, 0xBB);
}

fn request() -> impl Strategy<Value = Option<MemRequest>> {
    prop_oneof![
        Just(None),
        (0u32..32).prop_map(|a| Some(MemRequest::read(a))),
        (0u32..32, any::<u32>()).prop_map(|(a, v)| Some(MemRequest::write(a, v))),
    ]
}

proptest! {
    #[test]
    fn grants_alternate_with_busy_cycles(
        reqs in prop::collection::vec((request(), request()), 1..40)
    ) {
        let mut arb = Arbiter::new();
        let mut mem = store();
        let mut was_granted = false;
        for (ireq, dreq) in reqs {
            let (view, grant) = arb.arbitrate(&mut mem, ireq, dreq);
            prop_assert!(!(grant.instruction && grant.data));
            prop_assert_eq!(view.busy, was_granted);
            if was_granted {
                prop_assert_eq!(grant, NONE);
            } else {
                prop_assert_eq!(grant.data, dreq.is_some());
                prop_assert_eq!(grant.instruction, dreq.is_none() && ireq.is_some());
            }
            was_granted = grant.instruction || grant.data;
        }
    }
}
