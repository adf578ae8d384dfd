//! CPU Cycle Tests.
//!
//! These tests place instructions directly into the pipeline latches and step the
//! CPU one clock at a time, checking how the controller, the caches, and the
//! arbiter interact: branch squashing, the data-stall freeze, and the halt.

use pipesim_core::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry};
use pipesim_core::isa::encode;
use pretty_assertions::assert_eq;

use crate::common::TestContext;
use crate::common::builder::pipeline_state::{ExMemBuilder, IdExBuilder, MemWbBuilder, if_id};

// ══════════════════════════════════════════════════════════
// 1. Taken branch
// ══════════════════════════════════════════════════════════

/// `beq` at 10 is in execute, `addi r5` (pc 11) in decode, and the word at 12 is
/// already cached. The branch clears IF/ID once and the instruction it let into
/// execute is squashed and never written back.
#[test]
fn taken_branch_clears_fetch_and_squashes_execute() {
    let mut ctx = TestContext::new()
        .load_at(12, &[encode::addi(6, 0, 9)])
        .load_at(16, &[encode::halt()]);
    ctx.warm_icache(&[12]);

    let cpu = ctx.cpu_mut();
    cpu.pc = 12;
    cpu.id_ex = IdExBuilder::new(10, encode::beq(0, 0, 5)).build();
    cpu.if_id = if_id(11, encode::addi(5, 0, 1));

    ctx.run(1);
    let cpu = ctx.cpu();
    assert_eq!(cpu.pc, 16);
    assert_eq!(cpu.if_id, IfIdEntry::default(), "fetched word at 12 is dropped");
    assert_eq!(cpu.id_ex.inst, encode::addi(5, 0, 1));
    assert!(cpu.branch_taken);
    assert_eq!(cpu.ex_mem.inst, encode::beq(0, 0, 5));
    assert!(!cpu.ex_mem.squashed);

    ctx.run(1);
    let cpu = ctx.cpu();
    assert!(cpu.ex_mem.squashed);
    assert_eq!(cpu.ex_mem.inst, encode::addi(5, 0, 1));
    assert!(!cpu.branch_taken);

    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(5), 0);
    assert_eq!(ctx.get_reg(6), 0);

    let stats = ctx.stats();
    assert_eq!(stats.branches_taken, 1);
    assert_eq!(stats.squashed, 1);
    assert_eq!(stats.instructions_retired, 2, "beq and halt");
}

/// With the fetch stalled when the branch resolves, the bubble is what gets squashed.
#[test]
fn taken_branch_during_fetch_miss() {
    let mut ctx = TestContext::new();
    let cpu = ctx.cpu_mut();
    cpu.pc = 12;
    cpu.id_ex = IdExBuilder::new(10, encode::beq(0, 0, 3)).build();
    cpu.if_id = if_id(11, encode::addi(5, 0, 1));

    ctx.run(1);
    let cpu = ctx.cpu();
    assert_eq!(cpu.pc, 14);
    assert_eq!(cpu.if_id, IfIdEntry::default());
    assert_eq!(cpu.id_ex, IdExEntry::default(), "fetch stall inserts a bubble");
    assert!(cpu.branch_taken);

    ctx.run(20);
    assert_eq!(ctx.get_reg(5), 0);
    assert_eq!(ctx.stats().squashed, 0);
    assert_eq!(ctx.stats().branches_taken, 1);
}

/// The branch resolves while a load miss freezes the back end. It redirects once,
/// waits in ID/EX without being squashed, and hands the flag to the bubble behind it.
#[test]
fn taken_branch_during_data_miss() {
    let mut ctx = TestContext::new()
        .load_at(5, &[0x1234])
        .load_at(12, &[encode::addi(7, 0, 1)])
        .load_at(14, &[encode::addi(6, 0, 9), encode::halt()]);
    ctx.warm_icache(&[12, 14, 15]);

    let load = ExMemBuilder::new(encode::lw(1, 0, 5)).alu(5).build();
    let cpu = ctx.cpu_mut();
    cpu.pc = 12;
    cpu.ex_mem = load;
    cpu.id_ex = IdExBuilder::new(10, encode::beq(0, 0, 3)).build();
    cpu.if_id = if_id(11, encode::addi(5, 0, 1));

    // Cycle 1: load granted, branch redirects, the back end freezes.
    ctx.run(1);
    let cpu = ctx.cpu();
    assert_eq!(cpu.pc, 14);
    assert_eq!(cpu.if_id, IfIdEntry::default());
    assert_eq!(cpu.id_ex.inst, encode::beq(0, 0, 3));
    assert!(cpu.id_ex.redirected);
    assert!(cpu.branch_taken);
    assert_eq!(cpu.ex_mem, load);

    // Cycle 2: port busy; nothing moves and the branch does not redirect again.
    ctx.run(1);
    let cpu = ctx.cpu();
    assert_eq!(cpu.pc, 14);
    assert!(cpu.id_ex.redirected);
    assert_eq!(ctx.stats().branches_taken, 1);

    // Cycle 3: fill; the branch leaves execute live and the flag stays armed.
    ctx.run(1);
    let cpu = ctx.cpu();
    assert_eq!(cpu.ex_mem.inst, encode::beq(0, 0, 3));
    assert!(!cpu.ex_mem.squashed);
    assert_eq!(cpu.mem_wb.rd, 1);
    assert_eq!(cpu.id_ex.inst, 0);
    assert!(!cpu.id_ex.redirected);
    assert_eq!(cpu.if_id.inst, encode::addi(6, 0, 9));
    assert!(cpu.branch_taken);

    // Cycle 4: the bubble takes the squash.
    ctx.run(1);
    assert!(ctx.cpu().ex_mem.squashed);
    assert!(!ctx.cpu().branch_taken);

    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(1), 0x1234);
    assert_eq!(ctx.get_reg(5), 0);
    assert_eq!(ctx.get_reg(6), 9);
    assert_eq!(ctx.get_reg(7), 0);

    let stats = ctx.stats();
    assert_eq!(stats.branches_taken, 1);
    assert_eq!(stats.squashed, 0);
    assert_eq!(stats.instructions_retired, 4, "lw, beq, addi and halt");
}

// ══════════════════════════════════════════════════════════
// 2. Data stall
// ══════════════════════════════════════════════════════════

/// A load misses in the data cache while an `addi` waits in MEM/WB. The load wins
/// the port over the instruction fetch; the back end freezes for two cycles and the
/// `addi` is written back exactly once.
#[test]
fn data_miss_freezes_back_end() {
    let mut ctx = TestContext::new().load_at(5, &[0x1234]);
    let load = ExMemBuilder::new(encode::lw(2, 0, 5)).alu(5).build();
    let older = MemWbBuilder::new(encode::addi(1, 0, 7)).alu(7).build();

    let cpu = ctx.cpu_mut();
    cpu.ex_mem = load;
    cpu.mem_wb = older;
    cpu.wb_pending = true;

    // Cycle 1: data request granted, fetch deferred.
    ctx.run(1);
    assert_eq!(ctx.get_reg(1), 7);
    assert_eq!(ctx.cpu().ex_mem, load);
    assert_eq!(ctx.cpu().mem_wb, older);
    assert!(!ctx.cpu().wb_pending);
    assert_eq!(ctx.cpu().pc, 0);

    // Cycle 2: port busy, still frozen.
    ctx.run(1);
    assert_eq!(ctx.cpu().mem_wb, older);
    assert_eq!(ctx.stats().instructions_retired, 1);

    // Cycle 3: fill; the load moves to MEM/WB.
    ctx.run(1);
    let cpu = ctx.cpu();
    assert_eq!(cpu.mem_wb.rd, 2);
    assert_eq!(cpu.mem_wb.load_data, 0x1234);
    assert_eq!(cpu.ex_mem, ExMemEntry::default());
    assert_eq!(ctx.get_reg(2), 0);

    // Cycle 4: writeback.
    ctx.run(1);
    assert_eq!(ctx.get_reg(2), 0x1234);

    let stats = ctx.stats();
    assert_eq!(stats.stalls_dcache, 2);
    assert_eq!(stats.dcache_misses, 1);
    assert_eq!(stats.port_grants_data, 1);
    assert_eq!(stats.port_deferred_instruction, 1);
    assert_eq!(stats.instructions_retired, 2);
}

/// A store that meets a busy port is retried and written once.
#[test]
fn store_behind_fetch_grant_is_retried() {
    let mut ctx = TestContext::new();

    // Cycle 1: the fetch at 0 takes the port.
    ctx.run(1);
    assert!(ctx.cpu().bus.arbiter.is_busy());

    let store = ExMemBuilder::new(encode::sw(1, 0, 30))
        .alu(30)
        .store_data(0xCAFE)
        .build();
    ctx.cpu_mut().ex_mem = store;

    // Cycle 2: port busy, the store waits and the back end freezes.
    ctx.run(1);
    assert_eq!(ctx.mem(30), 0);
    assert_eq!(ctx.cpu().ex_mem, store);
    assert_eq!(ctx.stats().stalls_dcache, 1);

    // Cycle 3: granted and written.
    ctx.run(1);
    assert_eq!(ctx.mem(30), 0xCAFE);
    assert_eq!(ctx.cpu().mem_wb.inst, encode::sw(1, 0, 30));

    ctx.run(5);
    let stats = ctx.stats();
    assert_eq!(stats.dcache_writes, 1);
    assert_eq!(stats.stalls_dcache, 1);
    assert_eq!(stats.port_grants_data, 1);
}

// ══════════════════════════════════════════════════════════
// 3. Halt
// ══════════════════════════════════════════════════════════

#[test]
fn halt_in_writeback_stops_the_machine() {
    let mut ctx = TestContext::new();
    let cpu = ctx.cpu_mut();
    cpu.mem_wb = MemWbBuilder::new(encode::halt()).build();
    cpu.wb_pending = true;

    ctx.run(1);
    assert!(ctx.sim.is_halted());
    assert_eq!(ctx.stats().cycles, 0);
    assert_eq!(ctx.stats().instructions_retired, 1);

    let before = ctx.cpu().clone();
    ctx.sim.tick();
    ctx.sim.tick();
    assert_eq!(ctx.cpu().pc, before.pc);
    assert_eq!(ctx.stats(), &before.stats);
}

#[test]
fn squashed_halt_does_not_stop() {
    let mut ctx = TestContext::new();
    let cpu = ctx.cpu_mut();
    cpu.mem_wb = MemWbBuilder::new(encode::halt()).squashed().build();
    cpu.wb_pending = true;

    ctx.run(5);
    assert!(!ctx.sim.is_halted());
    assert_eq!(ctx.stats().cycles, 5);
    assert_eq!(ctx.stats().squashed, 1);
}

#[test]
fn unknown_opcode_behaves_as_halt() {
    let mut ctx = TestContext::new().load_program(&[encode::addi(1, 0, 3), 0x8000_0000]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(1), 3);
}
