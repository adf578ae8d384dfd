//! Register File Tests.
//!
//! Verifies the hardwired zero register and plain read/write behavior.

use pipesim_core::common::constants::NUM_REGS;
use pipesim_core::common::reg::RegisterFile;
use rstest::rstest;

#[test]
fn new_register_file_is_zeroed() {
    let regs = RegisterFile::new();
    assert_eq!(regs.snapshot(), [0; NUM_REGS]);
}

#[test]
fn r0_ignores_writes() {
    let mut regs = RegisterFile::new();
    regs.write(0, 0xDEAD_BEEF);
    assert_eq!(regs.read(0), 0);
    assert_eq!(regs.snapshot()[0], 0);
}

#[rstest]
#[case(1, 1)]
#[case(17, 0x8000_0000)]
#[case(31, u32::MAX)]
fn write_then_read(#[case] idx: usize, #[case] val: u32) {
    let mut regs = RegisterFile::new();
    regs.write(idx, val);
    assert_eq!(regs.read(idx), val);
}

#[test]
fn out_of_range_index_reads_zero() {
    let mut regs = RegisterFile::new();
    regs.write(NUM_REGS, 5);
    assert_eq!(regs.read(NUM_REGS), 0);
    assert_eq!(regs.snapshot(), [0; NUM_REGS]);
}
