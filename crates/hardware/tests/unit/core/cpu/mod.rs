/// Cycle-by-cycle checks of `Cpu::tick` from hand-built pipeline states.
pub mod execution;
