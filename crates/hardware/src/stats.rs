//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline simulator. It provides:
//! 1. **Cycle and CPI:** Total cycles, retired instructions, and derived metrics.
//! 2. **Stalls:** Frozen-pipeline cycles by cause (instruction cache, data cache, load-use).
//! 3. **Control Flow:** Taken branches and squashed wrong-path instructions.
//! 4. **Cache and Port:** Hit/miss counts per cache and arbiter grants per client.

use serde::Serialize;

/// Simulation statistics structure tracking all performance metrics.
///
/// Counters stop changing once the core halts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total simulated cycles, excluding the cycle that observes the halt.
    pub cycles: u64,
    /// Instructions retired through writeback, the halt included; no-ops are not counted.
    pub instructions_retired: u64,

    /// Cycles in which the instruction cache stalled the front end.
    pub stalls_icache: u64,
    /// Cycles in which the data cache froze the back end.
    pub stalls_dcache: u64,
    /// Bubbles inserted for load-use hazards with no cache stall present.
    pub stalls_load_use: u64,

    /// Branches resolved taken.
    pub branches_taken: u64,
    /// Wrong-path instructions squashed behind a taken branch.
    pub squashed: u64,

    /// Instruction fetches served by a hit and consumed by the pipeline.
    pub icache_hits: u64,
    /// Instruction cache misses sent to memory.
    pub icache_misses: u64,
    /// Loads served by a hit.
    pub dcache_hits: u64,
    /// Load misses sent to memory.
    pub dcache_misses: u64,
    /// Stores written through to memory.
    pub dcache_writes: u64,

    /// Requests granted to the instruction cache.
    pub port_grants_instruction: u64,
    /// Requests granted to the data cache.
    pub port_grants_data: u64,
    /// Instruction cache requests deferred because the data cache won arbitration.
    pub port_deferred_instruction: u64,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"core"`, `"memory"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "core", "memory"];

impl SimStats {
    /// Cycles per retired instruction, or 0 before anything retires.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Instruction cache hit rate in percent.
    pub fn icache_hit_rate(&self) -> f64 {
        hit_rate(self.icache_hits, self.icache_misses)
    }

    /// Data cache (load) hit rate in percent.
    pub fn dcache_hit_rate(&self) -> f64 {
        hit_rate(self.dcache_hits, self.dcache_misses)
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"core"`, or `"memory"`.
    /// Pass an empty slice to print all sections (same as `print()`).
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to print, or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let cyc = self.cycles.max(1) as f64;
        let pct = |n: u64| (n as f64 / cyc) * 100.0;

        if want("summary") {
            println!("\n==========================================================");
            println!("PIPELINE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("sim_cycles               {}", self.cycles);
            println!("sim_insts                {}", self.instructions_retired);
            println!("sim_cpi                  {:.4}", self.cpi());
            println!("----------------------------------------------------------");
        }
        if want("core") {
            println!("CORE BREAKDOWN");
            println!(
                "  stalls.icache          {} ({:.2}%)",
                self.stalls_icache,
                pct(self.stalls_icache)
            );
            println!(
                "  stalls.dcache          {} ({:.2}%)",
                self.stalls_dcache,
                pct(self.stalls_dcache)
            );
            println!(
                "  stalls.load_use        {} ({:.2}%)",
                self.stalls_load_use,
                pct(self.stalls_load_use)
            );
            println!("  branches.taken         {}", self.branches_taken);
            println!("  squashed               {}", self.squashed);
            println!("----------------------------------------------------------");
        }
        if want("memory") {
            println!("MEMORY HIERARCHY");
            println!(
                "  icache                 hits {} misses {} ({:.2}% hit)",
                self.icache_hits,
                self.icache_misses,
                self.icache_hit_rate()
            );
            println!(
                "  dcache                 hits {} misses {} ({:.2}% hit)",
                self.dcache_hits,
                self.dcache_misses,
                self.dcache_hit_rate()
            );
            println!("  dcache.writes          {}", self.dcache_writes);
            println!(
                "  port.grants            instruction {} data {}",
                self.port_grants_instruction, self.port_grants_data
            );
            println!(
                "  port.deferred          {}",
                self.port_deferred_instruction
            );
            println!("==========================================================");
        }
    }

    /// Prints every statistics section to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}

fn hit_rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        100.0 * hits as f64 / total as f64
    }
}
