//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for one simulation run. It provides:
//! 1. **Counters:** Hits, misses, memory transfers, cycles and instructions.
//! 2. **Derived metrics:** Hit and miss rate, average cycles per access, IPC.
//! 3. **Reports:** A serializable snapshot and sectioned text output.

use std::io::{self, Write};

use serde::Serialize;

/// Simulation statistics structure tracking all performance metrics.
///
/// One instance lives inside each [`Cache`](crate::cache::Cache) and is only
/// reset by building a new cache.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Lookups that found their block resident.
    pub hits: u64,
    /// Lookups that had to fill a block.
    pub misses: u64,
    /// Block transfers between cache and memory (fills and write-backs).
    pub memory_accesses: u64,
    /// Dirty blocks written back to memory.
    pub writebacks: u64,
    /// Total simulated cycles.
    pub cycles: u64,
    /// Instructions executed, memory and non-memory.
    pub instructions: u64,
    /// Accesses whose address had bits above the modeled width.
    pub truncated_addresses: u64,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"cache"`, `"memory"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "cache", "memory"];

/// Read-only view of the statistics at one point in time.
///
/// Derived values are `None` when their denominator is zero.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatsReport {
    /// Total lookups (hits plus misses).
    pub accesses: u64,
    /// Lookups that hit.
    pub hits: u64,
    /// Lookups that missed.
    pub misses: u64,
    /// Block transfers between cache and memory.
    pub memory_accesses: u64,
    /// Dirty blocks written back.
    pub writebacks: u64,
    /// Total simulated cycles.
    pub cycles: u64,
    /// Instructions executed.
    pub instructions: u64,
    /// Accesses truncated to the modeled address width.
    pub truncated_addresses: u64,
    /// Percentage of lookups that hit.
    pub hit_rate: Option<f64>,
    /// Percentage of lookups that missed.
    pub miss_rate: Option<f64>,
    /// Cycles divided by lookups.
    pub average_cycles_per_access: Option<f64>,
    /// Instructions divided by cycles.
    pub instructions_per_cycle: Option<f64>,
}

impl SimStats {
    /// Total lookups performed.
    #[inline]
    pub const fn accesses(&self) -> u64 {
        self.hits.saturating_add(self.misses)
    }

    /// Records one lookup and charges its latency.
    #[inline]
    pub const fn record_lookup(&mut self, hit: bool, latency: u64) {
        self.cycles = self.cycles.saturating_add(latency);
        if hit {
            self.hits = self.hits.saturating_add(1);
        } else {
            self.misses = self.misses.saturating_add(1);
        }
    }

    /// Records one block transfer to or from memory and charges its latency.
    #[inline]
    pub const fn record_memory_access(&mut self, latency: u64) {
        self.cycles = self.cycles.saturating_add(latency);
        self.memory_accesses = self.memory_accesses.saturating_add(1);
    }

    /// Records one dirty block written back (the transfer itself goes through
    /// [`Self::record_memory_access`]).
    #[inline]
    pub const fn record_writeback(&mut self) {
        self.writebacks = self.writebacks.saturating_add(1);
    }

    /// Records one access whose address lost bits above the modeled width.
    #[inline]
    pub const fn record_truncation(&mut self) {
        self.truncated_addresses = self.truncated_addresses.saturating_add(1);
    }

    /// Records one memory instruction.
    #[inline]
    pub const fn record_instruction(&mut self) {
        self.instructions = self.instructions.saturating_add(1);
    }

    /// Records `count` non-memory instructions at `latency` cycles each.
    ///
    /// Counters saturate at `u64::MAX` instead of wrapping.
    #[inline]
    pub const fn record_non_memory(&mut self, count: u64, latency: u64) {
        self.cycles = self.cycles.saturating_add(count.saturating_mul(latency));
        self.instructions = self.instructions.saturating_add(count);
    }

    /// `100 * hits / accesses`.
    pub fn hit_rate(&self) -> Option<f64> {
        ratio(self.hits, self.accesses()).map(|r| r * 100.0)
    }

    /// `100 * misses / accesses`.
    pub fn miss_rate(&self) -> Option<f64> {
        ratio(self.misses, self.accesses()).map(|r| r * 100.0)
    }

    /// `cycles / accesses`.
    pub fn average_cycles_per_access(&self) -> Option<f64> {
        ratio(self.cycles, self.accesses())
    }

    /// `instructions / cycles`.
    pub fn instructions_per_cycle(&self) -> Option<f64> {
        ratio(self.instructions, self.cycles)
    }

    /// Captures the counters and derived metrics.
    pub fn snapshot(&self) -> StatsReport {
        StatsReport {
            accesses: self.accesses(),
            hits: self.hits,
            misses: self.misses,
            memory_accesses: self.memory_accesses,
            writebacks: self.writebacks,
            cycles: self.cycles,
            instructions: self.instructions,
            truncated_addresses: self.truncated_addresses,
            hit_rate: self.hit_rate(),
            miss_rate: self.miss_rate(),
            average_cycles_per_access: self.average_cycles_per_access(),
            instructions_per_cycle: self.instructions_per_cycle(),
        }
    }

    /// Writes the requested statistics sections to `out`.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"cache"` or
    /// `"memory"`. Pass an empty slice to write all sections. Metrics whose
    /// denominator is zero are shown as `n/a`.
    pub fn write_sections<W: Write>(&self, out: &mut W, sections: &[String]) -> io::Result<()> {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);

        if want("summary") {
            writeln!(out, "# of L1 cache accesses: {}", self.accesses())?;
            writeln!(out, "# of Memory accesses: {}", self.memory_accesses)?;
            writeln!(out, "Cache hit rate: {}", percent(self.hit_rate()))?;
            writeln!(out, "Cache miss rate: {}", percent(self.miss_rate()))?;
            writeln!(out, "CPU time(in cycle): {}", self.cycles)?;
            writeln!(
                out,
                "Instruction per cycle: {}",
                fixed(self.instructions_per_cycle(), 5)
            )?;
        }
        if want("cache") {
            writeln!(out, "----------------------------------------------------------")?;
            writeln!(out, "CACHE")?;
            writeln!(out, "  cache.hits             {}", self.hits)?;
            writeln!(out, "  cache.misses           {}", self.misses)?;
            writeln!(
                out,
                "  cache.avg_cycles       {}",
                fixed(self.average_cycles_per_access(), 1)
            )?;
            writeln!(out, "  cache.truncated_addrs  {}", self.truncated_addresses)?;
        }
        if want("memory") {
            writeln!(out, "----------------------------------------------------------")?;
            writeln!(out, "MEMORY")?;
            writeln!(out, "  mem.transfers          {}", self.memory_accesses)?;
            writeln!(out, "  mem.writebacks         {}", self.writebacks)?;
            writeln!(out, "  sim.instructions       {}", self.instructions)?;
        }
        Ok(())
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Equivalent to [`Self::write_sections`] on a locked stdout.
    pub fn print_sections(&self, sections: &[String]) -> io::Result<()> {
        self.write_sections(&mut io::stdout().lock(), sections)
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) -> io::Result<()> {
        self.print_sections(&[])
    }
}

/// `num / den`, or `None` for a zero denominator.
fn ratio(num: u64, den: u64) -> Option<f64> {
    (den != 0).then(|| num as f64 / den as f64)
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.1}%"))
}

fn fixed(value: Option<f64>, digits: usize) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.digits$}"))
}
