//! Simulator: replays access records through one cache.
//!
//! The simulator is the thin driver between a parsed trace and the cache. For
//! each record it counts the memory instruction, performs the load or store,
//! then charges the non-memory instructions that ran alongside it.

use serde::Serialize;
use tracing::info;

use crate::cache::Cache;
use crate::common::{AccessKind, AccessRecord, ConfigError, Word};
use crate::config::Config;
use crate::stats::{SimStats, StatsReport};

/// Result of replaying one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessOutcome {
    /// Load or store.
    pub kind: AccessKind,
    /// Raw address from the record.
    pub address: u64,
    /// Whether the block was resident.
    pub hit: bool,
    /// Word loaded, or word stored.
    pub value: Word,
}

/// Deterministic filler data for stores that carry no value.
///
/// Xorshift generator producing values below 65536.
#[derive(Debug, Clone)]
struct StoreFiller {
    state: u64,
}

impl StoreFiller {
    /// Fallback seed; xorshift never leaves the all-zero state.
    const ZERO_SEED_REPLACEMENT: u64 = 0x2545_F491_4F6C_DD1D;

    const fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 {
                Self::ZERO_SEED_REPLACEMENT
            } else {
                seed
            },
        }
    }

    const fn next_value(&mut self) -> Word {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x % 65536
    }
}

/// Top-level simulator: one cache plus the per-run driver state.
#[derive(Debug)]
pub struct Simulator {
    cache: Cache,
    filler: StoreFiller,
    trace_accesses: bool,
}

impl Simulator {
    /// Creates a new simulator with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the cache geometry is invalid.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            cache: Cache::new(config)?,
            filler: StoreFiller::new(config.general.store_seed),
            trace_accesses: config.general.trace_accesses,
        })
    }

    /// Replays one record.
    pub fn step(&mut self, record: &AccessRecord) -> AccessOutcome {
        self.cache.stats_mut().record_instruction();

        let value = match record.kind {
            AccessKind::Load => 0,
            AccessKind::Store => record
                .value
                .unwrap_or_else(|| self.filler.next_value()),
        };
        let result = self.cache.access(record.kind, record.address, value);

        let non_memory_latency = self.cache.timing().non_memory_latency;
        self.cache
            .stats_mut()
            .record_non_memory(record.non_mem_count, non_memory_latency);

        if self.trace_accesses {
            info!(
                step = self.cache.stats().accesses(),
                kind = ?record.kind,
                address = record.address,
                hit = result.hit,
                value = result.value,
                cycles = self.cache.stats().cycles,
                "replayed access"
            );
        }

        AccessOutcome {
            kind: record.kind,
            address: record.address,
            hit: result.hit,
            value: result.value,
        }
    }

    /// Replays every record in order and returns the final statistics.
    pub fn run<I>(&mut self, records: I) -> StatsReport
    where
        I: IntoIterator<Item = AccessRecord>,
    {
        for record in records {
            let _ = self.step(&record);
        }
        self.cache.stats().snapshot()
    }

    /// The simulated cache.
    pub const fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Mutable access to the simulated cache, e.g. to flush before a dump.
    pub const fn cache_mut(&mut self) -> &mut Cache {
        &mut self.cache
    }

    /// Statistics accumulated so far.
    pub const fn stats(&self) -> &SimStats {
        self.cache.stats()
    }

    /// Consumes the simulator, returning its cache.
    pub fn into_cache(self) -> Cache {
        self.cache
    }
}
