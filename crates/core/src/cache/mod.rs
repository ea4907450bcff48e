//! Set-Associative Cache Simulator.
//!
//! This module implements a write-back, write-allocate, set-associative cache in
//! front of a sparse [`BackingStore`]. It provides:
//! 1. **Lookup:** Tag comparison across the ways of the addressed set.
//! 2. **Miss handling:** Victim selection, dirty write-back, block fetch and install.
//! 3. **Data:** Loads return the cached word; stores update it and mark the block dirty.
//! 4. **Accounting:** Every lookup and block transfer is charged to [`SimStats`].
//!
//! The cache owns its backing store and statistics for the whole run; nothing
//! else mutates them while accesses are replayed.

/// Cache line state.
pub mod line;

/// Cache replacement policy implementations (FIFO, LRU).
pub mod policies;

use tracing::{debug, trace};

pub use self::line::CacheLine;
use self::policies::ReplacementPolicy;
use crate::common::{AccessKind, ConfigError, DecodedAddr, Geometry, Word};
use crate::config::{Config, TimingConfig};
use crate::memory::BackingStore;
use crate::stats::SimStats;

/// Outcome of one load or store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessResult {
    /// Whether the block was already resident.
    pub hit: bool,
    /// Set the address mapped to.
    pub set: usize,
    /// Way that served the access.
    pub way: usize,
    /// Word loaded, or the word just stored.
    pub value: Word,
}

/// Cache simulator implementing a set-associative cache with a pluggable policy.
///
/// Lines are stored flat, set-major: way `w` of set `s` lives at
/// `s * ways + w`.
#[derive(Debug)]
pub struct Cache {
    geometry: Geometry,
    timing: TimingConfig,
    policy: Box<dyn ReplacementPolicy>,
    lines: Vec<CacheLine>,
    memory: BackingStore,
    stats: SimStats,
    /// Policy clock; advanced once per load or store.
    clock: u64,
}

impl Cache {
    /// Creates a new cache from the cache and timing sections of `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry is invalid.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let geometry = Geometry::new(&config.cache)?;
        let policy = policies::build(config.cache.policy);
        Ok(Self::with_policy(geometry, config.timing, policy))
    }

    /// Creates a cache from an already validated geometry and a policy object.
    pub fn with_policy(
        geometry: Geometry,
        timing: TimingConfig,
        policy: Box<dyn ReplacementPolicy>,
    ) -> Self {
        debug!(
            sets = geometry.num_sets(),
            ways = geometry.ways(),
            words_per_line = geometry.words_per_line(),
            tag_bits = geometry.tag_bits(),
            index_bits = geometry.index_bits(),
            offset_bits = geometry.offset_bits(),
            policy = policy.name(),
            "cache initialised"
        );
        Self {
            lines: vec![
                CacheLine::new(geometry.words_per_line());
                geometry.num_sets() * geometry.ways()
            ],
            geometry,
            timing,
            policy,
            memory: BackingStore::new(),
            stats: SimStats::default(),
            clock: 0,
        }
    }

    /// The validated geometry.
    #[inline]
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The latency model.
    #[inline]
    pub const fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Name of the active replacement policy.
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Statistics accumulated so far.
    #[inline]
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Mutable statistics, for drivers that account work outside the cache.
    #[inline]
    pub const fn stats_mut(&mut self) -> &mut SimStats {
        &mut self.stats
    }

    /// The backing store behind the cache.
    #[inline]
    pub const fn memory(&self) -> &BackingStore {
        &self.memory
    }

    /// Loads the word at `addr`.
    pub fn load(&mut self, addr: u64) -> Word {
        self.access(AccessKind::Load, addr, 0).value
    }

    /// Stores `value` at `addr`.
    pub fn store(&mut self, addr: u64, value: Word) {
        let _ = self.access(AccessKind::Store, addr, value);
    }

    /// Performs one load or store.
    ///
    /// `value` is written for stores and ignored for loads.
    ///
    /// # Panics
    ///
    /// This function will not panic. Line indexing is bounded because the
    /// decoded set index is `< num_sets`, the way is `< ways`, and the block
    /// offset is `< words_per_line`.
    pub fn access(&mut self, kind: AccessKind, addr: u64, value: Word) -> AccessResult {
        let decoded = self.decode(addr);
        self.clock = self.clock.saturating_add(1);
        let now = self.clock;

        let (way, hit) = match self.search_set(&decoded) {
            Some(way) => {
                let idx = self.line_index(decoded.index, way);
                self.policy.on_hit(&mut self.lines[idx], now);
                (way, true)
            }
            None => (self.fill(&decoded, now), false),
        };

        let line = &mut self.lines[decoded.index * self.geometry.ways() + way];
        let value = match kind {
            AccessKind::Load => line.words[decoded.block_offset],
            AccessKind::Store => {
                line.words[decoded.block_offset] = value;
                line.dirty = true;
                value
            }
        };

        trace!(
            ?kind,
            addr,
            set = decoded.index,
            way,
            hit,
            value,
            "cache access"
        );

        AccessResult {
            hit,
            set: decoded.index,
            way,
            value,
        }
    }

    /// Looks `addr` up without touching data or policy state.
    ///
    /// Charges the lookup latency and counts a hit or miss like any access.
    ///
    /// # Returns
    ///
    /// The way holding the block, or `None` on a miss.
    pub fn lookup(&mut self, addr: u64) -> Option<usize> {
        let decoded = self.decode(addr);
        self.search_set(&decoded)
    }

    /// Checks if the cache holds the block containing `addr`.
    ///
    /// Side-effect free: no cycles, counters or stamps change.
    pub fn contains(&self, addr: u64) -> bool {
        let decoded = self.geometry.decode(addr);
        self.set_lines(decoded.index)
            .iter()
            .any(|line| line.matches(decoded.tag))
    }

    /// The ways of set `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_sets`.
    pub fn set_lines(&self, index: usize) -> &[CacheLine] {
        let base = self.line_index(index, 0);
        &self.lines[base..base + self.geometry.ways()]
    }

    /// Iterates over all sets in index order.
    pub fn sets(&self) -> impl Iterator<Item = &[CacheLine]> + '_ {
        self.lines.chunks(self.geometry.ways())
    }

    /// Number of valid lines holding modified data.
    pub fn dirty_lines(&self) -> usize {
        self.lines.iter().filter(|l| l.valid && l.dirty).count()
    }

    /// Writes every dirty line back to memory and marks it clean.
    ///
    /// Lines stay valid. Each write-back is charged and counted like one
    /// performed during eviction.
    pub fn flush(&mut self) {
        for set in 0..self.geometry.num_sets() {
            for way in 0..self.geometry.ways() {
                let idx = self.line_index(set, way);
                if self.lines[idx].valid && self.lines[idx].dirty {
                    self.write_back(set, idx);
                    self.lines[idx].dirty = false;
                }
            }
        }
    }

    #[inline]
    const fn line_index(&self, set: usize, way: usize) -> usize {
        set * self.geometry.ways() + way
    }

    /// Decodes `addr`, counting it if high bits are dropped.
    fn decode(&mut self, addr: u64) -> DecodedAddr {
        if self.geometry.truncates(addr) {
            self.stats.record_truncation();
            debug!(
                addr,
                address_bits = self.geometry.address_bits(),
                "address truncated to modeled width"
            );
        }
        self.geometry.decode(addr)
    }

    /// Scans the set for the tag and charges one lookup.
    fn search_set(&mut self, decoded: &DecodedAddr) -> Option<usize> {
        let way = self
            .set_lines(decoded.index)
            .iter()
            .position(|line| line.matches(decoded.tag));
        self.stats
            .record_lookup(way.is_some(), self.timing.hit_latency);
        way
    }

    /// Installs the block for `decoded`, evicting as needed.
    ///
    /// # Returns
    ///
    /// The way the block now occupies.
    fn fill(&mut self, decoded: &DecodedAddr, now: u64) -> usize {
        let way = self.policy.select_victim(self.set_lines(decoded.index));
        let idx = self.line_index(decoded.index, way);

        if self.lines[idx].valid && self.lines[idx].dirty {
            self.write_back(decoded.index, idx);
        }

        let geometry = self.geometry;
        let line = &mut self.lines[idx];
        for (i, word) in line.words.iter_mut().enumerate() {
            *word = self
                .memory
                .read(geometry.word_address(decoded.tag, decoded.index, i));
        }
        line.valid = true;
        line.dirty = false;
        line.tag = decoded.tag;
        self.policy.on_fill(line, now);
        self.stats.record_memory_access(self.timing.memory_latency);

        way
    }

    /// Copies line `idx` of set `set` word by word to its home address.
    fn write_back(&mut self, set: usize, idx: usize) {
        let geometry = self.geometry;
        let line = &self.lines[idx];
        for (i, &word) in line.words.iter().enumerate() {
            self.memory
                .set(geometry.word_address(line.tag, set, i), word);
        }
        debug!(
            set,
            tag = line.tag,
            base = geometry.line_base(line.tag, set),
            "dirty block written back"
        );
        self.stats.record_memory_access(self.timing.memory_latency);
        self.stats.record_writeback();
    }
}
