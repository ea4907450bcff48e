//! Configuration system for the cache simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! a simulation run. It provides:
//! 1. **Defaults:** Baseline geometry and latency constants of the one-level reference cache.
//! 2. **Structures:** Hierarchical config for general options, cache geometry, and timing.
//! 3. **Enums:** Replacement policy selection.
//!
//! Configuration is built by the CLI from its flags, deserialized from JSON with
//! [`Config::from_json`], or taken from `Config::default()`.

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values reproduce the one-level reference cache when not
/// explicitly overridden.
mod defaults {
    /// Default cache capacity in bytes (1 KiB).
    pub const CACHE_SIZE: usize = 1024;

    /// Default block size in bytes.
    pub const CACHE_LINE: usize = 64;

    /// Default associativity (2-way).
    pub const CACHE_WAYS: usize = 2;

    /// Word size of the reference one-level cache, in bytes.
    pub const WORD_BYTES: usize = 64;

    /// Address width of the reference one-level cache, in bits.
    pub const ADDRESS_BITS: u32 = 64;

    /// Word size of the 32-bit LRU variant, in bytes.
    pub const LRU_WORD_BYTES: usize = 4;

    /// Address width of the 32-bit LRU variant, in bits.
    pub const LRU_ADDRESS_BITS: u32 = 32;

    /// Cycles charged for every cache lookup, hit or miss.
    pub const HIT_LATENCY: u64 = 5;

    /// Cycles charged for each block transfer to or from memory.
    pub const MEMORY_LATENCY: u64 = 100;

    /// Cycles charged per non-memory instruction.
    pub const NON_MEMORY_LATENCY: u64 = 1;

    /// Seed for the filler data used by stores without an explicit value.
    pub const STORE_SEED: u64 = 123456789;
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which block to evict
/// when a new block must be installed in a full set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// First In First Out replacement policy.
    ///
    /// Evicts the block that was filled earliest; hits do not refresh it.
    #[default]
    #[serde(alias = "Fifo", alias = "fifo")]
    Fifo,
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the block that was accessed least recently.
    #[serde(alias = "Lru", alias = "lru")]
    Lru,
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use cachesim_core::config::{Config, ReplacementPolicy};
///
/// let config = Config::default();
/// assert_eq!(config.cache.policy, ReplacementPolicy::Fifo);
/// assert_eq!(config.timing.memory_latency, 100);
/// ```
///
/// Deserializing from JSON; omitted sections and fields fall back to defaults:
///
/// ```
/// use cachesim_core::config::{Config, ReplacementPolicy};
///
/// let json = r#"{
///     "cache": {
///         "size_bytes": 1024,
///         "ways": 2,
///         "line_bytes": 64,
///         "word_bytes": 4,
///         "address_bits": 32,
///         "policy": "Lru"
///     },
///     "timing": { "hit_latency": 1 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.cache.policy, ReplacementPolicy::Lru);
/// assert_eq!(config.timing.hit_latency, 1);
/// assert_eq!(config.timing.memory_latency, 100);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Cache geometry and replacement policy
    #[serde(default)]
    pub cache: CacheConfig,
    /// Latency model
    #[serde(default)]
    pub timing: TimingConfig,
}

impl Config {
    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is not valid JSON or a
    /// field has the wrong type. Geometry is validated later, when a cache is built.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Emit a trace-level log event for every access.
    #[serde(default)]
    pub trace_accesses: bool,

    /// Seed for the filler values written by stores that carry no value.
    #[serde(default = "GeneralConfig::default_store_seed")]
    pub store_seed: u64,
}

impl GeneralConfig {
    /// Returns the default filler seed.
    fn default_store_seed() -> u64 {
        defaults::STORE_SEED
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_accesses: false,
            store_seed: defaults::STORE_SEED,
        }
    }
}

/// Cache geometry and replacement policy.
///
/// The raw values are validated and turned into a
/// [`Geometry`](crate::common::Geometry) when the cache is built.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Total capacity in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,

    /// Associativity (blocks per set)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Block size in bytes
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: usize,

    /// Word size in bytes
    #[serde(default = "CacheConfig::default_word")]
    pub word_bytes: usize,

    /// Modeled address width in bits
    #[serde(default = "CacheConfig::default_address_bits")]
    pub address_bits: u32,

    /// Victim selection algorithm
    #[serde(default)]
    pub policy: ReplacementPolicy,
}

impl CacheConfig {
    /// Returns the default cache capacity.
    fn default_size() -> usize {
        defaults::CACHE_SIZE
    }

    /// Returns the default associativity.
    fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }

    /// Returns the default block size.
    fn default_line() -> usize {
        defaults::CACHE_LINE
    }

    /// Returns the default word size.
    fn default_word() -> usize {
        defaults::WORD_BYTES
    }

    /// Returns the default address width.
    fn default_address_bits() -> u32 {
        defaults::ADDRESS_BITS
    }

    /// The 32-bit, 4-byte-word cache with LRU replacement.
    ///
    /// Capacity, associativity and block size keep their defaults and are
    /// normally overridden by the caller.
    pub fn lru_reference() -> Self {
        Self {
            word_bytes: defaults::LRU_WORD_BYTES,
            address_bits: defaults::LRU_ADDRESS_BITS,
            policy: ReplacementPolicy::Lru,
            ..Self::default()
        }
    }
}

impl Default for CacheConfig {
    /// Returns the one-level reference cache: 64-bit addresses, 64-byte words, FIFO.
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            ways: defaults::CACHE_WAYS,
            line_bytes: defaults::CACHE_LINE,
            word_bytes: defaults::WORD_BYTES,
            address_bits: defaults::ADDRESS_BITS,
            policy: ReplacementPolicy::default(),
        }
    }
}

/// Latency model, in cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TimingConfig {
    /// Charged on every lookup, hit or miss
    #[serde(default = "TimingConfig::default_hit")]
    pub hit_latency: u64,

    /// Charged per block written back or fetched
    #[serde(default = "TimingConfig::default_memory")]
    pub memory_latency: u64,

    /// Charged per non-memory instruction
    #[serde(default = "TimingConfig::default_non_memory")]
    pub non_memory_latency: u64,
}

impl TimingConfig {
    /// Returns the default lookup latency.
    fn default_hit() -> u64 {
        defaults::HIT_LATENCY
    }

    /// Returns the default memory transfer latency.
    fn default_memory() -> u64 {
        defaults::MEMORY_LATENCY
    }

    /// Returns the default non-memory instruction latency.
    fn default_non_memory() -> u64 {
        defaults::NON_MEMORY_LATENCY
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            hit_latency: defaults::HIT_LATENCY,
            memory_latency: defaults::MEMORY_LATENCY,
            non_memory_latency: defaults::NON_MEMORY_LATENCY,
        }
    }
}
