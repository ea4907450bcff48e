//! Set-associative cache simulator library.
//!
//! This crate replays memory access traces through a single-level, write-back,
//! write-allocate cache and accounts every cycle it costs:
//! 1. **Geometry:** Address decoding into tag, set index and offsets.
//! 2. **Cache:** Hit detection, victim selection, dirty write-back and block fill.
//! 3. **Policies:** FIFO and LRU replacement.
//! 4. **Memory:** A sparse, unbounded backing store.
//! 5. **Simulation:** Trace parsing, the replay driver, configuration and statistics.
//!
//! # Examples
//!
//! ```
//! use cachesim_core::{Cache, Config};
//! use cachesim_core::config::CacheConfig;
//!
//! let config = Config {
//!     cache: CacheConfig {
//!         size_bytes: 1024,
//!         ways: 2,
//!         line_bytes: 64,
//!         ..CacheConfig::lru_reference()
//!     },
//!     ..Config::default()
//! };
//! let mut cache = Cache::new(&config).unwrap();
//!
//! cache.store(0x40, 7);
//! assert_eq!(cache.load(0x40), 7);
//! assert_eq!(cache.stats().hits, 1);
//! ```

/// Set-associative cache and replacement policies.
pub mod cache;
/// Common types (address fields, geometry, access records, errors).
pub mod common;
/// Simulator configuration (defaults, policy selection, timing).
pub mod config;
/// Sparse backing store.
pub mod memory;
/// Trace parsing and the replay driver.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Main cache type; owns lines, backing store and statistics.
pub use crate::cache::Cache;
/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Trace replay driver.
pub use crate::sim::Simulator;
