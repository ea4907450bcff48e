//! Cache Replacement Policies.
//!
//! Implements the algorithms for selecting victim lines in a set-associative cache.
//! Both policies keep their state in each line's timestamp and differ only in when
//! that timestamp is refreshed.
//!
//! # Policies
//!
//! - `Fifo`: First-In, First-Out. Stamped on fill only.
//! - `Lru`: Least Recently Used. Stamped on fill and on every hit.

use std::fmt;

use super::CacheLine;
use crate::config::ReplacementPolicy as PolicyType;

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;

/// Trait for cache replacement policies.
///
/// Defines when a line's timestamp is refreshed and how a victim is chosen
/// from a set.
pub trait ReplacementPolicy: fmt::Debug + Send + Sync {
    /// Short policy name for logs and reports.
    fn name(&self) -> &'static str;

    /// Stamps a line that was just filled on a miss.
    ///
    /// # Arguments
    ///
    /// * `line` - The freshly installed line.
    /// * `now` - Current value of the cache clock.
    fn on_fill(&self, line: &mut CacheLine, now: u64) {
        line.stamp = now;
    }

    /// Updates a line's state after a hit.
    ///
    /// # Arguments
    ///
    /// * `line` - The line that hit.
    /// * `now` - Current value of the cache clock.
    fn on_hit(&self, line: &mut CacheLine, now: u64);

    /// Selects the way to fill in `set`.
    ///
    /// The first invalid way wins outright. Once the set is full, the way with
    /// the smallest stamp is chosen; ties go to the lowest way index.
    ///
    /// # Returns
    ///
    /// The index of the way to evict or fill.
    fn select_victim(&self, set: &[CacheLine]) -> usize {
        if let Some(way) = set.iter().position(|line| !line.valid) {
            return way;
        }
        oldest_way(set)
    }
}

/// Index of the line with the smallest stamp, keeping the first on ties.
pub(crate) fn oldest_way(set: &[CacheLine]) -> usize {
    let mut victim = 0;
    for (way, line) in set.iter().enumerate().skip(1) {
        if line.stamp < set[victim].stamp {
            victim = way;
        }
    }
    victim
}

/// Builds the policy selected in the configuration.
pub fn build(kind: PolicyType) -> Box<dyn ReplacementPolicy> {
    match kind {
        PolicyType::Fifo => Box::new(FifoPolicy),
        PolicyType::Lru => Box::new(LruPolicy),
    }
}
