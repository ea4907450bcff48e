//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the block that has not been accessed for the longest time.
//! Every access to a line, load or store, hit or fill, moves its stamp to the
//! current clock value; the smallest stamp in a full set is the LRU line.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_hit()`: O(1)
//!   - `select_victim()`: O(W) where W is the number of ways
//! - **Space Complexity:** One timestamp per line
//! - **Best Case:** Workloads with good temporal locality
//! - **Worst Case:** Scanning patterns larger than cache capacity (thrashing)

use super::ReplacementPolicy;
use crate::cache::CacheLine;

/// LRU policy. Stateless; recency lives in the line stamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    fn name(&self) -> &'static str {
        "LRU"
    }

    /// Moves the line to the most recently used position.
    fn on_hit(&self, line: &mut CacheLine, now: u64) {
        line.stamp = now;
    }
}
