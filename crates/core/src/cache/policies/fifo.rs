//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the block that entered its set earliest, regardless of how
//! recently it was accessed. A line's stamp records its fill time and is never
//! refreshed by hits, so a heavily reused block is evicted as soon as it becomes
//! the oldest resident.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_hit()`: O(1)
//!   - `select_victim()`: O(W) where W is the number of ways
//! - **Best Case:** Streaming accesses where all lines have equal importance
//! - **Worst Case:** Workloads with strong temporal locality (may evict frequently-used lines)

use super::ReplacementPolicy;
use crate::cache::CacheLine;

/// FIFO policy. Stateless; the order lives in the line stamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoPolicy;

impl ReplacementPolicy for FifoPolicy {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    /// Hits leave the fill time untouched.
    fn on_hit(&self, _line: &mut CacheLine, _now: u64) {}
}
