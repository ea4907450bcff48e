//! Memory access types.

use serde::{Deserialize, Serialize};

/// A single word of cached or backing-store data.
pub type Word = u64;

/// The kind of a memory access replayed from a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessKind {
    /// Read a word; the cache returns its current value.
    Load,
    /// Write a word; the block is fetched first on a miss (write-allocate).
    Store,
}

impl AccessKind {
    /// Returns `true` for stores.
    #[inline]
    pub const fn is_store(self) -> bool {
        matches!(self, Self::Store)
    }
}

/// One parsed trace entry.
///
/// `non_mem_count` is the number of non-memory instructions that ran
/// alongside this access; each of them is charged the configured
/// non-memory latency after the access completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRecord {
    /// Load or store.
    pub kind: AccessKind,
    /// Raw byte address.
    pub address: u64,
    /// Value to store; `None` lets the driver pick filler data.
    pub value: Option<Word>,
    /// Non-memory instructions accounted with this access.
    pub non_mem_count: u64,
}

impl AccessRecord {
    /// A load of `address` with no surrounding non-memory work.
    pub const fn load(address: u64) -> Self {
        Self {
            kind: AccessKind::Load,
            address,
            value: None,
            non_mem_count: 0,
        }
    }

    /// A store of `value` to `address` with no surrounding non-memory work.
    pub const fn store(address: u64, value: Word) -> Self {
        Self {
            kind: AccessKind::Store,
            address,
            value: Some(value),
            non_mem_count: 0,
        }
    }

    /// Returns the record with `count` non-memory instructions attached.
    #[must_use]
    pub const fn with_non_mem(mut self, count: u64) -> Self {
        self.non_mem_count = count;
        self
    }
}
