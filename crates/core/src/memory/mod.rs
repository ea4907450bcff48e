//! Backing Store.
//!
//! This module implements the memory behind the cache. It provides:
//! 1. **Sparse storage:** Only words that have been written are held; everything
//!    else reads as the caller's default.
//! 2. **Unbounded capacity:** Nothing is ever evicted or deleted.
//! 3. **Ordered iteration:** Words are visited in ascending address order for dumps.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::iter::FusedIterator;

use crate::common::Word;

/// Sparse word-addressable memory keyed by aligned address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackingStore {
    words: BTreeMap<u64, Word>,
}

impl BackingStore {
    /// Creates an empty backing store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the word at `addr`, or `None` if it was never written.
    #[inline]
    pub fn get(&self, addr: u64) -> Option<Word> {
        self.words.get(&addr).copied()
    }

    /// Returns the word at `addr`, reading untouched memory as zero.
    #[inline]
    pub fn read(&self, addr: u64) -> Word {
        self.get(addr).unwrap_or(0)
    }

    /// Writes `value` at `addr`, creating the entry on first use.
    #[inline]
    pub fn set(&mut self, addr: u64, value: Word) {
        let _ = self.words.insert(addr, value);
    }

    /// Number of words that have been written at least once.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterates over `(address, word)` pairs in ascending address order.
    ///
    /// The iterator borrows the store; call again to restart.
    pub fn iter_ordered(&self) -> Iter<'_> {
        Iter {
            inner: self.words.iter(),
        }
    }
}

/// Ordered iterator over a [`BackingStore`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, u64, Word>,
}

impl Iterator for Iter<'_> {
    type Item = (u64, Word);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(&addr, &word)| (addr, word))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a BackingStore {
    type Item = (u64, Word);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_ordered()
    }
}
