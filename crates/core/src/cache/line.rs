//! Cache line (block) state.

use crate::common::Word;

/// One way of one set: tag, state bits, policy stamp and data words.
///
/// Lines start invalid and clean with zeroed data. They are never freed
/// individually; a miss fill rewrites tag, stamp and words in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLine {
    pub(crate) tag: u64,
    pub(crate) valid: bool,
    pub(crate) dirty: bool,
    /// Fill time (FIFO) or last use time (LRU).
    pub(crate) stamp: u64,
    pub(crate) words: Vec<Word>,
}

impl CacheLine {
    /// Creates an invalid, clean line holding `words_per_line` zero words.
    pub fn new(words_per_line: usize) -> Self {
        Self {
            tag: 0,
            valid: false,
            dirty: false,
            stamp: 0,
            words: vec![0; words_per_line],
        }
    }

    /// Creates a valid, clean line for `tag` stamped at `stamp`.
    pub fn occupied(tag: u64, stamp: u64, words_per_line: usize) -> Self {
        Self {
            tag,
            valid: true,
            stamp,
            ..Self::new(words_per_line)
        }
    }

    /// Tag of the block held in this line.
    #[inline]
    pub const fn tag(&self) -> u64 {
        self.tag
    }

    /// Whether the line holds a block.
    #[inline]
    pub const fn valid(&self) -> bool {
        self.valid
    }

    /// Whether the block was modified since it was filled.
    #[inline]
    pub const fn dirty(&self) -> bool {
        self.dirty
    }

    /// Replacement policy timestamp.
    #[inline]
    pub const fn stamp(&self) -> u64 {
        self.stamp
    }

    /// The block's data words.
    #[inline]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Returns `true` if this line holds the block with `tag`.
    #[inline]
    pub(crate) const fn matches(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }
}
