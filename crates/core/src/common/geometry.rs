//! Cache geometry.
//!
//! A [`Geometry`] is the validated, immutable shape of a cache: how many sets
//! and ways it has, how many words a block holds, and how a raw address splits
//! into tag, set index and offset fields. Every other component derives its
//! indexing from it.

use super::addr::{DecodedAddr, low_ones, mask, shl, shr};
use super::error::ConfigError;
use crate::config::CacheConfig;

/// Validated cache shape and address field layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    size_bytes: usize,
    ways: usize,
    line_bytes: usize,
    word_bytes: usize,
    address_bits: u32,
    num_sets: usize,
    words_per_line: usize,
    index_bits: u32,
    offset_bits: u32,
    tag_bits: u32,
}

impl Geometry {
    /// Validates a cache configuration and derives the field layout.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when any dimension is zero, the word or line
    /// size is not a power of two, one set does not fit in the capacity, the
    /// set count is not a power of two, or the index and offset fields do not
    /// fit in the address width.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        let CacheConfig {
            size_bytes,
            ways,
            line_bytes,
            word_bytes,
            address_bits,
            ..
        } = *config;

        for (field, value) in [
            ("size_bytes", size_bytes),
            ("ways", ways),
            ("line_bytes", line_bytes),
            ("word_bytes", word_bytes),
            ("address_bits", address_bits as usize),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroDimension { field });
            }
        }
        if address_bits > u64::BITS {
            return Err(ConfigError::AddressTooWide { bits: address_bits });
        }
        if !word_bytes.is_power_of_two() {
            return Err(ConfigError::WordSizeNotPowerOfTwo { word_bytes });
        }
        if line_bytes % word_bytes != 0 || !(line_bytes / word_bytes).is_power_of_two() {
            return Err(ConfigError::LineNotWordMultiple {
                line_bytes,
                word_bytes,
            });
        }
        if ways.checked_mul(line_bytes).is_none_or(|set| set > size_bytes) {
            return Err(ConfigError::CacheTooSmall {
                size_bytes,
                ways,
                line_bytes,
            });
        }

        let num_sets = size_bytes / line_bytes / ways;
        if !num_sets.is_power_of_two() {
            return Err(ConfigError::SetCountNotPowerOfTwo { sets: num_sets });
        }

        let words_per_line = line_bytes / word_bytes;
        let index_bits = num_sets.trailing_zeros();
        let offset_bits = words_per_line.trailing_zeros() + word_bytes.trailing_zeros();
        let needed = index_bits + offset_bits;
        if needed > address_bits {
            return Err(ConfigError::AddressTooNarrow {
                needed,
                address_bits,
            });
        }

        Ok(Self {
            size_bytes,
            ways,
            line_bytes,
            word_bytes,
            address_bits,
            num_sets,
            words_per_line,
            index_bits,
            offset_bits,
            tag_bits: address_bits - needed,
        })
    }

    /// Total capacity in bytes.
    #[inline]
    pub const fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    /// Blocks per set.
    #[inline]
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Block size in bytes.
    #[inline]
    pub const fn line_bytes(&self) -> usize {
        self.line_bytes
    }

    /// Word size in bytes.
    #[inline]
    pub const fn word_bytes(&self) -> usize {
        self.word_bytes
    }

    /// Modeled address width in bits.
    #[inline]
    pub const fn address_bits(&self) -> u32 {
        self.address_bits
    }

    /// Number of sets.
    #[inline]
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Words held by each block.
    #[inline]
    pub const fn words_per_line(&self) -> usize {
        self.words_per_line
    }

    /// Width of the set index field.
    #[inline]
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Width of the byte offset field (word offset plus byte-in-word).
    #[inline]
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Width of the tag field.
    #[inline]
    pub const fn tag_bits(&self) -> u32 {
        self.tag_bits
    }

    /// Splits a raw address into tag, index and offsets.
    ///
    /// Bits at or above the address width are dropped; see [`Self::truncates`].
    pub const fn decode(&self, addr: u64) -> DecodedAddr {
        let width = self.address_bits;
        let tag_shift = self.offset_bits + self.index_bits;

        let byte_offset = addr & mask(0, self.offset_bits, width);
        let index = shr(
            addr & mask(self.offset_bits, self.index_bits, width),
            self.offset_bits,
        );
        let tag = shr(addr & mask(tag_shift, self.tag_bits, width), tag_shift);

        DecodedAddr {
            tag,
            index: index as usize,
            block_offset: (byte_offset / self.word_bytes as u64) as usize,
            byte_offset,
        }
    }

    /// Reassembles an address from its fields.
    pub const fn compose(&self, decoded: &DecodedAddr) -> u64 {
        self.line_base(decoded.tag, decoded.index) | decoded.byte_offset
    }

    /// Address of the first byte of the block with `tag` in set `index`.
    #[inline]
    pub const fn line_base(&self, tag: u64, index: usize) -> u64 {
        shl(tag, self.offset_bits + self.index_bits) | shl(index as u64, self.offset_bits)
    }

    /// Address of word `word` of the block with `tag` in set `index`.
    #[inline]
    pub const fn word_address(&self, tag: u64, index: usize, word: usize) -> u64 {
        self.line_base(tag, index) + (self.word_bytes * word) as u64
    }

    /// Returns `true` if `addr` has bits set above the modeled address width.
    ///
    /// Such addresses are not rejected: decoding silently drops the high bits,
    /// so two addresses differing only there alias the same block.
    #[inline]
    pub const fn truncates(&self, addr: u64) -> bool {
        addr & !low_ones(self.address_bits) != 0
    }
}

impl TryFrom<&CacheConfig> for Geometry {
    type Error = ConfigError;

    fn try_from(config: &CacheConfig) -> Result<Self, Self::Error> {
        Self::new(config)
    }
}
