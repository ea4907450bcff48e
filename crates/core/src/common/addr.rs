//! Address field extraction.
//!
//! This module provides the bit-level building blocks of address decoding:
//! 1. **Masks:** Contiguous bit masks clipped to the modeled address width.
//! 2. **Decoded addresses:** The tag, set index and offsets of a raw address.
//!
//! The geometry-aware entry points ([`Geometry::decode`](super::Geometry::decode)
//! and [`Geometry::compose`](super::Geometry::compose)) live alongside the
//! geometry itself.

/// Returns a value with the low `bits` bits set.
///
/// Saturates to all ones for widths of 64 or more.
#[inline(always)]
pub const fn low_ones(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Returns `count` one bits starting at bit `start`.
///
/// When `start + count` reaches or exceeds `width`, the upper bound saturates
/// to the top of the modeled address (bit `width - 1`) instead of shifting
/// past it. Bits at or above `width` are never part of a mask, which is what
/// truncates addresses wider than the configured geometry.
///
/// # Arguments
///
/// * `start` - Lowest bit of the field.
/// * `count` - Width of the field in bits.
/// * `width` - Modeled address width in bits.
#[inline]
pub const fn mask(start: u32, count: u32, width: u32) -> u64 {
    let upper = if start + count >= width {
        low_ones(width)
    } else {
        low_ones(start + count)
    };
    upper & !low_ones(start)
}

/// Shifts right, yielding zero when the shift covers the whole word.
#[inline(always)]
pub(crate) const fn shr(value: u64, by: u32) -> u64 {
    match value.checked_shr(by) {
        Some(v) => v,
        None => 0,
    }
}

/// Shifts left, yielding zero when the shift covers the whole word.
#[inline(always)]
pub(crate) const fn shl(value: u64, by: u32) -> u64 {
    match value.checked_shl(by) {
        Some(v) => v,
        None => 0,
    }
}

/// A raw address split into its cache fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodedAddr {
    /// High-order bits identifying the memory block.
    pub tag: u64,
    /// Set the block maps to.
    pub index: usize,
    /// Word position within the block.
    pub block_offset: usize,
    /// Byte position within the block.
    pub byte_offset: u64,
}
