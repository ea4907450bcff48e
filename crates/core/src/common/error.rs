//! Error definitions for the cache simulator.
//!
//! This module defines the two failure domains of the simulator:
//! 1. **Configuration:** Invalid cache geometry, rejected once at construction.
//! 2. **Trace input:** Malformed trace lines, reported with their line number.
//!
//! Per-access cache operations never fail; once a cache has been built every
//! load and store completes.

use thiserror::Error;

/// Invalid cache geometry.
///
/// Raised by [`Geometry::new`](crate::common::Geometry::new) and everything that
/// builds on it. These errors are fatal for a simulation run: the caller is
/// expected to report them and exit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A dimension that must be positive was zero.
    #[error("{field} must be greater than zero")]
    ZeroDimension {
        /// Name of the offending configuration field.
        field: &'static str,
    },

    /// The address width exceeds the 64 bits an address value can hold.
    #[error("address width of {bits} bits exceeds the supported maximum of 64")]
    AddressTooWide {
        /// Configured address width.
        bits: u32,
    },

    /// Word size is not a power of two.
    #[error("word size {word_bytes} is not a power of two")]
    WordSizeNotPowerOfTwo {
        /// Configured word size in bytes.
        word_bytes: usize,
    },

    /// Line size is not a power-of-two multiple of the word size.
    #[error("line size {line_bytes} is not a power-of-two multiple of the {word_bytes}-byte word")]
    LineNotWordMultiple {
        /// Configured line size in bytes.
        line_bytes: usize,
        /// Configured word size in bytes.
        word_bytes: usize,
    },

    /// One set of `ways` lines does not fit in the cache.
    #[error("cache size too small: {ways} ways of {line_bytes} bytes exceed {size_bytes} bytes")]
    CacheTooSmall {
        /// Configured total capacity in bytes.
        size_bytes: usize,
        /// Configured associativity.
        ways: usize,
        /// Configured line size in bytes.
        line_bytes: usize,
    },

    /// The derived set count is not a power of two.
    #[error("set count {sets} is not a power of two")]
    SetCountNotPowerOfTwo {
        /// Derived number of sets.
        sets: usize,
    },

    /// Index and offset fields do not fit in the address width.
    #[error("{needed} index and offset bits do not fit in a {address_bits}-bit address")]
    AddressTooNarrow {
        /// Bits needed for index plus byte offset.
        needed: u32,
        /// Configured address width.
        address_bits: u32,
    },

    /// A configuration document could not be deserialized.
    #[error("invalid configuration document: {0}")]
    Parse(String),
}

/// Malformed trace input.
#[derive(Debug, Error)]
pub enum TraceError {
    /// A line could not be interpreted in the selected trace format.
    #[error("line {line}: cannot parse `{text}`: {reason}")]
    Malformed {
        /// One-based line number.
        line: usize,
        /// The offending line, trimmed.
        text: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// The underlying reader failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),
}
