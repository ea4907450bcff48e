//! Geometry Validation Tests.
//!
//! Checks the derived shape of valid configurations and each rejection rule.

use pretty_assertions::assert_eq;
use rstest::rstest;

use cachesim_core::common::{ConfigError, Geometry};
use cachesim_core::config::{CacheConfig, ReplacementPolicy};

use crate::common::config;

fn cache_config(size_bytes: usize, ways: usize, line_bytes: usize) -> CacheConfig {
    config(size_bytes, ways, line_bytes, ReplacementPolicy::Lru).cache
}

#[test]
fn small_geometry_fields() {
    let geometry = Geometry::new(&cache_config(1024, 2, 64)).unwrap();

    assert_eq!(geometry.num_sets(), 8);
    assert_eq!(geometry.words_per_line(), 16);
    assert_eq!(geometry.offset_bits(), 6);
    assert_eq!(geometry.index_bits(), 3);
    assert_eq!(geometry.tag_bits(), 23);
}

#[test]
fn default_geometry_fields() {
    let geometry = Geometry::new(&CacheConfig::default()).unwrap();

    assert_eq!(geometry.num_sets(), 8);
    assert_eq!(geometry.words_per_line(), 1);
    assert_eq!(geometry.offset_bits(), 6);
    assert_eq!(geometry.index_bits(), 3);
    assert_eq!(geometry.tag_bits(), 55);
}

#[test]
fn fully_associative_has_one_set() {
    let geometry = Geometry::new(&cache_config(1024, 16, 64)).unwrap();
    assert_eq!(geometry.num_sets(), 1);
    assert_eq!(geometry.index_bits(), 0);
}

#[test]
fn try_from_matches_new() {
    let cfg = cache_config(4096, 4, 32);
    assert_eq!(Geometry::try_from(&cfg), Geometry::new(&cfg));
}

#[rstest]
#[case::zero_size(cache_config(0, 2, 64), ConfigError::ZeroDimension { field: "size_bytes" })]
#[case::zero_ways(cache_config(1024, 0, 64), ConfigError::ZeroDimension { field: "ways" })]
#[case::zero_line(cache_config(1024, 2, 0), ConfigError::ZeroDimension { field: "line_bytes" })]
#[case::too_small(
    cache_config(64, 2, 64),
    ConfigError::CacheTooSmall { size_bytes: 64, ways: 2, line_bytes: 64 }
)]
#[case::sets_not_pow2(cache_config(3 * 128, 2, 64), ConfigError::SetCountNotPowerOfTwo { sets: 3 })]
#[case::line_not_word_multiple(
    cache_config(1024, 2, 6),
    ConfigError::LineNotWordMultiple { line_bytes: 6, word_bytes: 4 }
)]
#[case::line_not_pow2_words(
    cache_config(1024, 2, 12),
    ConfigError::LineNotWordMultiple { line_bytes: 12, word_bytes: 4 }
)]
fn rejects_bad_shape(#[case] cfg: CacheConfig, #[case] expected: ConfigError) {
    assert_eq!(Geometry::new(&cfg), Err(expected));
}

#[test]
fn rejects_odd_word_size() {
    let cfg = CacheConfig {
        word_bytes: 3,
        ..cache_config(1024, 2, 64)
    };
    assert_eq!(
        Geometry::new(&cfg),
        Err(ConfigError::WordSizeNotPowerOfTwo { word_bytes: 3 })
    );
}

#[test]
fn rejects_address_width_out_of_range() {
    let wide = CacheConfig {
        address_bits: 65,
        ..cache_config(1024, 2, 64)
    };
    assert_eq!(
        Geometry::new(&wide),
        Err(ConfigError::AddressTooWide { bits: 65 })
    );

    let narrow = CacheConfig {
        address_bits: 8,
        ..cache_config(1024, 2, 64)
    };
    assert_eq!(
        Geometry::new(&narrow),
        Err(ConfigError::AddressTooNarrow {
            needed: 9,
            address_bits: 8,
        })
    );
}

#[test]
fn errors_render_readably() {
    let err = Geometry::new(&cache_config(64, 2, 64)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "cache size too small: 2 ways of 64 bytes exceed 64 bytes"
    );
}
