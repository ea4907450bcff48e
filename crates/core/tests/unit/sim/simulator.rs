//! Simulator Driver Tests.
//!
//! Replays small traces end to end and checks instruction and cycle accounting.

use std::io::Cursor;

use pretty_assertions::assert_eq;

use cachesim_core::Simulator;
use cachesim_core::common::{AccessKind, AccessRecord};
use cachesim_core::config::{Config, GeneralConfig, ReplacementPolicy};
use cachesim_core::sim::{TraceFormat, parse_trace};

use crate::common::{HIT, MEM, init_logging, small_config};

fn default_sim() -> Simulator {
    Simulator::new(&Config::default()).unwrap()
}

#[test]
fn step_counts_memory_and_non_memory_instructions() {
    let mut sim = default_sim();

    let outcome = sim.step(&AccessRecord::load(4096).with_non_mem(3));

    assert!(!outcome.hit);
    assert_eq!(outcome.kind, AccessKind::Load);
    assert_eq!(sim.stats().instructions, 4);
    assert_eq!(sim.stats().cycles, HIT + MEM + 3);
}

#[test]
fn stores_without_value_use_seeded_filler() {
    let mut sim = default_sim();

    let values: Vec<u64> = [0x0, 0x40, 0x80]
        .into_iter()
        .map(|addr| sim.step(&AccessRecord {
            kind: AccessKind::Store,
            address: addr,
            value: None,
            non_mem_count: 0,
        }).value)
        .collect();

    assert_eq!(values, vec![40911, 47408, 57922]);
    assert_eq!(sim.cache_mut().load(0x40), 47408);
}

#[test]
fn filler_depends_on_seed() {
    let record = AccessRecord {
        kind: AccessKind::Store,
        address: 0,
        value: None,
        non_mem_count: 0,
    };
    let reseeded = Config {
        general: GeneralConfig {
            store_seed: 42,
            ..GeneralConfig::default()
        },
        ..Config::default()
    };

    let a = default_sim().step(&record).value;
    let b = Simulator::new(&reseeded).unwrap().step(&record).value;
    assert_ne!(a, b);
}

#[test]
fn explicit_store_value_is_kept() {
    let mut sim = Simulator::new(&small_config(ReplacementPolicy::Lru)).unwrap();

    let _ = sim.step(&AccessRecord::store(0x100, 99));
    let outcome = sim.step(&AccessRecord::load(0x100));

    assert!(outcome.hit);
    assert_eq!(outcome.value, 99);
}

/// Loads 0x00, 0x40, 0x00 through the LRU preset: two misses then a hit.
#[test]
fn run_reports_final_statistics() {
    init_logging();
    let config = Config {
        general: GeneralConfig {
            trace_accesses: true,
            ..GeneralConfig::default()
        },
        ..small_config(ReplacementPolicy::Lru)
    };
    let mut sim = Simulator::new(&config).unwrap();

    let report = sim.run([0x00, 0x40, 0x00].map(AccessRecord::load));

    assert_eq!(report.accesses, 3);
    assert_eq!(report.hits, 1);
    assert_eq!(report.misses, 2);
    assert_eq!(report.memory_accesses, 2);
    assert_eq!(report.cycles, 3 * HIT + 2 * MEM);
    assert_eq!(report.instructions, 3);
}

#[test]
fn counted_trace_end_to_end() {
    let trace = "0 2 0\n1 0 64\n0 1 0\n1 0 1088\n0 0 2112\n#\n0 0 9999\n";
    let records = parse_trace(Cursor::new(trace), TraceFormat::Auto).unwrap();
    assert_eq!(records.len(), 5, "Records after `#` are ignored");

    let mut sim = default_sim();
    let report = sim.run(records);

    // Sets: 0 -> 0, 64 -> 1, 1088 -> 1, 2112 -> 1 (FIFO evicts the dirty 64).
    assert_eq!(report.hits, 1);
    assert_eq!(report.misses, 4);
    assert_eq!(report.writebacks, 1);
    assert_eq!(report.memory_accesses, 5);
    assert_eq!(report.instructions, 8);
    assert_eq!(report.cycles, 5 * HIT + 5 * MEM + 3);
    assert!(sim.into_cache().memory().get(64).is_some());
}

#[test]
fn invalid_configuration_is_rejected() {
    let mut config = Config::default();
    config.cache.ways = 3;

    assert!(Simulator::new(&config).is_err());
}

/// A non-memory count near `u64::MAX` pins cycles and instructions at the maximum.
#[test]
fn huge_non_memory_count_saturates() {
    let trace = "0 18446744073709551615 0\n0 1 64\n";
    let records = parse_trace(Cursor::new(trace), TraceFormat::Auto).unwrap();

    let report = default_sim().run(records);

    assert_eq!(report.accesses, 2);
    assert_eq!(report.misses, 2);
    assert_eq!(report.cycles, u64::MAX);
    assert_eq!(report.instructions, u64::MAX);
    assert_eq!(report.instructions_per_cycle, Some(1.0));
}
