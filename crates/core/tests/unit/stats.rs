//! Statistics Tests.
//!
//! Counter bookkeeping, derived metrics and the text report layout.

use pretty_assertions::assert_eq;

use cachesim_core::stats::{STATS_SECTIONS, SimStats};

fn sample() -> SimStats {
    let mut stats = SimStats::default();
    // 4 accesses: 3 misses (one with a write-back), then a hit.
    for _ in 0..3 {
        stats.record_instruction();
        stats.record_lookup(false, 5);
        stats.record_memory_access(100);
    }
    stats.record_memory_access(100);
    stats.writebacks += 1;
    stats.record_instruction();
    stats.record_lookup(true, 5);
    stats.record_non_memory(10, 1);
    stats
}

fn render(stats: &SimStats, sections: &[&str]) -> String {
    let sections: Vec<String> = sections.iter().map(ToString::to_string).collect();
    let mut out = Vec::new();
    stats.write_sections(&mut out, &sections).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn counters_accumulate() {
    let stats = sample();

    assert_eq!(stats.accesses(), 4);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.memory_accesses, 4);
    assert_eq!(stats.cycles, 4 * 5 + 4 * 100 + 10);
    assert_eq!(stats.instructions, 14);
}

#[test]
fn derived_metrics() {
    let stats = sample();

    assert_eq!(stats.hit_rate(), Some(25.0));
    assert_eq!(stats.miss_rate(), Some(75.0));
    assert_eq!(stats.average_cycles_per_access(), Some(430.0 / 4.0));
    assert_eq!(stats.instructions_per_cycle(), Some(14.0 / 430.0));
}

#[test]
fn empty_run_has_no_rates() {
    let stats = SimStats::default();

    assert_eq!(stats.hit_rate(), None);
    assert_eq!(stats.miss_rate(), None);
    assert_eq!(stats.average_cycles_per_access(), None);
    assert_eq!(stats.instructions_per_cycle(), None);
}

#[test]
fn snapshot_copies_counters_and_rates() {
    let report = sample().snapshot();

    assert_eq!(report.accesses, 4);
    assert_eq!(report.writebacks, 1);
    assert_eq!(report.hit_rate, Some(25.0));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["cycles"], 430);
    assert_eq!(json["miss_rate"], 75.0);
    assert!(serde_json::to_value(SimStats::default().snapshot()).unwrap()["hit_rate"].is_null());
}

#[test]
fn summary_section_layout() {
    assert_eq!(
        render(&sample(), &["summary"]),
        "# of L1 cache accesses: 4\n\
         # of Memory accesses: 4\n\
         Cache hit rate: 25.0%\n\
         Cache miss rate: 75.0%\n\
         CPU time(in cycle): 430\n\
         Instruction per cycle: 0.03256\n"
    );
}

#[test]
fn summary_without_accesses_prints_na() {
    let text = render(&SimStats::default(), &["summary"]);
    assert!(text.contains("Cache hit rate: n/a\n"));
    assert!(text.contains("Instruction per cycle: n/a\n"));
}

#[test]
fn section_filtering() {
    let stats = sample();

    let memory = render(&stats, &["memory"]);
    assert!(memory.starts_with("-----"));
    assert!(memory.contains("MEMORY\n"));
    assert!(memory.contains("  mem.writebacks         1\n"));
    assert!(!memory.contains("CACHE"));
    assert!(!memory.contains("hit rate"));

    let all = render(&stats, &[]);
    assert_eq!(all, render(&stats, STATS_SECTIONS));
    assert!(all.contains("  cache.avg_cycles       107.5\n"));
}

#[test]
fn counters_saturate_instead_of_wrapping() {
    let mut stats = SimStats::default();

    stats.record_non_memory(u64::MAX, 3);
    assert_eq!(stats.cycles, u64::MAX);
    assert_eq!(stats.instructions, u64::MAX);

    stats.record_lookup(false, 5);
    stats.record_memory_access(100);
    stats.record_instruction();
    stats.record_non_memory(1, 1);

    assert_eq!(stats.cycles, u64::MAX);
    assert_eq!(stats.instructions, u64::MAX);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.memory_accesses, 1);
}

#[test]
fn writeback_and_truncation_counters() {
    let mut stats = SimStats::default();
    stats.record_writeback();
    stats.record_truncation();
    stats.record_truncation();

    assert_eq!(stats.writebacks, 1);
    assert_eq!(stats.truncated_addresses, 2);
    assert_eq!(stats.cycles, 0);
}
