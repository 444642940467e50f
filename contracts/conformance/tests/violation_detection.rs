//! The suite must catch broken collections, not just pass good ones.

use collection_conformance::{
    ConformanceConfig, ConformanceError, ConformanceReport, ConformanceRunner, TestHarness,
    TestStatus,
};
use collection_contracts::maps::{Iter, Keys};
use collection_contracts::{ContractError, Mapping, Sequence, VecMap};
use std::collections::{btree_map, BTreeMap};
use std::sync::Once;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("collection_conformance=debug")
            .with_test_writer()
            .try_init();
    });
}

fn failed_names(report: &ConformanceReport) -> Vec<&str> {
    report
        .failures()
        .into_iter()
        .map(|result| result.name.as_str())
        .collect()
}

/// Mapping that overwrites on a duplicate key instead of rejecting it
#[derive(Default)]
struct OverwritingMap(VecMap<String, i64>);

impl Mapping for OverwritingMap {
    type Key = String;
    type Value = i64;
    type Iter<'a> = Iter<'a, String, i64>;
    type Keys<'a> = Keys<'a, String, i64>;

    fn len(&self) -> usize {
        self.0.len()
    }

    fn add(&mut self, key: String, value: i64) -> Result<(), ContractError> {
        self.0.remove(&key);
        self.0.add(key, value)
    }

    fn clear(&mut self) {
        self.0.clear()
    }

    fn contains_key(&self, key: &String) -> bool {
        self.0.contains_key(key)
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.0.iter()
    }

    fn keys(&self) -> Self::Keys<'_> {
        self.0.keys()
    }

    fn remove(&mut self, key: &String) -> bool {
        self.0.remove(key)
    }

    fn get(&self, key: &String) -> Option<&i64> {
        self.0.get(key)
    }
}

/// Mapping that answers missing keys with the default value
#[derive(Default)]
struct LenientIndexerMap(VecMap<String, i64>);

static DEFAULT_VALUE: i64 = 0;

impl Mapping for LenientIndexerMap {
    type Key = String;
    type Value = i64;
    type Iter<'a> = Iter<'a, String, i64>;
    type Keys<'a> = Keys<'a, String, i64>;

    fn len(&self) -> usize {
        self.0.len()
    }

    fn add(&mut self, key: String, value: i64) -> Result<(), ContractError> {
        self.0.add(key, value)
    }

    fn clear(&mut self) {
        self.0.clear()
    }

    fn contains_key(&self, key: &String) -> bool {
        self.0.contains_key(key)
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.0.iter()
    }

    fn keys(&self) -> Self::Keys<'_> {
        self.0.keys()
    }

    fn remove(&mut self, key: &String) -> bool {
        self.0.remove(key)
    }

    fn get(&self, key: &String) -> Option<&i64> {
        self.0.get(key)
    }

    fn value(&self, key: &String) -> Result<&i64, ContractError> {
        Ok(self.0.get(key).unwrap_or(&DEFAULT_VALUE))
    }
}

/// Mapping that iterates in key order rather than insertion order
#[derive(Default)]
struct SortedMap(BTreeMap<String, i64>);

impl Mapping for SortedMap {
    type Key = String;
    type Value = i64;
    type Iter<'a> = btree_map::Iter<'a, String, i64>;
    type Keys<'a> = btree_map::Keys<'a, String, i64>;

    fn len(&self) -> usize {
        self.0.len()
    }

    fn add(&mut self, key: String, value: i64) -> Result<(), ContractError> {
        if self.0.contains_key(&key) {
            return Err(ContractError::duplicate_key(&key));
        }
        self.0.insert(key, value);
        Ok(())
    }

    fn clear(&mut self) {
        self.0.clear()
    }

    fn contains_key(&self, key: &String) -> bool {
        self.0.contains_key(key)
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.0.iter()
    }

    fn keys(&self) -> Self::Keys<'_> {
        self.0.keys()
    }

    fn remove(&mut self, key: &String) -> bool {
        self.0.remove(key).is_some()
    }

    fn get(&self, key: &String) -> Option<&i64> {
        self.0.get(key)
    }
}

/// Sequence whose setter appends when the position is one past the end
#[derive(Default)]
struct GrowingSequence(Vec<collection_conformance::SeedEntry>);

impl Sequence for GrowingSequence {
    type Item = collection_conformance::SeedEntry;
    type Iter<'a> = std::slice::Iter<'a, Self::Item>;

    fn len(&self) -> usize {
        self.0.len()
    }

    fn add(&mut self, item: Self::Item) {
        self.0.push(item)
    }

    fn clear(&mut self) {
        self.0.clear()
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.0.iter()
    }

    fn insert(&mut self, index: usize, item: Self::Item) -> Result<(), ContractError> {
        Sequence::insert(&mut self.0, index, item)
    }

    fn remove_at(&mut self, index: usize) -> Result<Self::Item, ContractError> {
        Sequence::remove_at(&mut self.0, index)
    }

    fn get(&self, index: usize) -> Result<&Self::Item, ContractError> {
        Sequence::get(&self.0, index)
    }

    fn set(&mut self, index: usize, item: Self::Item) -> Result<Self::Item, ContractError> {
        if index == self.0.len() {
            self.0.push(item.clone());
            return Ok(item);
        }
        Sequence::set(&mut self.0, index, item)
    }
}

/// Sequence that indexes without bounds checks and panics out of range
#[derive(Default)]
struct PanickingSequence(Vec<collection_conformance::SeedEntry>);

impl Sequence for PanickingSequence {
    type Item = collection_conformance::SeedEntry;
    type Iter<'a> = std::slice::Iter<'a, Self::Item>;

    fn len(&self) -> usize {
        self.0.len()
    }

    fn add(&mut self, item: Self::Item) {
        self.0.push(item)
    }

    fn clear(&mut self) {
        self.0.clear()
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.0.iter()
    }

    fn insert(&mut self, index: usize, item: Self::Item) -> Result<(), ContractError> {
        self.0.insert(index, item);
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> Result<Self::Item, ContractError> {
        Ok(self.0.remove(index))
    }

    fn get(&self, index: usize) -> Result<&Self::Item, ContractError> {
        Ok(&self.0[index])
    }

    fn set(&mut self, index: usize, item: Self::Item) -> Result<Self::Item, ContractError> {
        Ok(std::mem::replace(&mut self.0[index], item))
    }
}

/// Mapping whose indexer cannot see the first seeded key
#[derive(Default)]
struct BlindIndexerMap(VecMap<String, i64>);

impl Mapping for BlindIndexerMap {
    type Key = String;
    type Value = i64;
    type Iter<'a> = Iter<'a, String, i64>;
    type Keys<'a> = Keys<'a, String, i64>;

    fn len(&self) -> usize {
        self.0.len()
    }

    fn add(&mut self, key: String, value: i64) -> Result<(), ContractError> {
        self.0.add(key, value)
    }

    fn clear(&mut self) {
        self.0.clear()
    }

    fn contains_key(&self, key: &String) -> bool {
        self.0.contains_key(key)
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.0.iter()
    }

    fn keys(&self) -> Self::Keys<'_> {
        self.0.keys()
    }

    fn remove(&mut self, key: &String) -> bool {
        self.0.remove(key)
    }

    fn get(&self, key: &String) -> Option<&i64> {
        self.0.get(key)
    }

    fn value(&self, key: &String) -> Result<&i64, ContractError> {
        if key == "kvp0" {
            return Err(ContractError::key_not_found(key));
        }
        self.0.value(key)
    }
}

/// Sequence that behaves like a set: duplicate adds are dropped and lookups
/// find the last match
#[derive(Default)]
struct SetLikeSequence(Vec<collection_conformance::SeedEntry>);

impl Sequence for SetLikeSequence {
    type Item = collection_conformance::SeedEntry;
    type Iter<'a> = std::slice::Iter<'a, Self::Item>;

    fn len(&self) -> usize {
        self.0.len()
    }

    fn add(&mut self, item: Self::Item) {
        if !self.0.contains(&item) {
            self.0.push(item)
        }
    }

    fn clear(&mut self) {
        self.0.clear()
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.0.iter()
    }

    fn index_of(&self, item: &Self::Item) -> Option<usize> {
        self.0.iter().rposition(|candidate| candidate == item)
    }

    fn insert(&mut self, index: usize, item: Self::Item) -> Result<(), ContractError> {
        Sequence::insert(&mut self.0, index, item)
    }

    fn remove_at(&mut self, index: usize) -> Result<Self::Item, ContractError> {
        Sequence::remove_at(&mut self.0, index)
    }

    fn get(&self, index: usize) -> Result<&Self::Item, ContractError> {
        Sequence::get(&self.0, index)
    }

    fn set(&mut self, index: usize, item: Self::Item) -> Result<Self::Item, ContractError> {
        Sequence::set(&mut self.0, index, item)
    }
}

/// Vec with only the last-match lookup fault
#[derive(Default)]
struct LastMatchSequence(Vec<collection_conformance::SeedEntry>);

impl Sequence for LastMatchSequence {
    type Item = collection_conformance::SeedEntry;
    type Iter<'a> = std::slice::Iter<'a, Self::Item>;

    fn len(&self) -> usize {
        self.0.len()
    }

    fn add(&mut self, item: Self::Item) {
        self.0.push(item)
    }

    fn clear(&mut self) {
        self.0.clear()
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.0.iter()
    }

    fn index_of(&self, item: &Self::Item) -> Option<usize> {
        self.0.iter().rposition(|candidate| candidate == item)
    }

    fn insert(&mut self, index: usize, item: Self::Item) -> Result<(), ContractError> {
        Sequence::insert(&mut self.0, index, item)
    }

    fn remove_at(&mut self, index: usize) -> Result<Self::Item, ContractError> {
        Sequence::remove_at(&mut self.0, index)
    }

    fn get(&self, index: usize) -> Result<&Self::Item, ContractError> {
        Sequence::get(&self.0, index)
    }

    fn set(&mut self, index: usize, item: Self::Item) -> Result<Self::Item, ContractError> {
        Sequence::set(&mut self.0, index, item)
    }
}

#[test]
fn test_overwriting_map_fails_duplicate_key_scenarios() {
    init_tracing();
    let runner = ConformanceRunner::new(ConformanceConfig::default());
    let report = runner.run_mapping("overwriting_map", OverwritingMap::default);

    assert!(!report.is_conformant());
    assert_eq!(
        failed_names(&report),
        vec![
            "add_duplicate_entry_is_rejected",
            "add_duplicate_key_and_value_is_rejected"
        ]
    );
    let failure = report.result("add_duplicate_entry_is_rejected").unwrap();
    assert_eq!(failure.details.get("violation").map(String::as_str), Some("missing_error"));
}

#[test]
fn test_lenient_indexer_fails_key_not_found_scenario() {
    init_tracing();
    let runner = ConformanceRunner::new(ConformanceConfig::default());
    let report = runner.run_mapping("lenient_indexer_map", LenientIndexerMap::default);

    assert_eq!(failed_names(&report), vec!["indexer_missing_key_is_key_not_found"]);
    assert_eq!(report.passed_count(), 27);
}

#[test]
fn test_blind_indexer_fails_every_indexed_read_of_the_first_key() {
    init_tracing();
    let runner = ConformanceRunner::new(ConformanceConfig::default());
    let report = runner.run_mapping("blind_indexer_map", BlindIndexerMap::default);

    assert_eq!(
        failed_names(&report),
        vec![
            "add_entry_adds_it",
            "add_key_and_value_adds_it",
            "indexer_returns_value",
        ]
    );
    let failure = report.result("add_entry_adds_it").unwrap();
    assert_eq!(failure.details.get("violation").map(String::as_str), Some("unexpected_error"));
}

#[test]
fn test_set_like_sequence_fails_duplicate_scenarios() {
    init_tracing();
    let runner = ConformanceRunner::new(ConformanceConfig::default());
    let report = runner.run_sequence("set_like_sequence", SetLikeSequence::default);

    assert_eq!(
        failed_names(&report),
        vec![
            "add_tolerates_duplicates",
            "index_of_returns_first_match",
            "remove_removes_first_match",
        ]
    );
    assert_eq!(report.passed_count(), 27);
}

#[test]
fn test_last_match_lookup_fails_first_match_scenarios() {
    init_tracing();
    let runner = ConformanceRunner::new(ConformanceConfig::default());
    let report = runner.run_sequence("last_match_sequence", LastMatchSequence::default);

    assert_eq!(
        failed_names(&report),
        vec!["index_of_returns_first_match", "remove_removes_first_match"]
    );
}

#[test]
fn test_sorted_map_fails_insertion_order_scenario() {
    init_tracing();
    let runner = ConformanceRunner::new(ConformanceConfig::default());
    let report = runner.run_mapping("sorted_map", SortedMap::default);

    assert_eq!(failed_names(&report), vec!["iteration_follows_insertion_order"]);
    let error = report
        .result("iteration_follows_insertion_order")
        .and_then(|result| result.error.as_deref())
        .unwrap();
    assert!(error.starts_with("iteration order: expected"), "{}", error);
}

#[test]
fn test_growing_sequence_fails_set_out_of_range_scenario() {
    init_tracing();
    let runner = ConformanceRunner::new(ConformanceConfig::default());
    let report = runner.run_sequence("growing_sequence", GrowingSequence::default);

    assert_eq!(failed_names(&report), vec!["set_indexer_beyond_size_is_out_of_range"]);
}

#[test]
fn test_panicking_sequence_is_reported_not_propagated() {
    init_tracing();
    let runner = ConformanceRunner::new(ConformanceConfig::default());
    let report = runner.run_sequence("panicking_sequence", PanickingSequence::default);

    let failed = failed_names(&report);
    assert_eq!(
        failed,
        vec![
            "set_indexer_beyond_size_is_out_of_range",
            "get_indexer_beyond_size_is_out_of_range",
            "remove_at_beyond_size_is_out_of_range",
            "insert_beyond_size_is_out_of_range",
        ]
    );
    for name in failed {
        let result = report.result(name).unwrap();
        assert_eq!(result.details.get("violation").map(String::as_str), Some("panicked"));
    }
}

#[test]
fn test_fail_fast_skips_remaining_scenarios() {
    init_tracing();
    let runner = ConformanceRunner::new(ConformanceConfig {
        continue_on_failure: false,
        ..Default::default()
    });
    let report = runner.run_mapping("sorted_map", SortedMap::default);

    assert_eq!(report.failed_count(), 1);
    let first_skipped = report
        .results
        .values()
        .flatten()
        .find(|result| result.status == TestStatus::Skipped)
        .unwrap();
    assert_eq!(first_skipped.name, "keys_contain_key");
    assert_eq!(first_skipped.warnings, vec!["halted after earlier failure"]);
    assert_eq!(report.passed_count() + report.failed_count() + report.skipped_count(), 28);
}

#[test]
fn test_harness_flags_non_conformant_testee() {
    init_tracing();
    let mut harness = TestHarness::new();
    harness
        .register_mapping("vec_map", VecMap::<String, i64>::new)
        .register_mapping("overwriting_map", OverwritingMap::default);

    let (all_conformant, reports) = harness.check_all_conformant();
    assert!(!all_conformant);
    assert!(reports[0].is_conformant());
    assert!(!reports[1].is_conformant());

    match harness.ensure_conformant() {
        Err(ConformanceError::NonConformant { testee, failed }) => {
            assert_eq!(testee, "overwriting_map");
            assert_eq!(failed, 2);
        }
        other => panic!("expected a non-conformant error, got {:?}", other.map(|r| r.len())),
    }
}

#[test]
#[should_panic(expected = "Testee 'sorted_map' is not conformant")]
fn test_assert_conformant_panics_with_report() {
    let mut harness = TestHarness::new();
    harness.register_mapping("sorted_map", SortedMap::default);
    harness.assert_conformant();
}

#[test]
fn test_broken_trials_fail() {
    let mut harness = TestHarness::with_config(ConformanceConfig {
        only: vec!["add_duplicate_entry_is_rejected".to_string()],
        ..Default::default()
    });
    harness.register_mapping("overwriting_map", OverwritingMap::default);

    let trials = harness.trials();
    assert_eq!(trials.len(), 1);
    assert_eq!(trials[0].name(), "overwriting_map::add_duplicate_entry_is_rejected");

    let args = libtest_mimic::Arguments {
        test_threads: Some(1),
        quiet: true,
        ..Default::default()
    };
    let conclusion = libtest_mimic::run(&args, trials);
    assert_eq!(conclusion.num_failed, 1);
    assert!(conclusion.has_failed());
}
