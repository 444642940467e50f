//! Test harness for running conformance tests
//!
//! Testees are registered by name together with a factory. The harness can
//! then produce reports for all of them, or expose every selected scenario
//! as a `libtest-mimic` trial named `<testee>::<scenario>`.

use crate::entries::SeedEntry;
use crate::error::{ConformanceError, ConformanceResult};
use crate::mapping_tests::MappingConformance;
use crate::reports::ConformanceReport;
use crate::scenario::{Contract, Scenario};
use crate::sequence_tests::SequenceConformance;
use crate::{ConformanceConfig, ConformanceRunner};
use collection_contracts::{IndexedMap, Mapping, Sequence, VecMap};
use libtest_mimic::{Failed, Trial};
use std::collections::VecDeque;
use std::marker::PhantomData;
use std::sync::Arc;

/// A registered testee, with its contract and factory erased
trait Suite: Send + Sync {
    fn testee(&self) -> &str;
    fn contract(&self) -> Contract;
    fn run(&self, runner: &ConformanceRunner) -> ConformanceReport;
    fn trials(&self, config: &ConformanceConfig) -> Vec<Trial>;
}

struct SequenceSuite<S, F> {
    testee: String,
    factory: Arc<F>,
    _testee: PhantomData<fn() -> S>,
}

impl<S, F> Suite for SequenceSuite<S, F>
where
    S: Sequence<Item = SeedEntry> + 'static,
    F: Fn() -> S + Send + Sync + 'static,
{
    fn testee(&self) -> &str {
        &self.testee
    }

    fn contract(&self) -> Contract {
        Contract::Sequence
    }

    fn run(&self, runner: &ConformanceRunner) -> ConformanceReport {
        runner.run_sequence(&self.testee, &*self.factory)
    }

    fn trials(&self, config: &ConformanceConfig) -> Vec<Trial> {
        scenario_trials(
            &self.testee,
            SequenceConformance::<S>::scenarios(),
            &self.factory,
            config,
        )
    }
}

struct MappingSuite<M, F> {
    testee: String,
    factory: Arc<F>,
    _testee: PhantomData<fn() -> M>,
}

impl<M, F> Suite for MappingSuite<M, F>
where
    M: Mapping<Key = String, Value = i64> + 'static,
    F: Fn() -> M + Send + Sync + 'static,
{
    fn testee(&self) -> &str {
        &self.testee
    }

    fn contract(&self) -> Contract {
        Contract::Mapping
    }

    fn run(&self, runner: &ConformanceRunner) -> ConformanceReport {
        runner.run_mapping(&self.testee, &*self.factory)
    }

    fn trials(&self, config: &ConformanceConfig) -> Vec<Trial> {
        scenario_trials(
            &self.testee,
            MappingConformance::<M>::scenarios(),
            &self.factory,
            config,
        )
    }
}

fn scenario_trials<T, F>(
    testee: &str,
    scenarios: Vec<Scenario<T>>,
    factory: &Arc<F>,
    config: &ConformanceConfig,
) -> Vec<Trial>
where
    T: 'static,
    F: Fn() -> T + Send + Sync + 'static,
{
    scenarios
        .into_iter()
        .filter(|scenario| config.selects(scenario.category, scenario.name))
        .map(|scenario| {
            let factory = Arc::clone(factory);
            let ignored = config.is_skipped(scenario.name);
            Trial::test(format!("{}::{}", testee, scenario.name), move || {
                scenario
                    .run(factory())
                    .map_err(|violation| Failed::from(violation.to_string()))
            })
            .with_kind(scenario.category.to_string())
            .with_ignored_flag(ignored)
        })
        .collect()
}

/// Test harness for conformance testing
pub struct TestHarness {
    runner: ConformanceRunner,
    suites: Vec<Box<dyn Suite>>,
}

impl TestHarness {
    /// Create a new test harness with default configuration
    pub fn new() -> Self {
        Self::with_config(ConformanceConfig::default())
    }

    /// Create a test harness with custom configuration
    pub fn with_config(config: ConformanceConfig) -> Self {
        Self {
            runner: ConformanceRunner::new(config),
            suites: Vec::new(),
        }
    }

    /// Get the harness configuration
    pub fn config(&self) -> &ConformanceConfig {
        self.runner.config()
    }

    /// Register a sequence testee; `factory` must return an empty instance.
    pub fn register_sequence<S, F>(&mut self, testee: impl Into<String>, factory: F) -> &mut Self
    where
        S: Sequence<Item = SeedEntry> + 'static,
        F: Fn() -> S + Send + Sync + 'static,
    {
        self.suites.push(Box::new(SequenceSuite {
            testee: testee.into(),
            factory: Arc::new(factory),
            _testee: PhantomData,
        }));
        self
    }

    /// Register a mapping testee; `factory` must return an empty instance.
    pub fn register_mapping<M, F>(&mut self, testee: impl Into<String>, factory: F) -> &mut Self
    where
        M: Mapping<Key = String, Value = i64> + 'static,
        F: Fn() -> M + Send + Sync + 'static,
    {
        self.suites.push(Box::new(MappingSuite {
            testee: testee.into(),
            factory: Arc::new(factory),
            _testee: PhantomData,
        }));
        self
    }

    /// Register the implementations shipped with `collection-contracts`
    pub fn register_reference_testees(&mut self) -> &mut Self {
        self.register_sequence("vec", Vec::<SeedEntry>::new)
            .register_sequence("vec_deque", VecDeque::<SeedEntry>::new)
            .register_mapping("vec_map", VecMap::<String, i64>::new)
            .register_mapping("indexed_map", IndexedMap::<String, i64>::new)
    }

    /// Registered testee names with their contracts, in registration order
    pub fn testees(&self) -> Vec<(&str, Contract)> {
        self.suites
            .iter()
            .map(|suite| (suite.testee(), suite.contract()))
            .collect()
    }

    /// Run every registered testee
    pub fn run_all(&self) -> Vec<ConformanceReport> {
        self.suites
            .iter()
            .map(|suite| suite.run(&self.runner))
            .collect()
    }

    /// Run the named testees, or all of them when `names` is empty
    pub fn run_testees(&self, names: &[String]) -> ConformanceResult<Vec<ConformanceReport>> {
        if let Some(unknown) = names
            .iter()
            .find(|name| !self.suites.iter().any(|suite| suite.testee() == name.as_str()))
        {
            return Err(ConformanceError::UnknownTestee(unknown.clone()));
        }

        Ok(self
            .suites
            .iter()
            .filter(|suite| names.is_empty() || names.iter().any(|name| name == suite.testee()))
            .map(|suite| suite.run(&self.runner))
            .collect())
    }

    /// Run tests and return whether all passed
    pub fn check_all_conformant(&self) -> (bool, Vec<ConformanceReport>) {
        let reports = self.run_all();
        let all_conformant = reports.iter().all(|r| r.is_conformant());
        (all_conformant, reports)
    }

    /// Run every testee and fail on the first non-conformant report
    pub fn ensure_conformant(&self) -> ConformanceResult<Vec<ConformanceReport>> {
        let reports = self.run_all();
        if let Some(report) = reports.iter().find(|r| !r.is_conformant()) {
            return Err(ConformanceError::NonConformant {
                testee: report.testee.clone(),
                failed: report.failed_count(),
            });
        }
        Ok(reports)
    }

    /// Run tests and assert conformance
    pub fn assert_conformant(&self) {
        for report in self.run_all() {
            if !report.is_conformant() {
                panic!(
                    "Testee '{}' is not conformant:\n{}",
                    report.testee,
                    report.to_text()
                );
            }
        }
    }

    /// One trial per selected scenario and registered testee
    pub fn trials(&self) -> Vec<Trial> {
        self.suites
            .iter()
            .flat_map(|suite| suite.trials(self.config()))
            .collect()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
