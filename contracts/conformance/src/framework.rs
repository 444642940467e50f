//! Conformance test framework

use crate::check::Violation;
use crate::entries::SeedEntry;
use crate::error::{ConformanceError, ConformanceResult};
use crate::mapping_tests::MappingConformance;
use crate::reports::{ConformanceReport, TestCategory, TestResult};
use crate::scenario::{Contract, Scenario};
use crate::sequence_tests::SequenceConformance;
use collection_contracts::{Mapping, Sequence};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::time::Instant;

/// Configuration for conformance testing
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConformanceConfig {
    /// Run core scenarios
    pub run_core: bool,

    /// Run behavioral scenarios
    pub run_behavioral: bool,

    /// Run error-signaling scenarios
    pub run_error_signaling: bool,

    /// When non-empty, only scenarios with these names are run
    pub only: Vec<String>,

    /// Scenarios reported as skipped instead of run
    pub skip: Vec<String>,

    /// Keep running after the first failed scenario
    pub continue_on_failure: bool,

    /// Record a panicking testee as a failed scenario
    pub catch_panics: bool,

    /// Log every scenario outcome at info level
    pub verbose: bool,
}

impl Default for ConformanceConfig {
    fn default() -> Self {
        Self {
            run_core: true,
            run_behavioral: true,
            run_error_signaling: true,
            only: Vec::new(),
            skip: Vec::new(),
            continue_on_failure: true,
            catch_panics: true,
            verbose: false,
        }
    }
}

impl ConformanceConfig {
    /// Parse a configuration from TOML
    pub fn from_toml(content: &str) -> ConformanceResult<Self> {
        toml::from_str(content).map_err(|e| ConformanceError::ConfigParse(e.to_string()))
    }

    /// Load a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> ConformanceResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> ConformanceResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Serialize the configuration as TOML
    pub fn to_toml(&self) -> ConformanceResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConformanceError::Serialize(e.to_string()))
    }

    /// Check if a category is switched on
    pub fn category_enabled(&self, category: TestCategory) -> bool {
        match category {
            TestCategory::Core => self.run_core,
            TestCategory::Behavioral => self.run_behavioral,
            TestCategory::ErrorSignaling => self.run_error_signaling,
        }
    }

    /// Whether a scenario takes part in a run at all
    pub fn selects(&self, category: TestCategory, name: &str) -> bool {
        self.category_enabled(category)
            && (self.only.is_empty() || self.only.iter().any(|only| only == name))
    }

    /// Check if a scenario is listed in `skip`
    pub fn is_skipped(&self, name: &str) -> bool {
        self.skip.iter().any(|skip| skip == name)
    }
}

/// Conformance test runner
pub struct ConformanceRunner {
    config: ConformanceConfig,
}

impl ConformanceRunner {
    /// Create a new conformance runner
    pub fn new(config: ConformanceConfig) -> Self {
        Self { config }
    }

    /// Get the runner configuration
    pub fn config(&self) -> &ConformanceConfig {
        &self.config
    }

    /// Run every sequence scenario against instances built by `factory`
    pub fn run_sequence<S, F>(&self, testee: &str, factory: F) -> ConformanceReport
    where
        S: Sequence<Item = SeedEntry>,
        F: Fn() -> S,
    {
        let scenarios = SequenceConformance::<S>::scenarios();
        self.run_scenarios(testee, Contract::Sequence, &scenarios, factory)
    }

    /// Run every mapping scenario against instances built by `factory`
    pub fn run_mapping<M, F>(&self, testee: &str, factory: F) -> ConformanceReport
    where
        M: Mapping<Key = String, Value = i64>,
        F: Fn() -> M,
    {
        let scenarios = MappingConformance::<M>::scenarios();
        self.run_scenarios(testee, Contract::Mapping, &scenarios, factory)
    }

    /// Run the selected `scenarios`, each against a fresh instance
    pub fn run_scenarios<T, F>(
        &self,
        testee: &str,
        contract: Contract,
        scenarios: &[Scenario<T>],
        factory: F,
    ) -> ConformanceReport
    where
        F: Fn() -> T,
    {
        let start = Instant::now();
        let mut report = ConformanceReport::new(testee, contract);

        tracing::info!("Starting {} conformance tests for: {}", contract, testee);

        let mut halted = false;
        for scenario in scenarios {
            if !self.config.selects(scenario.category, scenario.name) {
                continue;
            }

            let result = if self.config.is_skipped(scenario.name) {
                TestResult::skipped(scenario.name, "listed in skip")
            } else if halted {
                TestResult::skipped(scenario.name, "halted after earlier failure")
            } else {
                self.execute(testee, scenario, &factory)
            };

            if result.is_failed() && !self.config.continue_on_failure {
                halted = true;
            }
            report.add_result(scenario.category, result);
        }

        report.duration = start.elapsed();
        report.finalize();

        tracing::info!(
            "Conformance tests complete for {}: {} passed, {} failed, {} skipped",
            testee,
            report.passed_count(),
            report.failed_count(),
            report.skipped_count()
        );

        report
    }

    /// Run one scenario and turn its outcome into a [`TestResult`]
    pub fn execute<T, F>(&self, testee: &str, scenario: &Scenario<T>, factory: &F) -> TestResult
    where
        F: Fn() -> T,
    {
        let start = Instant::now();

        let outcome = if self.config.catch_panics {
            panic::catch_unwind(AssertUnwindSafe(|| scenario.run(factory())))
                .unwrap_or_else(|payload| Err(Violation::Panicked(panic_message(payload))))
        } else {
            scenario.run(factory())
        };

        let mut result = match outcome {
            Ok(()) => TestResult::passed(scenario.name, start.elapsed()),
            Err(violation) => {
                tracing::warn!(
                    testee,
                    scenario = scenario.name,
                    kind = violation.label(),
                    "{}",
                    violation
                );
                let mut result =
                    TestResult::failed(scenario.name, violation.to_string(), start.elapsed());
                result.add_detail("violation", violation.label());
                result
            }
        };

        result.add_detail("description", scenario.description);

        if self.config.verbose {
            tracing::info!(
                testee,
                scenario = scenario.name,
                status = ?result.status,
                "Scenario finished"
            );
        } else {
            tracing::debug!(
                testee,
                scenario = scenario.name,
                status = ?result.status,
                "Scenario finished"
            );
        }

        result
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::TestStatus;
    use collection_contracts::VecMap;
    use std::io::Write;

    #[test]
    fn test_config_from_partial_toml() {
        let config = ConformanceConfig::from_toml(
            r#"
            run_behavioral = false
            skip = ["add_entry_adds_it"]
            "#,
        )
        .unwrap();

        assert!(config.run_core);
        assert!(!config.run_behavioral);
        assert!(config.catch_panics);
        assert!(config.is_skipped("add_entry_adds_it"));
        assert!(!config.selects(TestCategory::Behavioral, "keys_contain_key"));
        assert!(config.selects(TestCategory::Core, "count_after_add_is_one"));
    }

    #[test]
    fn test_config_rejects_bad_toml() {
        let err = ConformanceConfig::from_toml("run_core = \"yes\"").unwrap_err();
        assert!(matches!(err, ConformanceError::ConfigParse(_)));
    }

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "only = [\"keys_contain_key\"]").unwrap();
        writeln!(file, "continue_on_failure = false").unwrap();

        let config = ConformanceConfig::from_file(file.path()).unwrap();
        assert_eq!(config.only, vec!["keys_contain_key"]);
        assert!(!config.continue_on_failure);
        assert!(config.selects(TestCategory::Behavioral, "keys_contain_key"));
        assert!(!config.selects(TestCategory::Behavioral, "indexer_returns_value"));

        let missing = ConformanceConfig::from_file(file.path().with_extension("absent"));
        assert!(matches!(missing, Err(ConformanceError::Io(_))));
    }

    #[test]
    fn test_config_toml_round_trip() {
        let config = ConformanceConfig {
            run_error_signaling: false,
            skip: vec!["remove_key_removes_it".to_string()],
            ..Default::default()
        };
        let parsed = ConformanceConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        assert_eq!(ConformanceConfig::load(None).unwrap(), ConformanceConfig::default());
    }

    #[test]
    fn test_runner_reports_every_mapping_scenario() {
        let runner = ConformanceRunner::new(ConformanceConfig::default());
        let report = runner.run_mapping("vec_map", VecMap::<String, i64>::new);

        assert!(report.is_conformant(), "{}", report.to_text());
        assert_eq!(report.summary.total, 28);
        assert_eq!(report.contract, Contract::Mapping);
    }

    #[test]
    fn test_runner_honors_category_switches() {
        let runner = ConformanceRunner::new(ConformanceConfig {
            run_core: false,
            run_behavioral: false,
            ..Default::default()
        });
        let report = runner.run_sequence("vec", Vec::<SeedEntry>::new);

        assert_eq!(report.summary.total, 4);
        assert!(report.results.contains_key(&TestCategory::ErrorSignaling));
        assert!(!report.results.contains_key(&TestCategory::Core));
    }

    #[test]
    fn test_runner_marks_skipped_scenarios() {
        let runner = ConformanceRunner::new(ConformanceConfig {
            skip: vec!["add_should_add_item".to_string()],
            ..Default::default()
        });
        let report = runner.run_sequence("vec", Vec::<SeedEntry>::new);

        let skipped = report.result("add_should_add_item").unwrap();
        assert_eq!(skipped.status, TestStatus::Skipped);
        assert_eq!(skipped.warnings, vec!["listed in skip"]);
        assert_eq!(report.skipped_count(), 1);
        assert!(report.is_conformant());
    }

    #[test]
    fn test_panics_become_failures() {
        fn explode(_: Vec<SeedEntry>) -> crate::check::CheckResult {
            panic!("boom")
        }

        let runner = ConformanceRunner::new(ConformanceConfig::default());
        let scenario = Scenario::new("explode", TestCategory::Core, "panics", explode);
        let result = runner.execute("vec", &scenario, &Vec::<SeedEntry>::new);

        assert_eq!(result.status, TestStatus::Failed);
        assert_eq!(result.error.as_deref(), Some("testee panicked: boom"));
        assert_eq!(result.details.get("violation").map(String::as_str), Some("panicked"));
    }
}
