//! Conformance test reporting

use crate::scenario::Contract;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Test status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
}

/// Test category
///
/// Ordered so reports list core scenarios first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TestCategory {
    Core,
    Behavioral,
    ErrorSignaling,
}

impl std::fmt::Display for TestCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestCategory::Core => write!(f, "Core"),
            TestCategory::Behavioral => write!(f, "Behavioral"),
            TestCategory::ErrorSignaling => write!(f, "Error-Signaling"),
        }
    }
}

/// Outcome of one scenario against one testee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub status: TestStatus,
    pub duration: Duration,
    pub error: Option<String>,
    pub warnings: Vec<String>,
    pub details: HashMap<String, String>,
}

impl TestResult {
    /// Create a passed test result
    pub fn passed(name: impl Into<String>, duration: Duration) -> Self {
        Self::with_status(name, TestStatus::Passed, duration)
    }

    /// Create a failed test result
    pub fn failed(name: impl Into<String>, error: impl Into<String>, duration: Duration) -> Self {
        let mut result = Self::with_status(name, TestStatus::Failed, duration);
        result.error = Some(error.into());
        result
    }

    /// A scenario that was selected out or never reached; the reason is kept
    /// as a warning.
    pub fn skipped(name: impl Into<String>, reason: impl Into<String>) -> Self {
        let mut result = Self::with_status(name, TestStatus::Skipped, Duration::ZERO);
        result.add_warning(reason);
        result
    }

    fn with_status(name: impl Into<String>, status: TestStatus, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status,
            duration,
            error: None,
            warnings: Vec::new(),
            details: HashMap::new(),
        }
    }

    /// Add a warning to the result
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Add a detail to the result
    pub fn add_detail(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.details.insert(key.into(), value.into());
    }

    /// Whether the scenario ran and failed
    pub fn is_failed(&self) -> bool {
        self.status == TestStatus::Failed
    }
}

/// Report summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub conformant: bool,
}

/// Conformance report for a single testee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    pub testee: String,
    pub contract: Contract,
    pub timestamp: DateTime<Utc>,
    pub duration: Duration,
    pub results: BTreeMap<TestCategory, Vec<TestResult>>,
    pub summary: ReportSummary,
}

impl ConformanceReport {
    /// Create a new report
    pub fn new(testee: impl Into<String>, contract: Contract) -> Self {
        Self {
            testee: testee.into(),
            contract,
            timestamp: Utc::now(),
            duration: Duration::ZERO,
            results: BTreeMap::new(),
            summary: ReportSummary::default(),
        }
    }

    /// Append one result to its category, keeping scenario order.
    pub fn add_result(&mut self, category: TestCategory, result: TestResult) {
        self.results.entry(category).or_default().push(result);
    }

    /// Append results for a category
    pub fn add_results(&mut self, category: TestCategory, results: Vec<TestResult>) {
        self.results.entry(category).or_default().extend(results);
    }

    /// Finalize the report and compute summary
    pub fn finalize(&mut self) {
        let mut summary = ReportSummary::default();

        for result in self.results.values().flatten() {
            summary.total += 1;
            match result.status {
                TestStatus::Passed => summary.passed += 1,
                TestStatus::Failed => summary.failed += 1,
                TestStatus::Skipped => summary.skipped += 1,
            }
        }

        summary.conformant = summary.failed == 0;
        self.summary = summary;
    }

    /// Get passed count
    pub fn passed_count(&self) -> usize {
        self.summary.passed
    }

    /// Get failed count
    pub fn failed_count(&self) -> usize {
        self.summary.failed
    }

    /// Get skipped count
    pub fn skipped_count(&self) -> usize {
        self.summary.skipped
    }

    /// Check if conformant
    pub fn is_conformant(&self) -> bool {
        self.summary.conformant
    }

    /// Failed results in report order
    pub fn failures(&self) -> Vec<&TestResult> {
        self.results
            .values()
            .flatten()
            .filter(|result| result.is_failed())
            .collect()
    }

    /// Look up a result by scenario name
    pub fn result(&self, name: &str) -> Option<&TestResult> {
        self.results
            .values()
            .flatten()
            .find(|result| result.name == name)
    }

    /// Generate a text report
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str("╔════════════════════════════════════════════════════════════╗\n");
        output.push_str("║  Collection Contract Conformance Report                    ║\n");
        output.push_str("╠════════════════════════════════════════════════════════════╣\n");
        output.push_str(&format!("║  Testee: {:<49} ║\n", self.testee));
        output.push_str(&format!("║  Contract: {:<47} ║\n", self.contract));
        output.push_str(&format!(
            "║  Timestamp: {:<46} ║\n",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str(&format!(
            "║  Duration: {:<47} ║\n",
            format!("{:?}", self.duration)
        ));
        output.push_str("╠════════════════════════════════════════════════════════════╣\n");

        for (category, results) in &self.results {
            output.push_str(&format!("║  {} Scenarios:\n", category));
            output.push_str("╟────────────────────────────────────────────────────────────╢\n");

            for result in results {
                let status_icon = match result.status {
                    TestStatus::Passed => "✓",
                    TestStatus::Failed => "✗",
                    TestStatus::Skipped => "○",
                };

                output.push_str(&format!(
                    "║  {} {:<45} {:>8?}\n",
                    status_icon, result.name, result.duration
                ));

                if let Some(error) = &result.error {
                    output.push_str(&format!("║      Error: {}\n", error));
                }

                for warning in &result.warnings {
                    output.push_str(&format!("║      Note: {}\n", warning));
                }
            }

            output.push_str("╟────────────────────────────────────────────────────────────╢\n");
        }

        output.push_str("╠════════════════════════════════════════════════════════════╣\n");
        output.push_str("║  Summary:                                                  ║\n");
        output.push_str(&format!(
            "║    Total: {:<5}  Passed: {:<5}  Failed: {:<5}  Skipped: {:<3} ║\n",
            self.summary.total, self.summary.passed, self.summary.failed, self.summary.skipped
        ));
        output.push_str("║                                                            ║\n");

        if self.summary.conformant {
            output.push_str("║  Result: ✓ CONFORMANT                                      ║\n");
        } else {
            output.push_str("║  Result: ✗ NON-CONFORMANT                                  ║\n");
        }

        output.push_str("╚════════════════════════════════════════════════════════════╝\n");

        output
    }

    /// Generate JSON report
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
