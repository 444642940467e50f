//! Collection Contract Conformance Test Suite
//!
//! This crate provides a test framework to validate that collection
//! implementations correctly satisfy the [`Sequence`] and [`Mapping`]
//! contracts defined in `collection-contracts`.
//!
//! A testee is supplied as a factory producing a fresh, empty instance. Every
//! scenario gets its own instance, so scenarios never share state.
//!
//! # Scenario Categories
//!
//! - **Core**: count, add, clear and membership
//! - **Behavioral**: positional semantics, copy-out, iteration, keys,
//!   removal and lookup
//! - **Error Signaling**: the failures the contracts require to be signaled
//!   as distinct kinds (duplicate key, key not found, out of range)
//!
//! # Example
//!
//! ```rust,ignore
//! use collection_conformance::{ConformanceConfig, TestHarness};
//! use collection_contracts::VecMap;
//!
//! let mut harness = TestHarness::with_config(ConformanceConfig::default());
//! harness.register_sequence("vec", Vec::new);
//! harness.register_mapping("vec_map", VecMap::new);
//! for report in harness.run_all() {
//!     println!("{}", report.to_text());
//! }
//! ```
//!
//! [`Sequence`]: collection_contracts::Sequence
//! [`Mapping`]: collection_contracts::Mapping

pub mod check;
pub mod entries;
pub mod error;
pub mod framework;
pub mod harness;
pub mod reports;
pub mod scenario;

pub use check::{CheckResult, Violation};
pub use entries::{create_entry, SeedEntry};
pub use error::{ConformanceError, ConformanceResult};
pub use framework::{ConformanceConfig, ConformanceRunner};
pub use harness::TestHarness;
pub use mapping_tests::MappingConformance;
pub use reports::{ConformanceReport, ReportSummary, TestCategory, TestResult, TestStatus};
pub use scenario::{Contract, Scenario};
pub use sequence_tests::SequenceConformance;
