//! Named conformance scenarios

use crate::check::CheckResult;
use crate::reports::TestCategory;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The contract a testee is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Contract {
    Sequence,
    Mapping,
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contract::Sequence => write!(f, "Sequence"),
            Contract::Mapping => write!(f, "Mapping"),
        }
    }
}

/// One self-contained check run against a fresh testee of type `T`
///
/// The testee is handed over by value, so a scenario can never observe state
/// left behind by another one.
pub struct Scenario<T> {
    pub name: &'static str,
    pub category: TestCategory,
    pub description: &'static str,
    check: fn(T) -> CheckResult,
}

impl<T> Scenario<T> {
    pub const fn new(
        name: &'static str,
        category: TestCategory,
        description: &'static str,
        check: fn(T) -> CheckResult,
    ) -> Self {
        Self {
            name,
            category,
            description,
            check,
        }
    }

    /// Run the scenario against `testee`.
    pub fn run(&self, testee: T) -> CheckResult {
        (self.check)(testee)
    }
}

// Manual impls: the derives would demand `T: Clone` / `T: Debug`.
impl<T> Clone for Scenario<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Scenario<T> {}

impl<T> fmt::Debug for Scenario<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("description", &self.description)
            .finish()
    }
}
