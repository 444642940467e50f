//! Scenario assertions
//!
//! Scenarios return [`CheckResult`] instead of panicking, so a broken testee
//! produces a readable [`Violation`] and the runner can keep going.

use collection_contracts::{ContractError, ErrorKind};
use std::fmt::Debug;

/// A broken contract obligation observed by a scenario
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Violation {
    #[error("{what}: expected {expected}, got {actual}")]
    Mismatch {
        what: String,
        expected: String,
        actual: String,
    },

    #[error("{what}")]
    Unsatisfied { what: String },

    #[error("{what}: expected {expected} error, got {actual} error")]
    WrongError {
        what: String,
        expected: ErrorKind,
        actual: ErrorKind,
    },

    #[error("{what}: expected {expected} error, but the operation succeeded")]
    MissingError { what: String, expected: ErrorKind },

    #[error("{what}: unexpected error: {error}")]
    UnexpectedError { what: String, error: ContractError },

    #[error("testee panicked: {0}")]
    Panicked(String),
}

impl Violation {
    /// Short machine-readable label, recorded in report details
    pub fn label(&self) -> &'static str {
        match self {
            Violation::Mismatch { .. } => "mismatch",
            Violation::Unsatisfied { .. } => "unsatisfied",
            Violation::WrongError { .. } => "wrong_error",
            Violation::MissingError { .. } => "missing_error",
            Violation::UnexpectedError { .. } => "unexpected_error",
            Violation::Panicked(_) => "panicked",
        }
    }
}

pub type CheckResult = Result<(), Violation>;

/// Fail with `what` unless `condition` holds.
pub fn ensure(condition: bool, what: impl Into<String>) -> CheckResult {
    if condition {
        Ok(())
    } else {
        Err(Violation::Unsatisfied { what: what.into() })
    }
}

/// Fail unless `actual == expected`.
pub fn ensure_eq<T: PartialEq + Debug>(actual: T, expected: T, what: &str) -> CheckResult {
    if actual == expected {
        Ok(())
    } else {
        Err(Violation::Mismatch {
            what: what.to_string(),
            expected: format!("{:?}", expected),
            actual: format!("{:?}", actual),
        })
    }
}

/// Unwrap a contract result that must succeed.
pub fn expect_ok<T>(result: Result<T, ContractError>, what: &str) -> Result<T, Violation> {
    result.map_err(|error| Violation::UnexpectedError {
        what: what.to_string(),
        error,
    })
}

/// Fail unless `result` is an error of the `expected` kind.
pub fn expect_error<T>(
    result: Result<T, ContractError>,
    expected: ErrorKind,
    what: &str,
) -> CheckResult {
    match result {
        Ok(_) => Err(Violation::MissingError {
            what: what.to_string(),
            expected,
        }),
        Err(error) if error.kind() == expected => Ok(()),
        Err(error) => Err(Violation::WrongError {
            what: what.to_string(),
            expected,
            actual: error.kind(),
        }),
    }
}
