//! Contract error types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors a collection signals as part of its contract
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
    /// A mapping already holds the key being added
    #[error("duplicate key: {key}")]
    DuplicateKey { key: String },

    /// A mapping lookup by indexer found no such key
    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    /// A position is not valid for the current length
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    /// A copy-out destination cannot hold every element from the offset
    #[error("insufficient capacity: {required} slots required, {available} available")]
    InsufficientCapacity { required: usize, available: usize },
}

impl ContractError {
    /// Duplicate-key error for any debuggable key
    pub fn duplicate_key(key: &impl fmt::Debug) -> Self {
        Self::DuplicateKey {
            key: format!("{:?}", key),
        }
    }

    /// Key-not-found error for any debuggable key
    pub fn key_not_found(key: &impl fmt::Debug) -> Self {
        Self::KeyNotFound {
            key: format!("{:?}", key),
        }
    }

    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }

    /// Checks that `count` elements fit in `dest_len` slots starting at `offset`.
    pub fn check_capacity(dest_len: usize, offset: usize, count: usize) -> Result<(), Self> {
        let available = dest_len.saturating_sub(offset);
        if offset > dest_len || available < count {
            return Err(Self::InsufficientCapacity {
                required: count,
                available,
            });
        }
        Ok(())
    }

    /// The distinguishable kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateKey { .. } => ErrorKind::DuplicateKey,
            Self::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            Self::OutOfRange { .. } => ErrorKind::OutOfRange,
            Self::InsufficientCapacity { .. } => ErrorKind::InsufficientCapacity,
        }
    }
}

/// Kind of a [`ContractError`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    DuplicateKey,
    KeyNotFound,
    OutOfRange,
    InsufficientCapacity,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::DuplicateKey => write!(f, "duplicate-key"),
            ErrorKind::KeyNotFound => write!(f, "key-not-found"),
            ErrorKind::OutOfRange => write!(f, "out-of-range"),
            ErrorKind::InsufficientCapacity => write!(f, "insufficient-capacity"),
        }
    }
}
