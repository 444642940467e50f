//! Collection Contracts
//!
//! This crate defines the formal interfaces that collection implementations
//! must satisfy to be checked by the conformance suite. Two capability sets
//! are defined:
//!
//! - [`Sequence`]: ordered, index-addressable, mutable collections with
//!   duplicate-tolerant membership
//! - [`Mapping`]: key-unique, insertion-ordered key/value collections with
//!   entry-based and key-based mutation and lookup
//!
//! Failure conditions that belong to the contract (duplicate key, missing
//! key, out-of-range position) are reported as distinct [`ErrorKind`]s so
//! callers can assert on the exact kind of failure.
//!
//! The crate also ships the implementations the suite is exercised against:
//! `Vec<T>` and `VecDeque<T>` implement [`Sequence`], while [`VecMap`] and
//! [`IndexedMap`] are insertion-ordered [`Mapping`]s.

pub mod contract;
pub mod error;
pub mod maps;
pub mod sequences;

pub use contract::{Entry, Mapping, Sequence};
pub use error::{ContractError, ErrorKind};
pub use maps::{IndexedMap, VecMap};
