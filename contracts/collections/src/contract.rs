//! Core collection contract definitions

use crate::ContractError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An immutable key/value pair
///
/// Mappings store and copy out entries; sequences may hold entries as opaque
/// equatable items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// The entry's key
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    /// Borrow the entry as a `(key, value)` pair
    pub fn as_pair(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    /// Split the entry into its key and value
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for Entry<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self { key, value }
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.key, self.value)
    }
}

/// The Sequence trait - the contract for ordered, index-addressable collections
///
/// Positions are zero-based. Membership is by value equality and tolerates
/// duplicates: operations that search by value act on the first match.
/// Writing through [`Sequence::set`] never grows the sequence; only
/// [`Sequence::add`] and [`Sequence::insert`] do.
pub trait Sequence {
    /// Element type; compared by value
    type Item: PartialEq + Clone + fmt::Debug;

    /// Single-pass iterator over the elements in positional order
    type Iter<'a>: Iterator<Item = &'a Self::Item>
    where
        Self: 'a;

    /// Number of elements currently held
    fn len(&self) -> usize;

    /// Whether the sequence holds no elements
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends an element at the end
    fn add(&mut self, item: Self::Item);

    /// Removes every element
    fn clear(&mut self);

    /// Iterates from the first position; each call starts a fresh pass
    fn iter(&self) -> Self::Iter<'_>;

    /// Position of the first element equal to `item`, or `None` when absent
    fn index_of(&self, item: &Self::Item) -> Option<usize> {
        self.iter().position(|candidate| candidate == item)
    }

    /// Whether an element equal to `item` is held
    fn contains(&self, item: &Self::Item) -> bool {
        self.index_of(item).is_some()
    }

    /// Copies every element, in positional order, into `dest` starting at `offset`
    ///
    /// The destination is never resized. If it cannot hold all elements from
    /// `offset` on, nothing is written and `InsufficientCapacity` is returned.
    fn copy_to(&self, dest: &mut [Self::Item], offset: usize) -> Result<(), ContractError> {
        ContractError::check_capacity(dest.len(), offset, self.len())?;
        for (slot, item) in dest[offset..].iter_mut().zip(self.iter()) {
            *slot = item.clone();
        }
        Ok(())
    }

    /// Places `item` at `index`, shifting later elements to higher positions
    ///
    /// `index == len()` appends. Anything beyond is `OutOfRange`.
    fn insert(&mut self, index: usize, item: Self::Item) -> Result<(), ContractError>;

    /// Removes the first element equal to `item`; returns whether one was removed
    fn remove(&mut self, item: &Self::Item) -> bool {
        match self.index_of(item) {
            Some(index) => self.remove_at(index).is_ok(),
            None => false,
        }
    }

    /// Removes and returns the element at `index`, shifting later elements down
    fn remove_at(&mut self, index: usize) -> Result<Self::Item, ContractError>;

    /// Element at `index`
    fn get(&self, index: usize) -> Result<&Self::Item, ContractError>;

    /// Replaces the element at an existing position and returns the old one
    ///
    /// Setting at or beyond `len()` is `OutOfRange`; the sequence does not grow.
    fn set(&mut self, index: usize, item: Self::Item) -> Result<Self::Item, ContractError>;
}

/// The Mapping trait - the contract for key-unique, insertion-ordered collections
///
/// Iteration, [`Mapping::keys`] and [`Mapping::copy_to`] all observe entries
/// in insertion order. Adding an existing key is rejected rather than
/// overwriting, and the indexer lookup [`Mapping::value`] fails for a missing
/// key while [`Mapping::try_get_value`] reports absence without failing.
pub trait Mapping {
    type Key: Eq + Clone + fmt::Debug;
    type Value: PartialEq + Clone + Default + fmt::Debug;

    /// Iterator over `(key, value)` pairs in insertion order
    type Iter<'a>: Iterator<Item = (&'a Self::Key, &'a Self::Value)>
    where
        Self: 'a;

    /// View over the keys in insertion order
    type Keys<'a>: ExactSizeIterator<Item = &'a Self::Key> + DoubleEndedIterator
    where
        Self: 'a;

    /// Number of entries
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts a new key; an existing key is `DuplicateKey` and leaves the mapping unchanged
    fn add(&mut self, key: Self::Key, value: Self::Value) -> Result<(), ContractError>;

    /// Entry form of [`Mapping::add`]
    fn add_entry(&mut self, entry: Entry<Self::Key, Self::Value>) -> Result<(), ContractError> {
        let (key, value) = entry.into_pair();
        self.add(key, value)
    }

    /// Removes every entry
    fn clear(&mut self);

    /// Whether `key` is present, regardless of its value
    fn contains_key(&self, key: &Self::Key) -> bool;

    /// Whether an entry with an equal key and an equal value is present
    fn contains(&self, entry: &Entry<Self::Key, Self::Value>) -> bool {
        self.get(entry.key()) == Some(entry.value())
    }

    /// Copies every entry, in insertion order, into `dest` starting at `offset`
    fn copy_to(
        &self,
        dest: &mut [Entry<Self::Key, Self::Value>],
        offset: usize,
    ) -> Result<(), ContractError> {
        ContractError::check_capacity(dest.len(), offset, self.len())?;
        for (slot, (key, value)) in dest[offset..].iter_mut().zip(self.iter()) {
            *slot = Entry::new(key.clone(), value.clone());
        }
        Ok(())
    }

    fn iter(&self) -> Self::Iter<'_>;

    fn keys(&self) -> Self::Keys<'_>;

    /// Removes the entry for `key`; returns whether one was removed
    fn remove(&mut self, key: &Self::Key) -> bool;

    /// Removes `entry` only if both key and value match
    fn remove_entry(&mut self, entry: &Entry<Self::Key, Self::Value>) -> bool {
        if self.contains(entry) {
            self.remove(entry.key())
        } else {
            false
        }
    }

    /// Value for `key`, if present
    fn get(&self, key: &Self::Key) -> Option<&Self::Value>;

    /// `(true, value)` when present, `(false, Value::default())` when absent
    fn try_get_value(&self, key: &Self::Key) -> (bool, Self::Value) {
        match self.get(key) {
            Some(value) => (true, value.clone()),
            None => (false, Self::Value::default()),
        }
    }

    /// Indexer lookup: value for an existing key, `KeyNotFound` otherwise
    fn value(&self, key: &Self::Key) -> Result<&Self::Value, ContractError> {
        self.get(key)
            .ok_or_else(|| ContractError::key_not_found(key))
    }
}
