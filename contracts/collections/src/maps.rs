//! Insertion-ordered mappings
//!
//! [`VecMap`] keeps entries in a vector and finds keys by linear scan.
//! [`IndexedMap`] keeps the same entry vector plus a hash index from key to
//! position. Both preserve insertion order across removals.

use crate::{ContractError, Entry, Mapping};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::slice;

/// Iterator over the entries of an insertion-ordered map
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    inner: slice::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Entry::as_pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(Entry::as_pair)
    }
}

/// Keys of an insertion-ordered map
#[derive(Debug, Clone)]
pub struct Keys<'a, K, V> {
    inner: slice::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Entry::key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(Entry::key)
    }
}

/// Insertion-ordered map backed by a vector of entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VecMap<K, V> {
    entries: Vec<Entry<K, V>>,
}

impl<K, V> VecMap<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }
}

impl<K: Eq, V> VecMap<K, V> {
    fn position(&self, key: &K) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key() == key)
    }
}

impl<K, V> Default for VecMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Mapping for VecMap<K, V>
where
    K: Eq + Clone + fmt::Debug,
    V: PartialEq + Clone + Default + fmt::Debug,
{
    type Key = K;
    type Value = V;
    type Iter<'a>
        = Iter<'a, K, V>
    where
        Self: 'a;
    type Keys<'a>
        = Keys<'a, K, V>
    where
        Self: 'a;

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn add(&mut self, key: K, value: V) -> Result<(), ContractError> {
        if self.position(&key).is_some() {
            return Err(ContractError::duplicate_key(&key));
        }
        self.entries.push(Entry::new(key, value));
        Ok(())
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn contains_key(&self, key: &K) -> bool {
        self.position(key).is_some()
    }

    fn iter(&self) -> Self::Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    fn keys(&self) -> Self::Keys<'_> {
        Keys {
            inner: self.entries.iter(),
        }
    }

    fn remove(&mut self, key: &K) -> bool {
        match self.position(key) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.position(key).map(|index| self.entries[index].value())
    }
}

/// Insertion-ordered map with a hash index from key to entry position
#[derive(Debug, Clone)]
pub struct IndexedMap<K, V> {
    entries: Vec<Entry<K, V>>,
    index: HashMap<K, usize>,
}

impl<K, V> IndexedMap<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Hash + Eq, V> IndexedMap<K, V> {
    // Positions after a removed entry shift down by one.
    fn reindex_from(&mut self, start: usize) {
        for (position, entry) in self.entries.iter().enumerate().skip(start) {
            if let Some(slot) = self.index.get_mut(entry.key()) {
                *slot = position;
            }
        }
    }
}

impl<K, V> Default for IndexedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Mapping for IndexedMap<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: PartialEq + Clone + Default + fmt::Debug,
{
    type Key = K;
    type Value = V;
    type Iter<'a>
        = Iter<'a, K, V>
    where
        Self: 'a;
    type Keys<'a>
        = Keys<'a, K, V>
    where
        Self: 'a;

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn add(&mut self, key: K, value: V) -> Result<(), ContractError> {
        if self.index.contains_key(&key) {
            return Err(ContractError::duplicate_key(&key));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(Entry::new(key, value));
        Ok(())
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn iter(&self) -> Self::Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    fn keys(&self) -> Self::Keys<'_> {
        Keys {
            inner: self.entries.iter(),
        }
    }

    fn remove(&mut self, key: &K) -> bool {
        match self.index.remove(key) {
            Some(position) => {
                self.entries.remove(position);
                self.reindex_from(position);
                true
            }
            None => false,
        }
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.index
            .get(key)
            .map(|&position| self.entries[position].value())
    }
}
