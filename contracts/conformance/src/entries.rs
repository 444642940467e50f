//! Deterministic test data
//!
//! Every scenario works on entries derived from an integer seed, so two
//! entries built from the same seed are equal and entries from different
//! seeds never share a key.

use collection_contracts::Entry;

/// The entry type every scenario stores
pub type SeedEntry = Entry<String, i64>;

/// Prefix of every seeded key
pub const KEY_PREFIX: &str = "kvp";

/// A key no seeded entry ever carries
pub const MISSING_KEY: &str = "INVALIDKEY";

/// Key for the given seed: `kvp<seed>`
pub fn seed_key(seed: i64) -> String {
    format!("{}{}", KEY_PREFIX, seed)
}

/// Create the entry for a seed: key `kvp<seed>`, value `seed`.
pub fn create_entry(seed: i64) -> SeedEntry {
    Entry::new(seed_key(seed), seed)
}

/// A destination buffer of `len` default entries for copy-out scenarios
pub fn copy_buffer(len: usize) -> Vec<SeedEntry> {
    vec![SeedEntry::default(); len]
}

/// Owned missing key, for lookups that must fail
pub fn missing_key() -> String {
    MISSING_KEY.to_string()
}
