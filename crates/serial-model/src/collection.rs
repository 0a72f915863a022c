//! Unique serial sets attributed to one input.

use std::collections::BTreeSet;
use std::collections::btree_set;

use serde::{Deserialize, Serialize};

use crate::ids::SerialKey;

/// Bookkeeping gathered while a collection is built from raw values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStats {
    /// Raw values offered to the collection (including blanks).
    pub raw_values: usize,
    /// Values that were null, empty, or whitespace only.
    pub blank: usize,
    /// Keys discarded for being shorter than the minimum length.
    pub too_short: usize,
    /// Keys that collapsed into an already present serial.
    pub duplicates: usize,
}

/// A set of unique serials; iteration is always in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerialCollection {
    keys: BTreeSet<SerialKey>,
    stats: CollectionStats,
}

impl SerialCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stats(keys: BTreeSet<SerialKey>, stats: CollectionStats) -> Self {
        let keys = keys.into_iter().filter(|key| !key.is_empty()).collect();
        Self { keys, stats }
    }

    /// Inserts a key. Empty keys are never stored.
    ///
    /// Returns `true` when the key was not already present.
    pub fn insert(&mut self, key: SerialKey) -> bool {
        if key.is_empty() {
            return false;
        }
        self.keys.insert(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, SerialKey> {
        self.keys.iter()
    }

    pub fn keys(&self) -> &BTreeSet<SerialKey> {
        &self.keys
    }

    pub fn stats(&self) -> &CollectionStats {
        &self.stats
    }
}

impl FromIterator<SerialKey> for SerialCollection {
    fn from_iter<I: IntoIterator<Item = SerialKey>>(iter: I) -> Self {
        let mut collection = Self::new();
        for key in iter {
            collection.stats.raw_values += 1;
            if key.is_empty() {
                collection.stats.blank += 1;
            } else if !collection.insert(key) {
                collection.stats.duplicates += 1;
            }
        }
        collection
    }
}

impl<'a> IntoIterator for &'a SerialCollection {
    type Item = &'a SerialKey;
    type IntoIter = btree_set::Iter<'a, SerialKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
