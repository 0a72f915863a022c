//! Canonical serial keys from raw fields.
//!
//! Policy: all whitespace is removed (not only at the ends), the value is
//! uppercased, anything from the first comma on is dropped, and the result is
//! cut to `max_length` characters. Values shorter than `min_length` are
//! returned as they are but never enter a collection.

use std::collections::BTreeSet;

use serial_model::{CollectionStats, NormalizationOptions, SerialCollection, SerialKey};
use tracing::debug;

/// Normalizes raw values with explicit options.
#[derive(Debug, Clone)]
pub struct Normalizer {
    max_length: usize,
    min_length: usize,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&NormalizationOptions::default())
    }
}

impl Normalizer {
    pub fn new(options: &NormalizationOptions) -> Self {
        Self {
            max_length: options.max_length,
            min_length: options.min_length,
        }
    }

    /// Canonical key for one raw value. Never fails; may return an empty key.
    pub fn normalize(&self, raw: &str) -> SerialKey {
        let compact: String = raw.chars().filter(|ch| !ch.is_whitespace()).collect();
        let upper = compact.to_uppercase();
        let head = upper.split(',').next().unwrap_or_default();
        SerialKey::from_normalized(head.chars().take(self.max_length).collect::<String>())
    }

    /// Like [`Self::normalize`], with null mapping to the empty key.
    pub fn normalize_value(&self, raw: Option<&str>) -> SerialKey {
        raw.map(|value| self.normalize(value)).unwrap_or_else(|| SerialKey::from_normalized(""))
    }

    /// True if a key is long enough to be kept in a collection.
    pub fn accepts(&self, key: &SerialKey) -> bool {
        !key.is_empty() && key.char_len() >= self.min_length
    }

    /// Normalizes raw values into a collection, recording what was dropped.
    pub fn collect<'a, I>(&self, values: I) -> SerialCollection
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut keys = BTreeSet::new();
        let mut stats = CollectionStats::default();
        for raw in values {
            stats.raw_values += 1;
            let key = self.normalize_value(raw);
            if key.is_empty() {
                stats.blank += 1;
                continue;
            }
            if !self.accepts(&key) {
                debug!(key = %key, min_length = self.min_length, "discarding short serial");
                stats.too_short += 1;
                continue;
            }
            if !keys.insert(key) {
                stats.duplicates += 1;
            }
        }
        SerialCollection::with_stats(keys, stats)
    }
}

/// Normalizes with the default options.
pub fn normalize(raw: &str) -> SerialKey {
    Normalizer::default().normalize(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_case_and_whitespace() {
        assert_eq!(normalize(" abc123 ").as_str(), "ABC123");
        assert_eq!(normalize("abc123"), normalize(" ABC123 "));
    }

    #[test]
    fn removes_internal_whitespace() {
        assert_eq!(normalize("B72 AE6\tF13C").as_str(), "B72AE6F13C");
    }

    #[test]
    fn drops_comma_suffix() {
        assert_eq!(normalize("A1234567BC,EXTRA").as_str(), "A1234567BC");
        assert_eq!(normalize(" a1234567bc , extra ").as_str(), "A1234567BC");
    }

    #[test]
    fn truncates_to_ten_characters() {
        assert_eq!(normalize("B72AE6F13CXYZ").as_str(), "B72AE6F13C");
    }

    #[test]
    fn short_values_are_kept_untruncated() {
        assert_eq!(normalize("ab12").as_str(), "AB12");
    }

    #[test]
    fn blank_and_null_become_empty() {
        let normalizer = Normalizer::default();
        assert!(normalizer.normalize("   ").is_empty());
        assert!(normalizer.normalize(",A1234567BC").is_empty());
        assert!(normalizer.normalize_value(None).is_empty());
    }

    #[test]
    fn collect_discards_noise_and_counts_it() {
        let normalizer = Normalizer::default();
        let collection = normalizer.collect([
            Some("B72AE6F13C"),
            Some("b72ae6f13c "),
            Some("SHORT"),
            None,
            Some(""),
            Some("SYC12281P0,2024-01-01"),
        ]);
        let keys: Vec<&str> = collection.iter().map(SerialKey::as_str).collect();
        assert_eq!(keys, vec!["B72AE6F13C", "SYC12281P0"]);
        let stats = collection.stats();
        assert_eq!(stats.raw_values, 6);
        assert_eq!(stats.blank, 2);
        assert_eq!(stats.too_short, 1);
        assert_eq!(stats.duplicates, 1);
    }

    #[test]
    fn custom_lengths_apply() {
        let normalizer = Normalizer::new(&NormalizationOptions {
            max_length: 4,
            min_length: 2,
        });
        assert_eq!(normalizer.normalize("abcdefgh").as_str(), "ABCD");
        assert!(normalizer.accepts(&normalizer.normalize("ab")));
        assert!(!normalizer.accepts(&normalizer.normalize("a")));
    }
}
