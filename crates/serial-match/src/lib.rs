//! Fuzzy matching for unmatched serials.
//!
//! For every missing (or extra) serial this crate finds the closest serial in
//! the opposing collection, scores it, and classifies it against configurable
//! thresholds.
//!
//! # Example
//!
//! ```
//! use serial_match::FuzzyClassifier;
//! use serial_model::{ClassificationOptions, MatchStatus, SerialCollection, SerialKey, Side};
//!
//! let measured: SerialCollection = [SerialKey::from_normalized("B72AE6F13D")]
//!     .into_iter()
//!     .collect();
//! let classifier = FuzzyClassifier::new(&ClassificationOptions::default());
//! let detail = classifier.classify(
//!     &SerialKey::from_normalized("B72AE6F13C"),
//!     Side::Reference,
//!     &measured,
//! );
//! assert_eq!(detail.status, MatchStatus::PotentialMatch);
//! ```

#![deny(unsafe_code)]

mod classify;
mod diff;
mod progress;
mod similarity;

pub use classify::{Candidate, FuzzyClassifier};
pub use diff::{char_differences, diff, diff_pattern};
pub use progress::{NoProgress, ProgressCounter, ProgressSink};
pub use similarity::{
    MatchingBlock, indel_ratio, length_bound, matching_blocks, matching_blocks_ratio, similarity,
};
