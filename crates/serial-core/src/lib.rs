//! Reconciliation engine for serial lists.
//!
//! - [`normalize`]: canonical keys from raw fields.
//! - [`detect`]: choosing the serial column of a table.
//! - [`reconcile`]: exact matched / missing / extra sets.
//! - [`compare`]: a full run, including fuzzy classification of the
//!   unmatched serials.

#![deny(unsafe_code)]

pub mod compare;
pub mod detect;
pub mod normalize;
pub mod reconcile;

pub use compare::{CollectedSide, CompareRequest, Comparison, ReconEngine, compare};
pub use detect::{
    ColumnCandidate, ColumnDetector, DetectionStrategy, NameKeywordStrategy, ValuePatternStrategy,
    detect_column,
};
pub use normalize::{Normalizer, normalize};
pub use reconcile::{SetReconciliation, match_percentage, reconcile};
