//! Data model for serial list reconciliation.
//!
//! Shared by the matcher, the core engine, the readers and the CLI. Nothing
//! in this crate performs I/O.

pub mod collection;
pub mod error;
pub mod ids;
pub mod matching;
pub mod options;
pub mod result;
pub mod source;
pub mod warning;

pub use collection::{CollectionStats, SerialCollection};
pub use error::{ReconError, Result};
pub use ids::SerialKey;
pub use matching::{
    CharDifference, CharDifferences, DiffMark, DiffPattern, MatchDetail, MatchStatus,
    NO_DIFFERENCES, NOT_FOUND, SerialDiff,
};
pub use options::{
    ClassificationOptions, ClassificationThresholds, DetectionOptions, NormalizationOptions,
    ReconOptions, SimilarityMetric,
};
pub use result::{ReconciliationResult, RunStatus, Side, TypoBreakdown};
pub use source::{ColumnDetection, ColumnSelection, DetectionMethod, SourceInput, TabularSource};
pub use warning::ReconWarning;
