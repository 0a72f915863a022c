//! Configuration options for serial reconciliation.

use serde::{Deserialize, Serialize};

use crate::error::{ReconError, Result};
use crate::matching::MatchStatus;

/// Options for turning raw fields into serial keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationOptions {
    /// Keys are truncated to this many characters.
    pub max_length: usize,
    /// Keys shorter than this are discarded as noise when building a collection.
    pub min_length: usize,
}

impl Default for NormalizationOptions {
    fn default() -> Self {
        Self {
            max_length: 10,
            min_length: 8,
        }
    }
}

/// Options for picking the serial column of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionOptions {
    /// Column names containing any of these (lowercase) are preferred.
    pub include_keywords: Vec<String>,
    /// Column names containing any of these (lowercase) are never picked by name.
    pub exclude_keywords: Vec<String>,
    /// Regular expression a serial-looking value must match in full.
    pub serial_pattern: String,
    /// Shortest value, in characters, the pattern pass accepts.
    pub min_value_length: usize,
    /// Longest value, in characters, the pattern pass accepts.
    pub max_value_length: usize,
    /// Non-null values sampled per column for the pattern pass.
    pub sample_size: usize,
    /// Fraction of sampled values that must match the pattern.
    pub min_match_rate: f64,
}

impl Default for DetectionOptions {
    fn default() -> Self {
        Self {
            include_keywords: ["serial", "slider", "sn", "part", "number"]
                .into_iter()
                .map(String::from)
                .collect(),
            exclude_keywords: ["probe", "date", "time", "tester", "result", "status"]
                .into_iter()
                .map(String::from)
                .collect(),
            serial_pattern: r"^[A-Z]{1,3}[A-Z0-9]{7,14}$".to_string(),
            min_value_length: 8,
            max_value_length: 15,
            sample_size: 50,
            min_match_rate: 0.70,
        }
    }
}

/// Algorithm used to score how close two serials are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
    /// Longest-matching-blocks ratio (`2 * M / T`).
    #[default]
    MatchingBlocks,
    /// Normalized insertion/deletion similarity.
    Indel,
}

/// Cutoffs that drive fuzzy-match classification.
///
/// Both values are ratios in `[0, 1]` compared against the unrounded
/// similarity:
/// - Below `candidate_cutoff`: no candidate (`MISSING` / `EXTRA`)
/// - `candidate_cutoff` to `potential_match`: [`MatchStatus::Similar`]
/// - At or above `potential_match`: [`MatchStatus::PotentialMatch`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationThresholds {
    /// Minimum similarity for a candidate to be reported (default: 0.5).
    pub candidate_cutoff: f64,
    /// Minimum similarity for a likely typo (default: 0.8).
    pub potential_match: f64,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            candidate_cutoff: 0.5,
            potential_match: 0.8,
        }
    }
}

impl ClassificationThresholds {
    /// Returns true if a ratio is high enough to name a candidate.
    #[must_use]
    pub fn is_candidate(&self, ratio: f64) -> bool {
        ratio >= self.candidate_cutoff
    }

    /// Categorizes a similarity ratio.
    ///
    /// Returns `None` if the ratio is below the candidate cutoff.
    #[must_use]
    pub fn categorize(&self, ratio: f64) -> Option<MatchStatus> {
        if ratio >= self.potential_match {
            Some(MatchStatus::PotentialMatch)
        } else if ratio >= self.candidate_cutoff {
            Some(MatchStatus::Similar)
        } else {
            None
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.candidate_cutoff) {
            return Err(ReconError::invalid_option(
                "candidate_cutoff",
                format!("{} is outside 0..=1", self.candidate_cutoff),
            ));
        }
        if !(0.0..=1.0).contains(&self.potential_match) {
            return Err(ReconError::invalid_option(
                "potential_match",
                format!("{} is outside 0..=1", self.potential_match),
            ));
        }
        if self.potential_match < self.candidate_cutoff {
            return Err(ReconError::invalid_option(
                "potential_match",
                format!(
                    "{} is below candidate_cutoff {}",
                    self.potential_match, self.candidate_cutoff
                ),
            ));
        }
        Ok(())
    }
}

/// Options for the fuzzy classification pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationOptions {
    pub thresholds: ClassificationThresholds,
    pub metric: SimilarityMetric,
    /// Classify unmatched serials on a worker pool.
    pub parallel: bool,
}

/// All options for one comparison run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconOptions {
    pub normalization: NormalizationOptions,
    pub detection: DetectionOptions,
    pub classification: ClassificationOptions,
}

impl ReconOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(mut self, thresholds: ClassificationThresholds) -> Self {
        self.classification.thresholds = thresholds;
        self
    }

    pub fn with_metric(mut self, metric: SimilarityMetric) -> Self {
        self.classification.metric = metric;
        self
    }

    pub fn with_parallel(mut self, enable: bool) -> Self {
        self.classification.parallel = enable;
        self
    }

    /// Checks that the options are internally consistent.
    ///
    /// The serial pattern is compiled (and checked) by the column detector.
    pub fn validate(&self) -> Result<()> {
        let normalization = &self.normalization;
        if normalization.max_length == 0 {
            return Err(ReconError::invalid_option("max_length", "must be positive"));
        }
        if normalization.min_length > normalization.max_length {
            return Err(ReconError::invalid_option(
                "min_length",
                format!(
                    "{} exceeds max_length {}",
                    normalization.min_length, normalization.max_length
                ),
            ));
        }
        let detection = &self.detection;
        if detection.sample_size == 0 {
            return Err(ReconError::invalid_option("sample_size", "must be positive"));
        }
        if detection.min_value_length > detection.max_value_length {
            return Err(ReconError::invalid_option(
                "min_value_length",
                format!(
                    "{} exceeds max_value_length {}",
                    detection.min_value_length, detection.max_value_length
                ),
            ));
        }
        if !(0.0..=1.0).contains(&detection.min_match_rate) {
            return Err(ReconError::invalid_option(
                "min_match_rate",
                format!("{} is outside 0..=1", detection.min_match_rate),
            ));
        }
        self.classification.thresholds.validate()
    }
}
