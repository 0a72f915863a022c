//! Serial column detection for tabular sources.
//!
//! Detection runs an ordered chain of strategies; the first one that returns
//! a column wins. With the default options the chain is:
//!
//! 1. **Name keyword**: skip names containing an exclusion keyword, then take
//!    the first name containing an inclusion keyword.
//! 2. **Value pattern**: take the first column whose sampled values match the
//!    serial pattern often enough.
//!
//! If nothing qualifies the first column is used and the detection is marked
//! as a fallback, which callers must surface as low confidence.

use std::ops::RangeInclusive;

use regex::Regex;
use serial_model::{
    ColumnDetection, ColumnSelection, DetectionMethod, DetectionOptions, ReconError, Result, Side,
    TabularSource,
};
use tracing::{debug, info, warn};

/// A column as seen by the detection strategies.
#[derive(Debug, Clone)]
pub struct ColumnCandidate<'a> {
    pub index: usize,
    pub name: &'a str,
    /// Leading non-null values, prepared for pattern tests (uppercased,
    /// trimmed, cut at the first comma).
    pub samples: Vec<String>,
}

/// One rule in the detection chain.
pub trait DetectionStrategy: Send + Sync {
    fn method(&self) -> DetectionMethod;

    /// Returns the chosen column, or `None` to defer to the next strategy.
    fn detect(&self, candidates: &[ColumnCandidate<'_>]) -> Option<ColumnDetection>;
}

/// Picks a column by keywords contained in its name.
#[derive(Debug, Clone)]
pub struct NameKeywordStrategy {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl NameKeywordStrategy {
    pub fn new<I, E>(include: I, exclude: E) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Self {
            include: lowercase_all(include),
            exclude: lowercase_all(exclude),
        }
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|keyword| name.contains(keyword.as_str()))
    }

    fn is_included(&self, name: &str) -> bool {
        self.include.iter().any(|keyword| name.contains(keyword.as_str()))
    }
}

impl DetectionStrategy for NameKeywordStrategy {
    fn method(&self) -> DetectionMethod {
        DetectionMethod::NameKeyword
    }

    fn detect(&self, candidates: &[ColumnCandidate<'_>]) -> Option<ColumnDetection> {
        candidates.iter().find_map(|candidate| {
            let lowered = candidate.name.to_lowercase();
            if self.is_excluded(&lowered) {
                debug!(column = candidate.name, "column name excluded");
                return None;
            }
            self.is_included(&lowered).then(|| ColumnDetection {
                index: candidate.index,
                name: candidate.name.to_string(),
                method: DetectionMethod::NameKeyword,
                match_rate: None,
            })
        })
    }
}

/// Picks a column whose sampled values look like serials.
#[derive(Debug, Clone)]
pub struct ValuePatternStrategy {
    pattern: Regex,
    lengths: RangeInclusive<usize>,
    min_match_rate: f64,
}

impl ValuePatternStrategy {
    /// A strategy with no length bound beyond what `pattern` enforces.
    pub fn new(pattern: Regex, min_match_rate: f64) -> Self {
        Self {
            pattern,
            lengths: 0..=usize::MAX,
            min_match_rate,
        }
    }

    /// Only values whose character count falls in `lengths` can match.
    #[must_use]
    pub fn with_lengths(mut self, lengths: RangeInclusive<usize>) -> Self {
        self.lengths = lengths;
        self
    }

    /// Whether one prepared sample looks like a serial.
    pub fn is_match(&self, sample: &str) -> bool {
        self.lengths.contains(&sample.chars().count()) && self.pattern.is_match(sample)
    }

    /// Fraction of samples matching the pattern; `None` without samples.
    pub fn match_rate(&self, samples: &[String]) -> Option<f64> {
        if samples.is_empty() {
            return None;
        }
        let hits = samples
            .iter()
            .filter(|sample| self.is_match(sample))
            .count();
        Some(hits as f64 / samples.len() as f64)
    }
}

impl DetectionStrategy for ValuePatternStrategy {
    fn method(&self) -> DetectionMethod {
        DetectionMethod::ValuePattern
    }

    fn detect(&self, candidates: &[ColumnCandidate<'_>]) -> Option<ColumnDetection> {
        candidates.iter().find_map(|candidate| {
            let rate = self.match_rate(&candidate.samples)?;
            debug!(column = candidate.name, match_rate = rate, "pattern match rate");
            (rate >= self.min_match_rate).then(|| ColumnDetection {
                index: candidate.index,
                name: candidate.name.to_string(),
                method: DetectionMethod::ValuePattern,
                match_rate: Some(rate),
            })
        })
    }
}

/// Ordered chain of detection strategies.
pub struct ColumnDetector {
    strategies: Vec<Box<dyn DetectionStrategy>>,
    sample_size: usize,
}

impl ColumnDetector {
    /// Builds the default two-pass chain from options.
    ///
    /// # Errors
    ///
    /// Returns [`ReconError::InvalidPattern`] if the serial pattern does not compile.
    pub fn from_options(options: &DetectionOptions) -> Result<Self> {
        let pattern =
            Regex::new(&options.serial_pattern).map_err(|err| ReconError::InvalidPattern {
                pattern: options.serial_pattern.clone(),
                message: err.to_string(),
            })?;
        Ok(Self::with_strategies(
            vec![
                Box::new(NameKeywordStrategy::new(
                    &options.include_keywords,
                    &options.exclude_keywords,
                )),
                Box::new(
                    ValuePatternStrategy::new(pattern, options.min_match_rate)
                        .with_lengths(options.min_value_length..=options.max_value_length),
                ),
            ],
            options.sample_size,
        ))
    }

    pub fn with_strategies(strategies: Vec<Box<dyn DetectionStrategy>>, sample_size: usize) -> Self {
        Self {
            strategies,
            sample_size,
        }
    }

    /// Builds the candidate view of every column.
    pub fn candidates<'a>(&self, table: &'a dyn TabularSource) -> Vec<ColumnCandidate<'a>> {
        table
            .column_names()
            .iter()
            .enumerate()
            .map(|(index, name)| ColumnCandidate {
                index,
                name: name.as_str(),
                samples: table
                    .column_values(index)
                    .into_iter()
                    .flatten()
                    .filter(|value| !value.trim().is_empty())
                    .take(self.sample_size)
                    .map(prepare_sample)
                    .collect(),
            })
            .collect()
    }

    /// Detects the serial column. Returns `None` only for a table without columns.
    pub fn detect(&self, table: &dyn TabularSource) -> Option<ColumnDetection> {
        let candidates = self.candidates(table);
        let first = candidates.first()?;
        for strategy in &self.strategies {
            if let Some(found) = strategy.detect(&candidates) {
                info!(
                    column = %found.name,
                    index = found.index,
                    method = %found.method,
                    "serial column detected"
                );
                return Some(found);
            }
        }
        warn!(
            column = first.name,
            "no serial column detected, falling back to first column"
        );
        Some(ColumnDetection {
            index: first.index,
            name: first.name.to_string(),
            method: DetectionMethod::Fallback,
            match_rate: None,
        })
    }

    /// Resolves a column selection, running detection for [`ColumnSelection::Auto`].
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit index is out of range or an explicit
    /// name is not present.
    pub fn select(
        &self,
        table: &dyn TabularSource,
        selection: &ColumnSelection,
        side: Side,
    ) -> Result<Option<ColumnDetection>> {
        let names = table.column_names();
        match selection {
            ColumnSelection::Auto => Ok(self.detect(table)),
            ColumnSelection::Index(index) => {
                let name = names
                    .get(*index)
                    .ok_or(ReconError::ColumnIndexOutOfRange {
                        side,
                        index: *index,
                        columns: names.len(),
                    })?;
                Ok(Some(explicit(*index, name)))
            }
            ColumnSelection::Name(wanted) => {
                let wanted = wanted.trim();
                names
                    .iter()
                    .position(|name| name.trim().eq_ignore_ascii_case(wanted))
                    .map(|index| Some(explicit(index, &names[index])))
                    .ok_or_else(|| ReconError::ColumnNotFound {
                        side,
                        name: wanted.to_string(),
                    })
            }
        }
    }
}

impl std::fmt::Debug for ColumnDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let methods: Vec<DetectionMethod> = self.strategies.iter().map(|s| s.method()).collect();
        f.debug_struct("ColumnDetector")
            .field("strategies", &methods)
            .field("sample_size", &self.sample_size)
            .finish()
    }
}

/// Detects the serial column of a table with the given options.
///
/// # Errors
///
/// Returns an error if the options carry an invalid serial pattern.
pub fn detect_column(
    table: &dyn TabularSource,
    options: &DetectionOptions,
) -> Result<Option<ColumnDetection>> {
    Ok(ColumnDetector::from_options(options)?.detect(table))
}

fn explicit(index: usize, name: &str) -> ColumnDetection {
    ColumnDetection {
        index,
        name: name.to_string(),
        method: DetectionMethod::Explicit,
        match_rate: None,
    }
}

fn prepare_sample(value: &str) -> String {
    let upper = value.trim().to_uppercase();
    upper.split(',').next().unwrap_or_default().trim().to_string()
}

fn lowercase_all<I>(keywords: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    keywords
        .into_iter()
        .map(|keyword| keyword.as_ref().trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .collect()
}
