//! Per-serial fuzzy match records.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::ids::SerialKey;
use crate::result::Side;

/// Sentinel shown in place of a closest serial when no candidate qualified.
pub const NOT_FOUND: &str = "NOT_FOUND";

/// Sentinel shown when two compared serials have no differing positions.
pub const NO_DIFFERENCES: &str = "no differences";

/// Classification tag for an unmatched serial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    /// Closest candidate is at or above the potential-match cutoff.
    PotentialMatch,
    /// Closest candidate cleared the candidate cutoff only.
    Similar,
    /// Reference serial with no eligible candidate.
    Missing,
    /// Measured serial with no eligible candidate.
    Extra,
}

impl MatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PotentialMatch => "POTENTIAL_MATCH",
            Self::Similar => "SIMILAR",
            Self::Missing => "MISSING",
            Self::Extra => "EXTRA",
        }
    }

    /// Status used when nothing in the opposing collection qualified.
    pub fn unmatched(side: Side) -> Self {
        match side {
            Side::Reference => Self::Missing,
            Side::Measured => Self::Extra,
        }
    }

    pub fn has_candidate(self) -> bool {
        matches!(self, Self::PotentialMatch | Self::Similar)
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome for a single aligned character position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffMark {
    Match,
    Mismatch,
}

impl DiffMark {
    pub fn symbol(self) -> char {
        match self {
            Self::Match => '✓',
            Self::Mismatch => '✗',
        }
    }
}

/// Position-by-position comparison of two serials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiffPattern(Vec<DiffMark>);

impl DiffPattern {
    pub fn new(marks: Vec<DiffMark>) -> Self {
        Self(marks)
    }

    pub fn marks(&self) -> &[DiffMark] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn mismatch_count(&self) -> usize {
        self.0
            .iter()
            .filter(|mark| **mark == DiffMark::Mismatch)
            .count()
    }
}

impl fmt::Display for DiffPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mark in &self.0 {
            write!(f, "{}", mark.symbol())?;
        }
        Ok(())
    }
}

/// One differing position. `None` marks padding past the end of a serial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharDifference {
    /// 1-based position.
    pub position: usize,
    pub left: Option<char>,
    pub right: Option<char>,
}

impl fmt::Display for CharDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "position {}: '", self.position)?;
        if let Some(ch) = self.left {
            write!(f, "{ch}")?;
        }
        f.write_str("' vs '")?;
        if let Some(ch) = self.right {
            write!(f, "{ch}")?;
        }
        f.write_str("'")
    }
}

/// Human-readable list of differing positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharDifferences {
    NoDifferences,
    Positions(Vec<CharDifference>),
}

impl CharDifferences {
    pub fn from_positions(positions: Vec<CharDifference>) -> Self {
        if positions.is_empty() {
            Self::NoDifferences
        } else {
            Self::Positions(positions)
        }
    }

    pub fn positions(&self) -> &[CharDifference] {
        match self {
            Self::NoDifferences => &[],
            Self::Positions(positions) => positions,
        }
    }
}

impl fmt::Display for CharDifferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDifferences => f.write_str(NO_DIFFERENCES),
            Self::Positions(positions) => {
                for (idx, difference) in positions.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{difference}")?;
                }
                Ok(())
            }
        }
    }
}

/// Aligned comparison between a serial and its closest candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialDiff {
    pub pattern: DiffPattern,
    pub differences: CharDifferences,
}

/// Fuzzy-match record for one missing or extra serial.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchDetail {
    pub serial: SerialKey,
    pub side: Side,
    #[serde(serialize_with = "serialize_closest")]
    pub closest: Option<SerialKey>,
    /// Similarity to `closest` on a 0-100 scale, one decimal.
    pub similarity: f64,
    /// Absent when no candidate qualified.
    pub diff: Option<SerialDiff>,
    pub status: MatchStatus,
}

impl MatchDetail {
    /// Record for a serial with no qualifying candidate.
    pub fn not_found(serial: SerialKey, side: Side) -> Self {
        Self {
            serial,
            side,
            closest: None,
            similarity: 0.0,
            diff: None,
            status: MatchStatus::unmatched(side),
        }
    }

    /// The closest serial, or [`NOT_FOUND`].
    pub fn closest_label(&self) -> &str {
        self.closest.as_ref().map_or(NOT_FOUND, SerialKey::as_str)
    }

    /// Rendered diff pattern; empty when no candidate qualified.
    pub fn diff_pattern(&self) -> String {
        self.diff
            .as_ref()
            .map(|diff| diff.pattern.to_string())
            .unwrap_or_default()
    }

    /// Rendered character differences; empty when no candidate qualified.
    pub fn char_differences(&self) -> String {
        self.diff
            .as_ref()
            .map(|diff| diff.differences.to_string())
            .unwrap_or_default()
    }

    pub fn is_potential_typo(&self) -> bool {
        self.status == MatchStatus::PotentialMatch
    }
}

fn serialize_closest<S>(closest: &Option<SerialKey>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(closest.as_ref().map_or(NOT_FOUND, SerialKey::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_difference_renders_padding_as_blank() {
        let difference = CharDifference {
            position: 11,
            left: Some('X'),
            right: None,
        };
        assert_eq!(difference.to_string(), "position 11: 'X' vs ''");
    }

    #[test]
    fn empty_positions_become_sentinel() {
        let differences = CharDifferences::from_positions(Vec::new());
        assert_eq!(differences, CharDifferences::NoDifferences);
        assert_eq!(differences.to_string(), NO_DIFFERENCES);
        assert!(differences.positions().is_empty());
    }

    #[test]
    fn not_found_detail_uses_side_status() {
        let detail = MatchDetail::not_found(SerialKey::from_normalized("SYC12281P0"), Side::Measured);
        assert_eq!(detail.status, MatchStatus::Extra);
        assert_eq!(detail.closest_label(), NOT_FOUND);
        assert_eq!(detail.diff_pattern(), "");
        assert_eq!(detail.char_differences(), "");
    }

    #[test]
    fn detail_serializes_sentinel_for_missing_candidate() {
        let detail =
            MatchDetail::not_found(SerialKey::from_normalized("SYC12281P0"), Side::Reference);
        let json = serde_json::to_value(&detail).expect("serialize detail");
        assert_eq!(json["closest"], "NOT_FOUND");
        assert_eq!(json["status"], "MISSING");
        assert_eq!(json["side"], "reference");
    }
}
