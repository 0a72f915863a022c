//! Reconciliation output handed to report assemblers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::SerialKey;
use crate::matching::{MatchDetail, MatchStatus};

/// Which input a serial (or a diagnostic) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The authoritative list.
    Reference,
    /// The observed list being checked.
    Measured,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Measured => "measured",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Reference => Self::Measured,
            Self::Measured => Self::Reference,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts of unmatched serials by how close their best candidate was.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypoBreakdown {
    /// Potential matches: likely transcription errors.
    pub potential_typos: usize,
    /// Similar serial exists but below the potential-match cutoff.
    pub needs_review: usize,
    /// No candidate cleared the candidate cutoff.
    pub not_found: usize,
}

/// Overall verdict for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Every reference serial was found.
    Ok,
    /// Reference serials are missing.
    Warning,
    /// Missing reference serials look like typos of measured ones.
    Alert,
}

impl RunStatus {
    pub fn description(self) -> &'static str {
        match self {
            Self::Ok => "all reference serials matched",
            Self::Warning => "missing serials found",
            Self::Alert => "potential typos detected",
        }
    }
}

/// Result of comparing one reference collection against one measured collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationResult {
    pub reference_total: usize,
    pub measured_total: usize,
    pub matched_count: usize,
    pub missing_count: usize,
    pub extra_count: usize,
    /// `matched / reference * 100`, two decimals; 0 for an empty reference.
    pub match_percentage: f64,
    pub matched: Vec<SerialKey>,
    pub missing: Vec<SerialKey>,
    pub extra: Vec<SerialKey>,
    pub missing_details: Vec<MatchDetail>,
    pub extra_details: Vec<MatchDetail>,
}

impl ReconciliationResult {
    /// Details for the unmatched serials of one side.
    pub fn details(&self, side: Side) -> &[MatchDetail] {
        match side {
            Side::Reference => &self.missing_details,
            Side::Measured => &self.extra_details,
        }
    }

    pub fn potential_typos(&self, side: Side) -> impl Iterator<Item = &MatchDetail> {
        self.details(side)
            .iter()
            .filter(|detail| detail.is_potential_typo())
    }

    pub fn breakdown(&self, side: Side) -> TypoBreakdown {
        let mut breakdown = TypoBreakdown::default();
        for detail in self.details(side) {
            match detail.status {
                MatchStatus::PotentialMatch => breakdown.potential_typos += 1,
                MatchStatus::Similar => breakdown.needs_review += 1,
                MatchStatus::Missing | MatchStatus::Extra => breakdown.not_found += 1,
            }
        }
        breakdown
    }

    pub fn status(&self) -> RunStatus {
        if self.potential_typos(Side::Reference).next().is_some() {
            RunStatus::Alert
        } else if self.missing_count > 0 {
            RunStatus::Warning
        } else {
            RunStatus::Ok
        }
    }

    pub fn is_complete_match(&self) -> bool {
        self.missing_count == 0 && self.extra_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{CharDifferences, DiffPattern, SerialDiff};

    fn key(value: &str) -> SerialKey {
        SerialKey::from_normalized(value)
    }

    fn found(serial: &str, closest: &str, similarity: f64, status: MatchStatus) -> MatchDetail {
        MatchDetail {
            serial: key(serial),
            side: Side::Reference,
            closest: Some(key(closest)),
            similarity,
            diff: Some(SerialDiff {
                pattern: DiffPattern::default(),
                differences: CharDifferences::NoDifferences,
            }),
            status,
        }
    }

    fn result_with(missing_details: Vec<MatchDetail>) -> ReconciliationResult {
        let missing: Vec<SerialKey> = missing_details.iter().map(|d| d.serial.clone()).collect();
        ReconciliationResult {
            reference_total: 4,
            measured_total: 3,
            matched_count: 4 - missing.len(),
            missing_count: missing.len(),
            extra_count: 0,
            match_percentage: 0.0,
            matched: Vec::new(),
            missing,
            extra: Vec::new(),
            missing_details,
            extra_details: Vec::new(),
        }
    }

    #[test]
    fn breakdown_counts_each_status() {
        let result = result_with(vec![
            found("B72AE6F13C", "B72AE6F13D", 90.0, MatchStatus::PotentialMatch),
            found("B72AE6F13E", "B72AXXXX3D", 60.0, MatchStatus::Similar),
            MatchDetail::not_found(key("SYC12281P0"), Side::Reference),
        ]);
        let breakdown = result.breakdown(Side::Reference);
        assert_eq!(breakdown.potential_typos, 1);
        assert_eq!(breakdown.needs_review, 1);
        assert_eq!(breakdown.not_found, 1);
        assert_eq!(result.status(), RunStatus::Alert);
    }

    #[test]
    fn status_without_typos_is_warning() {
        let result = result_with(vec![MatchDetail::not_found(
            key("SYC12281P0"),
            Side::Reference,
        )]);
        assert_eq!(result.status(), RunStatus::Warning);
    }

    #[test]
    fn status_with_nothing_missing_is_ok() {
        let result = result_with(Vec::new());
        assert_eq!(result.status(), RunStatus::Ok);
        assert!(result.is_complete_match());
    }

    #[test]
    fn side_opposite_round_trips() {
        assert_eq!(Side::Reference.opposite(), Side::Measured);
        assert_eq!(Side::Measured.opposite().opposite(), Side::Measured);
    }
}
