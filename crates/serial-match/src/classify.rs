//! Closest-match search and classification of unmatched serials.

use rayon::prelude::*;
use serial_model::{
    ClassificationOptions, ClassificationThresholds, MatchDetail, SerialCollection, SerialKey,
    Side, SimilarityMetric,
};
use tracing::{debug, info};

use crate::diff::diff;
use crate::progress::ProgressSink;
use crate::similarity::{length_bound, similarity};

/// The best candidate found for a serial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    pub serial: &'a SerialKey,
    /// Unrounded similarity in `[0, 1]`.
    pub ratio: f64,
}

/// Classifies unmatched serials against the opposing collection.
///
/// The pool is scanned in sorted order and a candidate only replaces the
/// current best on a strictly higher ratio, so ties resolve to the
/// lexicographically smallest serial.
#[derive(Debug, Clone)]
pub struct FuzzyClassifier {
    thresholds: ClassificationThresholds,
    metric: SimilarityMetric,
    parallel: bool,
}

impl FuzzyClassifier {
    pub fn new(options: &ClassificationOptions) -> Self {
        Self {
            thresholds: options.thresholds,
            metric: options.metric,
            parallel: options.parallel,
        }
    }

    pub fn thresholds(&self) -> &ClassificationThresholds {
        &self.thresholds
    }

    /// Best-scoring serial in `pool` at or above the candidate cutoff.
    pub fn closest_match<'p>(
        &self,
        serial: &SerialKey,
        pool: &'p SerialCollection,
    ) -> Option<Candidate<'p>> {
        let serial_len = serial.char_len();
        let mut best: Option<Candidate<'p>> = None;
        for candidate in pool {
            let bound = length_bound(serial_len, candidate.char_len());
            if !self.thresholds.is_candidate(bound) {
                continue;
            }
            if best.is_some_and(|current| bound <= current.ratio) {
                continue;
            }
            let ratio = similarity(self.metric, serial.as_str(), candidate.as_str());
            if !self.thresholds.is_candidate(ratio) {
                continue;
            }
            if best.is_none_or(|current| ratio > current.ratio) {
                best = Some(Candidate {
                    serial: candidate,
                    ratio,
                });
            }
        }
        best
    }

    /// Builds the match record for one unmatched serial of `side`.
    pub fn classify(&self, serial: &SerialKey, side: Side, pool: &SerialCollection) -> MatchDetail {
        let Some(candidate) = self.closest_match(serial, pool) else {
            debug!(side = %side, serial = %serial, "no candidate above cutoff");
            return MatchDetail::not_found(serial.clone(), side);
        };
        let Some(status) = self.thresholds.categorize(candidate.ratio) else {
            return MatchDetail::not_found(serial.clone(), side);
        };
        let similarity = round_to_tenth(candidate.ratio * 100.0);
        debug!(
            side = %side,
            serial = %serial,
            closest = %candidate.serial,
            similarity,
            status = %status,
            "classified"
        );
        MatchDetail {
            serial: serial.clone(),
            side,
            closest: Some(candidate.serial.clone()),
            similarity,
            diff: Some(diff(serial.as_str(), candidate.serial.as_str())),
            status,
        }
    }

    /// Classifies every serial of a sorted list, preserving its order.
    pub fn classify_all(
        &self,
        serials: &[SerialKey],
        side: Side,
        pool: &SerialCollection,
        progress: &dyn ProgressSink,
    ) -> Vec<MatchDetail> {
        progress.begin(side, serials.len());
        let details: Vec<MatchDetail> = if self.parallel {
            serials
                .par_iter()
                .map(|serial| {
                    let detail = self.classify(serial, side, pool);
                    progress.advance(side, 1);
                    detail
                })
                .collect()
        } else {
            serials
                .iter()
                .map(|serial| {
                    let detail = self.classify(serial, side, pool);
                    progress.advance(side, 1);
                    detail
                })
                .collect()
        };
        progress.finish(side);

        let potential = details.iter().filter(|d| d.is_potential_typo()).count();
        info!(
            side = %side,
            classified = details.len(),
            potential_typos = potential,
            parallel = self.parallel,
            "classification complete"
        );
        details
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_model::MatchStatus;

    use crate::progress::{NoProgress, ProgressCounter};

    fn key(value: &str) -> SerialKey {
        SerialKey::from_normalized(value)
    }

    fn pool(values: &[&str]) -> SerialCollection {
        values.iter().copied().map(key).collect()
    }

    fn classifier() -> FuzzyClassifier {
        FuzzyClassifier::new(&ClassificationOptions::default())
    }

    #[test]
    fn single_typo_is_potential_match() {
        let detail = classifier().classify(
            &key("B72AE6F13C"),
            Side::Reference,
            &pool(&["B72AE6F13D"]),
        );
        assert_eq!(detail.status, MatchStatus::PotentialMatch);
        assert_eq!(detail.closest_label(), "B72AE6F13D");
        assert!((detail.similarity - 90.0).abs() < 1e-9);
        assert_eq!(detail.char_differences(), "position 10: 'C' vs 'D'");
    }

    #[test]
    fn empty_pool_yields_not_found() {
        let detail = classifier().classify(&key("SYC12281P0"), Side::Reference, &pool(&[]));
        assert_eq!(detail.status, MatchStatus::Missing);
        assert_eq!(detail.closest, None);
        assert_eq!(detail.similarity, 0.0);
        assert!(detail.diff.is_none());
    }

    #[test]
    fn extra_side_uses_extra_status() {
        let detail = classifier().classify(&key("ZZZZZZZZZZ"), Side::Measured, &pool(&["A1234567BC"]));
        assert_eq!(detail.status, MatchStatus::Extra);
    }

    #[test]
    fn similarity_between_cutoffs_is_similar() {
        // 6 of 10 characters shared in one block.
        let detail = classifier().classify(
            &key("ABCDEF0000"),
            Side::Reference,
            &pool(&["ABCDEF9999"]),
        );
        assert_eq!(detail.status, MatchStatus::Similar);
        assert!((detail.similarity - 60.0).abs() < 1e-9);
    }

    #[test]
    fn ties_resolve_to_smallest_candidate() {
        let detail = classifier().classify(
            &key("A123456789"),
            Side::Reference,
            &pool(&["A12345678Z", "A12345678Y"]),
        );
        assert_eq!(detail.closest_label(), "A12345678Y");
    }

    #[test]
    fn best_candidate_wins_regardless_of_order() {
        let detail = classifier().classify(
            &key("A123456789"),
            Side::Reference,
            &pool(&["A1234XXXXX", "A12345678X"]),
        );
        assert_eq!(detail.closest_label(), "A12345678X");
    }

    #[test]
    fn candidate_exactly_at_cutoff_is_eligible() {
        // "ABCDE" shared out of 10 + 10 characters -> exactly 0.5.
        let candidates = pool(&["ABCDE11111"]);
        let found = classifier().closest_match(&key("ABCDE00000"), &candidates);
        let candidate = found.expect("candidate at cutoff");
        assert!((candidate.ratio - 0.5).abs() < 1e-12);
    }

    #[test]
    fn raised_cutoff_rejects_candidate() {
        let options = ClassificationOptions {
            thresholds: ClassificationThresholds {
                candidate_cutoff: 0.95,
                potential_match: 0.97,
            },
            ..ClassificationOptions::default()
        };
        let detail = FuzzyClassifier::new(&options).classify(
            &key("B72AE6F13C"),
            Side::Reference,
            &pool(&["B72AE6F13D"]),
        );
        assert_eq!(detail.status, MatchStatus::Missing);
    }

    #[test]
    fn classify_all_preserves_order_in_parallel() {
        let options = ClassificationOptions {
            parallel: true,
            ..ClassificationOptions::default()
        };
        let serials: Vec<SerialKey> = (0..40).map(|n| key(&format!("A{n:09}"))).collect();
        let candidates = pool(&["A000000001", "A000000020"]);
        let counter = ProgressCounter::new();

        let parallel =
            FuzzyClassifier::new(&options).classify_all(&serials, Side::Reference, &candidates, &counter);
        let sequential =
            classifier().classify_all(&serials, Side::Reference, &candidates, &NoProgress);

        assert_eq!(parallel, sequential);
        let order: Vec<&SerialKey> = parallel.iter().map(|d| &d.serial).collect();
        assert_eq!(order, serials.iter().collect::<Vec<_>>());
        assert_eq!(counter.processed(), 40);
        assert_eq!(counter.total(), 40);
    }
}
