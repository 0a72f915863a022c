//! Property tests for similarity and diff invariants.

use proptest::prelude::*;
use serial_match::{diff_pattern, indel_ratio, matching_blocks_ratio};
use serial_model::{ClassificationThresholds, MatchStatus};

fn serial() -> impl Strategy<Value = String> {
    "[A-Z0-9]{0,14}"
}

proptest! {
    #[test]
    fn ratio_is_symmetric(a in serial(), b in serial()) {
        prop_assert_eq!(matching_blocks_ratio(&a, &b), matching_blocks_ratio(&b, &a));
        prop_assert_eq!(indel_ratio(&a, &b), indel_ratio(&b, &a));
    }

    #[test]
    fn ratio_is_bounded(a in serial(), b in serial()) {
        let ratio = matching_blocks_ratio(&a, &b);
        prop_assert!((0.0..=1.0).contains(&ratio));
    }

    #[test]
    fn ratio_is_one_only_for_identical(a in serial(), b in serial()) {
        let ratio = matching_blocks_ratio(&a, &b);
        prop_assert_eq!(ratio == 1.0, a == b);
    }

    #[test]
    fn diff_pattern_spans_longer_string(a in serial(), b in serial()) {
        let pattern = diff_pattern(&a, &b);
        prop_assert_eq!(pattern.len(), a.chars().count().max(b.chars().count()));
    }
}

#[test]
fn threshold_boundaries() {
    let thresholds = ClassificationThresholds::default();
    assert_eq!(thresholds.categorize(0.80), Some(MatchStatus::PotentialMatch));
    assert_eq!(thresholds.categorize(0.79999), Some(MatchStatus::Similar));
    assert_eq!(thresholds.categorize(0.50), Some(MatchStatus::Similar));
    assert_eq!(thresholds.categorize(0.4999), None);
}
