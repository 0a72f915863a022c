//! Position-aligned comparison of two serials.
//!
//! Both strings are right-padded to the longer length; a padded position
//! never matches.

use serial_model::{CharDifference, CharDifferences, DiffMark, DiffPattern, SerialDiff};

/// One marker per aligned position.
pub fn diff_pattern(left: &str, right: &str) -> DiffPattern {
    let marks = aligned(left, right)
        .map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) if a == b => DiffMark::Match,
            _ => DiffMark::Mismatch,
        })
        .collect();
    DiffPattern::new(marks)
}

/// Every mismatching position, or the no-differences sentinel.
pub fn char_differences(left: &str, right: &str) -> CharDifferences {
    let positions = aligned(left, right)
        .enumerate()
        .filter(|(_, (a, b))| !(a.is_some() && a == b))
        .map(|(idx, (a, b))| CharDifference {
            position: idx + 1,
            left: a,
            right: b,
        })
        .collect();
    CharDifferences::from_positions(positions)
}

pub fn diff(left: &str, right: &str) -> SerialDiff {
    SerialDiff {
        pattern: diff_pattern(left, right),
        differences: char_differences(left, right),
    }
}

fn aligned<'a>(
    left: &'a str,
    right: &'a str,
) -> impl Iterator<Item = (Option<char>, Option<char>)> + 'a {
    let width = left.chars().count().max(right.chars().count());
    let mut left_chars = left.chars();
    let mut right_chars = right.chars();
    (0..width).map(move |_| (left_chars.next(), right_chars.next()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_marks_single_substitution() {
        let pattern = diff_pattern("B72AE6F13C", "B72AE6F13D");
        assert_eq!(pattern.len(), 10);
        assert_eq!(pattern.mismatch_count(), 1);
        insta::assert_snapshot!(pattern.to_string(), @"✓✓✓✓✓✓✓✓✓✗");
    }

    #[test]
    fn padding_positions_are_mismatches() {
        let pattern = diff_pattern("A1234567", "A1234567BC");
        assert_eq!(pattern.len(), 10);
        assert_eq!(
            &pattern.marks()[8..],
            &[DiffMark::Mismatch, DiffMark::Mismatch]
        );
    }

    #[test]
    fn differences_render_positions() {
        let differences = char_differences("B72AE6F13C", "B72AE6F13D");
        insta::assert_snapshot!(differences.to_string(), @"position 10: 'C' vs 'D'");
    }

    #[test]
    fn differences_render_padding_as_blank() {
        let differences = char_differences("AB1234567", "XB12345678");
        insta::assert_snapshot!(
            differences.to_string(),
            @"position 1: 'A' vs 'X' | position 10: '' vs '8'"
        );
    }

    #[test]
    fn identical_strings_yield_sentinel() {
        let result = diff("A1234567BC", "A1234567BC");
        assert_eq!(result.differences, CharDifferences::NoDifferences);
        assert_eq!(result.pattern.mismatch_count(), 0);
    }

    #[test]
    fn empty_inputs_yield_empty_pattern() {
        assert!(diff_pattern("", "").is_empty());
    }
}
