//! String similarity ratios for serial keys.
//!
//! The default metric scores two strings by the characters covered by their
//! longest matching blocks: find the longest common substring, then recurse
//! into the unmatched regions on either side of it. With `M` matched
//! characters and `T` total characters the ratio is `2 * M / T`.
//!
//! The block search breaks ties towards the earliest start in the first
//! string, so the raw procedure is order-sensitive in rare cases. Inputs are
//! put in lexicographic order first, which makes the ratio symmetric.

use rapidfuzz::distance::indel;
use serial_model::SimilarityMetric;

/// A run of characters shared by both strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingBlock {
    /// Start in the first string (characters).
    pub left: usize,
    /// Start in the second string (characters).
    pub right: usize,
    pub size: usize,
}

/// Similarity of two strings in `[0, 1]` using the given metric.
pub fn similarity(metric: SimilarityMetric, left: &str, right: &str) -> f64 {
    match metric {
        SimilarityMetric::MatchingBlocks => matching_blocks_ratio(left, right),
        SimilarityMetric::Indel => indel_ratio(left, right),
    }
}

/// Longest-matching-blocks ratio. 1.0 only for identical strings.
pub fn matching_blocks_ratio(left: &str, right: &str) -> f64 {
    let (first, second) = if left <= right {
        (left, right)
    } else {
        (right, left)
    };
    let a: Vec<char> = first.chars().collect();
    let b: Vec<char> = second.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched: usize = blocks_of(&a, &b).iter().map(|block| block.size).sum();
    (2 * matched) as f64 / total as f64
}

/// Normalized insertion/deletion similarity.
pub fn indel_ratio(left: &str, right: &str) -> f64 {
    indel::normalized_similarity(left.chars(), right.chars())
}

/// Upper bound of either ratio from the lengths alone.
///
/// Neither metric can exceed `2 * min(len) / (len_a + len_b)`, which lets the
/// classifier skip candidates cheaply.
pub fn length_bound(left_len: usize, right_len: usize) -> f64 {
    let total = left_len + right_len;
    if total == 0 {
        return 1.0;
    }
    (2 * left_len.min(right_len)) as f64 / total as f64
}

/// Matching blocks between two strings, ordered by position.
pub fn matching_blocks(left: &str, right: &str) -> Vec<MatchingBlock> {
    let a: Vec<char> = left.chars().collect();
    let b: Vec<char> = right.chars().collect();
    blocks_of(&a, &b)
}

fn blocks_of(a: &[char], b: &[char]) -> Vec<MatchingBlock> {
    let mut pending = vec![(0, a.len(), 0, b.len())];
    let mut blocks = Vec::new();
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let block = longest_match(a, b, alo, ahi, blo, bhi);
        if block.size == 0 {
            continue;
        }
        if alo < block.left && blo < block.right {
            pending.push((alo, block.left, blo, block.right));
        }
        let (left_end, right_end) = (block.left + block.size, block.right + block.size);
        if left_end < ahi && right_end < bhi {
            pending.push((left_end, ahi, right_end, bhi));
        }
        blocks.push(block);
    }
    blocks.sort_by_key(|block| (block.left, block.right));
    blocks
}

/// Longest common run inside `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Among equally long runs the one starting earliest in `a` wins, then the
/// one starting earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> MatchingBlock {
    let mut best = MatchingBlock {
        left: alo,
        right: blo,
        size: 0,
    };
    let width = bhi - blo + 1;
    let mut previous = vec![0usize; width];
    let mut current = vec![0usize; width];
    for i in alo..ahi {
        for j in blo..bhi {
            let slot = j - blo + 1;
            current[slot] = if a[i] == b[j] {
                previous[slot - 1] + 1
            } else {
                0
            };
            let run = current[slot];
            if run > best.size {
                best = MatchingBlock {
                    left: i + 1 - run,
                    right: j + 1 - run,
                    size: run,
                };
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    #[test]
    fn single_substitution_scores_ninety_percent() {
        assert!(close(matching_blocks_ratio("B72AE6F13C", "B72AE6F13D"), 0.9));
    }

    #[test]
    fn identical_strings_score_one() {
        assert!(close(matching_blocks_ratio("A1234567BC", "A1234567BC"), 1.0));
        assert!(close(matching_blocks_ratio("", ""), 1.0));
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert!(close(matching_blocks_ratio("AAAA", "BBBB"), 0.0));
        assert!(close(matching_blocks_ratio("AAAA", ""), 0.0));
    }

    #[test]
    fn recursion_collects_blocks_on_both_sides() {
        // "abxcd" vs "abycd": "ab" then "cd" around the differing middle.
        let blocks = matching_blocks("abxcd", "abycd");
        assert_eq!(
            blocks,
            vec![
                MatchingBlock {
                    left: 0,
                    right: 0,
                    size: 2
                },
                MatchingBlock {
                    left: 3,
                    right: 3,
                    size: 2
                },
            ]
        );
        assert!(close(matching_blocks_ratio("abxcd", "abycd"), 0.8));
    }

    #[test]
    fn longest_block_prefers_earliest_start() {
        let blocks = matching_blocks("ABAB", "AB");
        assert_eq!(
            blocks,
            vec![MatchingBlock {
                left: 0,
                right: 0,
                size: 2
            }]
        );
    }

    #[test]
    fn transposition_is_partially_credited() {
        // "ABCD" vs "ACBD": blocks "A", "B"/"C", "D" -> 3 of 4 matched.
        assert!(close(matching_blocks_ratio("ABCD", "ACBD"), 0.75));
    }

    #[test]
    fn indel_agrees_on_single_substitution() {
        assert!(close(indel_ratio("B72AE6F13C", "B72AE6F13D"), 0.9));
        assert!(close(indel_ratio("A1234567BC", "A1234567BC"), 1.0));
    }

    #[test]
    fn length_bound_caps_the_ratio() {
        assert!(close(length_bound(10, 10), 1.0));
        assert!(close(length_bound(2, 8), 0.4));
        assert!(matching_blocks_ratio("AB", "ABCDEFGH") <= length_bound(2, 8));
    }

    #[test]
    fn metric_dispatch() {
        assert!(close(
            similarity(SimilarityMetric::MatchingBlocks, "B72AE6F13C", "B72AE6F13D"),
            0.9
        ));
        assert!(close(
            similarity(SimilarityMetric::Indel, "B72AE6F13C", "B72AE6F13D"),
            0.9
        ));
    }
}
