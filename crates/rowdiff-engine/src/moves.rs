//! Move classification among matched items.
//!
//! Input is the source position of every matched item, listed in target
//! order. An item is *stable* when it can stay where it is while the other
//! matches move around it; everything else is a move.
//!
//! The default strategy reports the fewest moves, and an item that kept its
//! relative order among the matches is never moved. Rotating `[a, b, c]` to
//! `[c, a, b]` is one move, and reversing n items is n - 1 moves.
//! [`MoveStrategy::RankShift`] instead moves every item whose rank among the
//! matches differs, which is three moves for that rotation.

use crate::config::MoveStrategy;

/// Flag each entry of `sources` (source positions in target order) as stable.
pub(crate) fn stable_matches(sources: &[usize], source_len: usize, strategy: MoveStrategy) -> Vec<bool> {
    match strategy {
        MoveStrategy::LongestIncreasing => longest_increasing(sources),
        MoveStrategy::RankShift => unshifted_ranks(sources, source_len),
    }
}

/// Mark one longest strictly increasing subsequence of `seq`.
///
/// Patience sorting: `tails[k]` is the index of the smallest tail of any
/// increasing run of length `k + 1` seen so far. O(n log n).
fn longest_increasing(seq: &[usize]) -> Vec<bool> {
    let mut tails: Vec<usize> = Vec::new();
    let mut prev: Vec<Option<usize>> = vec![None; seq.len()];

    for (i, &value) in seq.iter().enumerate() {
        let pos = tails.partition_point(|&t| seq[t] < value);
        if pos > 0 {
            prev[i] = Some(tails[pos - 1]);
        }
        if pos == tails.len() {
            tails.push(i);
        } else {
            tails[pos] = i;
        }
    }

    let mut stable = vec![false; seq.len()];
    let mut cursor = tails.last().copied();
    while let Some(i) = cursor {
        stable[i] = true;
        cursor = prev[i];
    }
    stable
}

/// Mark entries whose rank among matches is the same on both sides.
fn unshifted_ranks(sources: &[usize], source_len: usize) -> Vec<bool> {
    let mut matched = vec![false; source_len];
    for &s in sources {
        matched[s] = true;
    }

    let mut rank = vec![0; source_len];
    let mut next = 0;
    for (s, is_matched) in matched.iter().enumerate() {
        if *is_matched {
            rank[s] = next;
            next += 1;
        }
    }

    sources
        .iter()
        .enumerate()
        .map(|(target_rank, &s)| rank[s] == target_rank)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lis(seq: &[usize]) -> Vec<bool> {
        stable_matches(seq, seq.len(), MoveStrategy::LongestIncreasing)
    }

    fn ranks(seq: &[usize]) -> Vec<bool> {
        stable_matches(seq, seq.len(), MoveStrategy::RankShift)
    }

    #[test]
    fn sorted_input_is_all_stable() {
        assert_eq!(lis(&[0, 1, 2, 3]), vec![true; 4]);
        assert_eq!(ranks(&[0, 1, 2, 3]), vec![true; 4]);
    }

    #[test]
    fn rotation_moves_one_item() {
        // [a, b, c] -> [c, a, b]
        assert_eq!(lis(&[2, 0, 1]), vec![false, true, true]);
    }

    #[test]
    fn rank_shift_moves_every_shifted_item() {
        assert_eq!(ranks(&[2, 0, 1]), vec![false, false, false]);
        assert_eq!(ranks(&[2, 1, 0]), vec![false, true, false]);
    }

    #[test]
    fn reversal_keeps_a_single_anchor() {
        let stable = lis(&[4, 3, 2, 1, 0]);
        assert_eq!(stable.iter().filter(|s| **s).count(), 1);
    }

    #[test]
    fn gaps_from_unmatched_sources_do_not_count() {
        // Sources 1 and 3 were deleted; the rest kept their order.
        assert_eq!(stable_matches(&[0, 2, 4], 5, MoveStrategy::RankShift), vec![true; 3]);
        assert_eq!(stable_matches(&[0, 2, 4], 5, MoveStrategy::LongestIncreasing), vec![true; 3]);
    }

    #[test]
    fn picks_a_longest_run() {
        let seq = [3, 0, 4, 1, 5, 2, 6];
        let stable = lis(&seq);
        let kept: Vec<usize> = seq
            .iter()
            .zip(&stable)
            .filter(|(_, s)| **s)
            .map(|(v, _)| *v)
            .collect();
        assert_eq!(kept.len(), 4);
        assert!(kept.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn empty_input() {
        assert!(lis(&[]).is_empty());
        assert!(ranks(&[]).is_empty());
    }
}
