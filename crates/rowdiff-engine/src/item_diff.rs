//! Flat diff: compare two ordered collections of identifiable items.
//!
//! Items are matched by identity in one hash-table pass per side. Unmatched
//! source positions become deletes, unmatched target positions become
//! inserts. Matched items are then split into moves and items that stay in
//! place according to [`MoveStrategy`], and flagged as updates when their
//! content differs. Expected cost is O(n) for matching plus O(n log n) in
//! the worst case for move classification.
//!
//! [`MoveStrategy`]: crate::config::MoveStrategy

use std::hash::Hash;

use rowdiff_types::{Changeset, Diffable, Move, Update};
use tracing::{debug, warn};

use crate::config::DiffConfig;
use crate::matching::match_identities;
use crate::moves::stable_matches;

/// Diff two collections of [`Diffable`] items with the default configuration.
pub fn diff<T: Diffable>(source: &[T], target: &[T]) -> Changeset {
    diff_with(source, target, &DiffConfig::default())
}

/// Diff two collections of [`Diffable`] items.
pub fn diff_with<T: Diffable>(source: &[T], target: &[T], config: &DiffConfig) -> Changeset {
    diff_by(source, target, T::diff_id, T::content_eq, config)
}

/// Diff two collections using closures for identity and content equality.
///
/// `id` may return either an owned identity or one borrowed from the item.
///
/// ```
/// use rowdiff_engine::{diff_by, DiffConfig};
///
/// let old = [(1, "a"), (2, "b")];
/// let new = [(2, "b"), (1, "a!")];
/// let cs = diff_by(&old, &new, |row| row.0, |a, b| a.1 == b.1, &DiffConfig::default());
/// assert_eq!(cs.moves.len(), 1);
/// assert_eq!(cs.updates.len(), 1);
/// ```
pub fn diff_by<'a, T, K, F, E>(
    source: &'a [T],
    target: &'a [T],
    id: F,
    content_eq: E,
    config: &DiffConfig,
) -> Changeset
where
    K: Hash + Eq,
    F: Fn(&'a T) -> K,
    E: Fn(&T, &T) -> bool,
{
    diff_matched(source, target, id, content_eq, config).0
}

/// Diff and also return the matched pairs that survived classification,
/// as `(from, to)` in target order.
///
/// With `detect_moves` off, items that would have moved are not returned
/// since they were reported as a delete plus an insert.
pub(crate) fn diff_matched<'a, T, K, F, E>(
    source: &'a [T],
    target: &'a [T],
    id: F,
    content_eq: E,
    config: &DiffConfig,
) -> (Changeset, Vec<(usize, usize)>)
where
    K: Hash + Eq,
    F: Fn(&'a T) -> K,
    E: Fn(&T, &T) -> bool,
{
    let matching = match_identities(source.iter().map(&id), target.iter().map(&id));

    if config.warn_on_duplicates && (matching.source_duplicates > 0 || matching.target_duplicates > 0) {
        warn!(
            source_duplicates = matching.source_duplicates,
            target_duplicates = matching.target_duplicates,
            "duplicate diff identities; first occurrence wins"
        );
    }

    let mut changeset = Changeset::new();
    changeset.deletes = matching
        .source_to_target
        .iter()
        .enumerate()
        .filter(|(_, to)| to.is_none())
        .map(|(from, _)| from)
        .collect();

    let mut candidates: Vec<(usize, usize)> = Vec::with_capacity(target.len());
    for (to, from) in matching.target_to_source.iter().enumerate() {
        match from {
            Some(from) => candidates.push((*from, to)),
            None => changeset.inserts.push(to),
        }
    }

    let sources: Vec<usize> = candidates.iter().map(|&(from, _)| from).collect();
    let stable = stable_matches(&sources, source.len(), config.move_strategy);

    let mut matched = Vec::with_capacity(candidates.len());
    let mut split_moves = false;
    for (&(from, to), is_stable) in candidates.iter().zip(stable) {
        let updated = config.detect_updates && !content_eq(&source[from], &target[to]);
        if !is_stable {
            if !config.detect_moves {
                changeset.deletes.push(from);
                changeset.inserts.push(to);
                split_moves = true;
                continue;
            }
            changeset.moves.push(Move { from, to });
        }
        if updated {
            changeset.updates.push(Update { from, to });
        }
        matched.push((from, to));
    }

    if split_moves {
        changeset.deletes.sort_unstable();
        changeset.inserts.sort_unstable();
    }

    debug!(
        source = source.len(),
        target = target.len(),
        deletes = changeset.deletes.len(),
        inserts = changeset.inserts.len(),
        moves = changeset.moves.len(),
        updates = changeset.updates.len(),
        "computed item diff"
    );

    (changeset, matched)
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use rowdiff_types::Keyed;

    use super::*;
    use crate::config::MoveStrategy;
    use crate::replay::replay;

    fn items(ids: &[&'static str]) -> Vec<Keyed<&'static str, u32>> {
        ids.iter().map(|id| Keyed::new(*id, 0)).collect()
    }

    fn versioned(pairs: &[(u32, u32)]) -> Vec<Keyed<u32, u32>> {
        pairs.iter().map(|&(id, v)| Keyed::new(id, v)).collect()
    }

    #[test]
    fn identical_collections_no_changes() {
        let a = items(&["a", "b", "c"]);
        assert!(diff(&a, &a).is_empty());
    }

    #[test]
    fn empty_source_all_inserts() {
        let cs = diff(&items(&[]), &items(&["a", "b"]));
        assert_eq!(cs.inserts, vec![0, 1]);
        assert!(cs.deletes.is_empty());
        assert!(cs.moves.is_empty());
    }

    #[test]
    fn empty_target_all_deletes() {
        let cs = diff(&items(&["a", "b", "c"]), &items(&[]));
        assert_eq!(cs.deletes, vec![0, 1, 2]);
        assert!(cs.inserts.is_empty());
    }

    #[test]
    fn both_empty() {
        assert!(diff(&items(&[]), &items(&[])).is_empty());
    }

    #[test]
    fn pure_insertion() {
        let cs = diff(&items(&["a", "b"]), &items(&["a", "x", "b"]));
        assert_eq!(cs.inserts, vec![1]);
        assert!(cs.deletes.is_empty());
        assert!(cs.moves.is_empty());
        assert!(cs.updates.is_empty());
    }

    #[test]
    fn pure_deletion() {
        let cs = diff(&items(&["a", "b", "c"]), &items(&["a", "c"]));
        assert_eq!(cs.deletes, vec![1]);
        assert!(cs.inserts.is_empty());
        assert!(cs.moves.is_empty());
    }

    #[test]
    fn deletion_does_not_move_the_tail() {
        let cs = diff(&items(&["a", "b", "c", "d", "e"]), &items(&["b", "c", "d", "e"]));
        assert_eq!(cs.deletes, vec![0]);
        assert!(cs.moves.is_empty());
    }

    #[test]
    fn update_only() {
        let cs = diff(&versioned(&[(1, 1)]), &versioned(&[(1, 2)]));
        assert_eq!(cs.updates, vec![Update { from: 0, to: 0 }]);
        assert!(cs.deletes.is_empty());
        assert!(cs.inserts.is_empty());
        assert!(cs.moves.is_empty());
    }

    #[test]
    fn rotation_is_a_single_move() {
        let cs = diff(&items(&["a", "b", "c"]), &items(&["c", "a", "b"]));
        assert_eq!(cs.moves, vec![Move { from: 2, to: 0 }]);
        assert!(cs.inserts.is_empty());
        assert!(cs.deletes.is_empty());
        assert!(cs.updates.is_empty());
    }

    #[test]
    fn rank_shift_reports_every_reranked_item() {
        let config = DiffConfig::default().with_move_strategy(MoveStrategy::RankShift);
        let cs = diff_with(&items(&["a", "b", "c"]), &items(&["c", "a", "b"]), &config);
        assert_eq!(cs.moves.len(), 3);
        assert!(cs.validate(3, 3).is_ok());
    }

    #[test]
    fn reversal_moves_all_but_one() {
        let cs = diff(&items(&["a", "b", "c", "d"]), &items(&["d", "c", "b", "a"]));
        assert_eq!(cs.moves.len(), 3);
        assert!(cs.inserts.is_empty());
        assert!(cs.deletes.is_empty());
    }

    #[test]
    fn moved_and_updated_is_reported_twice() {
        let cs = diff(&versioned(&[(1, 0), (2, 0)]), &versioned(&[(2, 5), (1, 0)]));
        assert_eq!(cs.moves, vec![Move { from: 1, to: 0 }]);
        assert_eq!(cs.updates, vec![Update { from: 1, to: 0 }]);
    }

    #[test]
    fn mixed_changes_use_raw_indices() {
        // [a, b, c, d] -> [d, a, x, c]
        let source = versioned(&[(1, 0), (2, 0), (3, 0), (4, 0)]);
        let target = versioned(&[(4, 0), (1, 0), (9, 0), (3, 1)]);
        let cs = diff(&source, &target);
        assert_eq!(cs.deletes, vec![1]);
        assert_eq!(cs.inserts, vec![2]);
        assert_eq!(cs.moves, vec![Move { from: 3, to: 0 }]);
        assert_eq!(cs.updates, vec![Update { from: 2, to: 3 }]);
        assert!(cs.validate(4, 4).is_ok());
    }

    #[test]
    fn duplicate_identity_first_wins() {
        let cs = diff(&items(&["a", "a", "b"]), &items(&["a", "b"]));
        assert_eq!(cs.deletes, vec![1]);
        assert!(cs.inserts.is_empty());
        assert!(cs.moves.is_empty());

        let cs = diff(&items(&["a", "b"]), &items(&["a", "b", "a"]));
        assert_eq!(cs.inserts, vec![2]);
        assert!(cs.deletes.is_empty());
    }

    #[test]
    fn updates_ignored_when_disabled() {
        let config = DiffConfig {
            detect_updates: false,
            ..Default::default()
        };
        let cs = diff_with(&versioned(&[(1, 1)]), &versioned(&[(1, 2)]), &config);
        assert!(cs.is_empty());
    }

    #[test]
    fn moves_split_into_delete_and_insert_when_disabled() {
        let config = DiffConfig::without_moves();
        let source = versioned(&[(1, 0), (2, 0), (3, 0)]);
        let target = versioned(&[(3, 1), (1, 0), (2, 0)]);
        let cs = diff_with(&source, &target, &config);
        assert!(cs.moves.is_empty());
        assert!(cs.updates.is_empty());
        assert_eq!(cs.deletes, vec![2]);
        assert_eq!(cs.inserts, vec![0]);
        assert!(cs.validate(3, 3).is_ok());
    }

    #[test]
    fn diff_by_with_borrowed_identity() {
        let old = vec![("alpha".to_string(), 1), ("beta".to_string(), 2)];
        let new = vec![("beta".to_string(), 2), ("gamma".to_string(), 3)];
        let cs = diff_by(&old, &new, |row| &row.0, |a, b| a.1 == b.1, &DiffConfig::default());
        assert_eq!(cs.deletes, vec![0]);
        assert_eq!(cs.inserts, vec![1]);
        assert!(cs.moves.is_empty());
    }

    fn shuffled(n: u32, seed: u64) -> Vec<Keyed<u32, u32>> {
        let mut v: Vec<Keyed<u32, u32>> = (0..n).map(|i| Keyed::new(i, i)).collect();
        v.shuffle(&mut StdRng::seed_from_u64(seed));
        v
    }

    fn time_diff(n: u32) -> f64 {
        let source = shuffled(n, 7);
        let target = shuffled(n, 11);
        let start = Instant::now();
        let cs = diff(&source, &target);
        let elapsed = start.elapsed().as_secs_f64();
        assert!(cs.inserts.is_empty() && cs.deletes.is_empty());
        elapsed
    }

    #[test]
    fn large_permutation_scales_near_linearly() {
        time_diff(10_000);
        let small = (0..3).map(|_| time_diff(10_000)).fold(f64::MAX, f64::min);
        let large = time_diff(100_000);
        // 10x the input; quadratic behaviour would be ~100x.
        assert!(
            large < small * 50.0,
            "100k diff took {large:.4}s vs {small:.4}s for 10k"
        );
    }

    #[test]
    fn large_permutation_is_consistent() {
        let source = shuffled(100_000, 1);
        let target = shuffled(100_000, 2);
        let cs = diff(&source, &target);
        assert!(cs.validate(source.len(), target.len()).is_ok());
        assert_eq!(replay(&cs, &source, &target).unwrap(), target);
    }

    fn rewritten(n: u32, seed: u64) -> Vec<Keyed<u32, u32>> {
        let mut v = shuffled(n, seed);
        for item in &mut v {
            item.value += 1;
        }
        v
    }

    #[test]
    fn large_permutation_with_every_value_changed_replays() {
        let source = shuffled(100_000, 3);
        let target = rewritten(100_000, 4);
        let cs = diff(&source, &target);
        assert_eq!(cs.updates.len(), target.len());
        assert!(cs.moves.len() > target.len() / 2);
        assert!(cs.validate(source.len(), target.len()).is_ok());
        assert_eq!(replay(&cs, &source, &target).unwrap(), target);
    }

    fn time_replay(n: u32) -> f64 {
        let source = shuffled(n, 5);
        let target = rewritten(n, 6);
        let cs = diff(&source, &target);
        let start = Instant::now();
        let rebuilt = replay(&cs, &source, &target).unwrap();
        let elapsed = start.elapsed().as_secs_f64();
        assert_eq!(rebuilt.len(), target.len());
        elapsed
    }

    #[test]
    fn replay_of_moved_and_updated_items_scales_near_linearly() {
        time_replay(10_000);
        let small = (0..3).map(|_| time_replay(10_000)).fold(f64::MAX, f64::min);
        let large = time_replay(100_000);
        assert!(
            large < small * 50.0,
            "100k replay took {large:.4}s vs {small:.4}s for 10k"
        );
    }

    fn collection() -> impl Strategy<Value = Vec<Keyed<u8, u8>>> {
        prop::collection::vec((any::<u8>(), 0u8..3), 0..40).prop_map(|pairs| {
            let mut seen = std::collections::HashSet::new();
            pairs
                .into_iter()
                .filter(|(id, _)| seen.insert(*id))
                .map(|(id, v)| Keyed::new(id, v))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn diff_with_self_is_empty(a in collection()) {
            prop_assert!(diff(&a, &a).is_empty());
        }

        #[test]
        fn changeset_partitions_both_sides(a in collection(), b in collection()) {
            let cs = diff(&a, &b);
            prop_assert!(cs.validate(a.len(), b.len()).is_ok());
            let ranked = diff_with(&a, &b, &DiffConfig::default().with_move_strategy(MoveStrategy::RankShift));
            prop_assert!(ranked.validate(a.len(), b.len()).is_ok());
        }

        #[test]
        fn replay_reproduces_target(a in collection(), b in collection()) {
            let cs = diff(&a, &b);
            prop_assert_eq!(replay(&cs, &a, &b).unwrap(), b.clone());
            let ranked = diff_with(&a, &b, &DiffConfig::default().with_move_strategy(MoveStrategy::RankShift));
            prop_assert_eq!(replay(&ranked, &a, &b).unwrap(), b.clone());
            let split = diff_with(&a, &b, &DiffConfig::without_moves());
            prop_assert_eq!(replay(&split, &a, &b).unwrap(), b);
        }

        #[test]
        fn longest_increasing_never_moves_more_than_rank_shift(a in collection(), b in collection()) {
            let fewest = diff(&a, &b);
            let ranked = diff_with(&a, &b, &DiffConfig::default().with_move_strategy(MoveStrategy::RankShift));
            prop_assert!(fewest.moves.len() <= ranked.moves.len());
            prop_assert_eq!(fewest.deletes, ranked.deletes);
            prop_assert_eq!(fewest.inserts, ranked.inserts);
        }

        #[test]
        fn permutations_only_move(a in collection(), seed in any::<u64>()) {
            let mut b = a.clone();
            b.shuffle(&mut StdRng::seed_from_u64(seed));
            let cs = diff(&a, &b);
            prop_assert!(cs.inserts.is_empty());
            prop_assert!(cs.deletes.is_empty());
            prop_assert!(cs.updates.is_empty());
            prop_assert!(cs.moves.len() < a.len().max(1));
        }
    }
}
