//! Identity matching between two snapshots.
//!
//! One hash table keyed by identity serves both passes: the source pass
//! records the first position of every identity, the target pass claims
//! those positions in target order. An identity is matched at most once,
//! so repeated identities on either side stay unmatched.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

enum Slot {
    Source { index: usize, claimed: bool },
    TargetOnly,
}

/// Candidate matches between a source and a target collection.
pub(crate) struct Matching {
    /// For every source position, the target position it matched.
    pub source_to_target: Vec<Option<usize>>,
    /// For every target position, the source position it matched.
    pub target_to_source: Vec<Option<usize>>,
    /// Source positions left unmatched because an earlier one shared their identity.
    pub source_duplicates: usize,
    /// Target positions left unmatched because an earlier one shared their identity.
    pub target_duplicates: usize,
}

pub(crate) fn match_identities<K, S, T>(source: S, target: T) -> Matching
where
    K: Hash + Eq,
    S: ExactSizeIterator<Item = K>,
    T: ExactSizeIterator<Item = K>,
{
    let mut table: HashMap<K, Slot> = HashMap::with_capacity(source.len());
    let mut source_to_target = vec![None; source.len()];
    let mut target_to_source = Vec::with_capacity(target.len());
    let mut source_duplicates = 0;
    let mut target_duplicates = 0;

    for (index, id) in source.enumerate() {
        match table.entry(id) {
            Entry::Occupied(_) => source_duplicates += 1,
            Entry::Vacant(slot) => {
                slot.insert(Slot::Source {
                    index,
                    claimed: false,
                });
            }
        }
    }

    for (to, id) in target.enumerate() {
        let matched = match table.entry(id) {
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Slot::Source { index, claimed } if !*claimed => {
                    *claimed = true;
                    source_to_target[*index] = Some(to);
                    Some(*index)
                }
                _ => {
                    target_duplicates += 1;
                    None
                }
            },
            Entry::Vacant(slot) => {
                slot.insert(Slot::TargetOnly);
                None
            }
        };
        target_to_source.push(matched);
    }

    Matching {
        source_to_target,
        target_to_source,
        source_duplicates,
        target_duplicates,
    }
}
