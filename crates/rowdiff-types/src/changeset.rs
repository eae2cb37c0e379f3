//! The flat changeset: what turns one ordered collection into another.
//!
//! Positions are raw indices into a fixed "before" (source) and "after"
//! (target) collection, the way list views apply a batch update: deletes
//! and move sources refer to the source, inserts and move destinations
//! refer to the target.
//!
//! # Invariants
//!
//! - Every source position is a delete, a move source, or kept in place.
//! - Every target position is an insert, a move destination, or kept in place.
//! - Kept positions pair up in order: the k-th kept source position maps to
//!   the k-th kept target position.
//! - An update pairs a source and target position of the same matched item,
//!   which is either a move or a kept pair.

use serde::{Deserialize, Serialize};

use crate::error::{ChangesetError, ChangesetResult, Side};

/// A matched item whose position changed relative to the other matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Position in the source collection.
    pub from: usize,
    /// Position in the target collection.
    pub to: usize,
}

/// A matched item whose identity is unchanged but whose content differs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Update {
    /// Position in the source collection.
    pub from: usize,
    /// Position in the target collection.
    pub to: usize,
}

/// The result of diffing two ordered collections.
///
/// `deletes` and `inserts` are ascending; `moves` and `updates` are
/// ordered by their target position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changeset {
    /// Source positions with no matching target.
    pub deletes: Vec<usize>,
    /// Target positions with no matching source.
    pub inserts: Vec<usize>,
    /// Matched items that changed rank among all matched items.
    pub moves: Vec<Move>,
    /// Matched items whose content changed, moved or not.
    pub updates: Vec<Update>,
}

impl Changeset {
    /// Create an empty changeset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there are no operations.
    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty()
            && self.inserts.is_empty()
            && self.moves.is_empty()
            && self.updates.is_empty()
    }

    /// Total number of operations across all four kinds.
    pub fn len(&self) -> usize {
        self.deletes.len() + self.inserts.len() + self.moves.len() + self.updates.len()
    }

    /// Number of deleted source positions.
    pub fn deletions(&self) -> usize {
        self.deletes.len()
    }

    /// Number of inserted target positions.
    pub fn insertions(&self) -> usize {
        self.inserts.len()
    }

    /// Number of moved items.
    pub fn movements(&self) -> usize {
        self.moves.len()
    }

    /// Number of updated items.
    pub fn modifications(&self) -> usize {
        self.updates.len()
    }

    /// Whether source position `from` is deleted.
    pub fn is_deleted(&self, from: usize) -> bool {
        self.deletes.binary_search(&from).is_ok()
    }

    /// Whether target position `to` is inserted.
    pub fn is_inserted(&self, to: usize) -> bool {
        self.inserts.binary_search(&to).is_ok()
    }

    /// The target position of the move starting at source position `from`.
    pub fn move_from(&self, from: usize) -> Option<usize> {
        self.moves.iter().find(|m| m.from == from).map(|m| m.to)
    }

    /// The source position of the move ending at target position `to`.
    ///
    /// Binary-searches, so `moves` must be sorted by target position as the
    /// differ emits them. [`Changeset::validate`] checks this for changesets
    /// built or deserialized elsewhere.
    pub fn move_to(&self, to: usize) -> Option<usize> {
        self.moves
            .binary_search_by_key(&to, |m| m.to)
            .ok()
            .map(|i| self.moves[i].from)
    }

    /// Whether the item at target position `to` is flagged as updated.
    ///
    /// Requires `updates` sorted by target position, like [`Changeset::move_to`].
    pub fn is_updated(&self, to: usize) -> bool {
        self.updates.binary_search_by_key(&to, |u| u.to).is_ok()
    }

    /// Pairs of positions that were neither deleted, inserted, nor moved.
    ///
    /// The lengths are those of the collections this changeset was computed
    /// from. Positions outside those lengths are ignored.
    pub fn unchanged_pairs(&self, source_len: usize, target_len: usize) -> Vec<(usize, usize)> {
        let mut source_taken = vec![false; source_len];
        let mut target_taken = vec![false; target_len];
        for &d in &self.deletes {
            if let Some(slot) = source_taken.get_mut(d) {
                *slot = true;
            }
        }
        for &i in &self.inserts {
            if let Some(slot) = target_taken.get_mut(i) {
                *slot = true;
            }
        }
        for m in &self.moves {
            if let Some(slot) = source_taken.get_mut(m.from) {
                *slot = true;
            }
            if let Some(slot) = target_taken.get_mut(m.to) {
                *slot = true;
            }
        }

        let kept_source = (0..source_len).filter(|&i| !source_taken[i]);
        let kept_target = (0..target_len).filter(|&i| !target_taken[i]);
        kept_source.zip(kept_target).collect()
    }

    /// Check that this changeset partitions both index spaces.
    ///
    /// Every index must be in bounds and classified at most once per side.
    /// The kept positions on both sides must balance, and every update must
    /// pair positions of one matched item. Each list must also be in the
    /// order the lookups above rely on: deletes and inserts ascending, moves
    /// and updates ascending by target position.
    ///
    /// Runs in time linear in the lengths and the changeset size.
    pub fn validate(&self, source_len: usize, target_len: usize) -> ChangesetResult<()> {
        let mut source_taken = vec![false; source_len];
        let mut target_taken = vec![false; target_len];
        let mut moved_to = vec![None; source_len];

        for &d in &self.deletes {
            mark(&mut source_taken, Side::Source, d)?;
        }
        for &i in &self.inserts {
            mark(&mut target_taken, Side::Target, i)?;
        }
        for m in &self.moves {
            mark(&mut source_taken, Side::Source, m.from)?;
            mark(&mut target_taken, Side::Target, m.to)?;
            moved_to[m.from] = Some(m.to);
        }

        let source_kept = source_taken.iter().filter(|t| !**t).count();
        let target_kept = target_taken.iter().filter(|t| !**t).count();
        if source_kept != target_kept {
            return Err(ChangesetError::UnbalancedPartition {
                source_kept,
                target_kept,
            });
        }

        let mut kept = vec![None; source_len];
        for (from, to) in self.unchanged_pairs(source_len, target_len) {
            kept[from] = Some(to);
        }

        let mut updated = vec![false; target_len];
        for u in &self.updates {
            check_bounds(Side::Source, u.from, source_len)?;
            check_bounds(Side::Target, u.to, target_len)?;
            let paired = kept[u.from] == Some(u.to) || moved_to[u.from] == Some(u.to);
            if !paired {
                return Err(ChangesetError::UnmatchedUpdate {
                    from: u.from,
                    to: u.to,
                });
            }
            mark(&mut updated, Side::Target, u.to)?;
        }

        check_ascending("deletes", self.deletes.iter().copied())?;
        check_ascending("inserts", self.inserts.iter().copied())?;
        check_ascending("moves", self.moves.iter().map(|m| m.to))?;
        check_ascending("updates", self.updates.iter().map(|u| u.to))?;

        Ok(())
    }
}

fn check_bounds(side: Side, index: usize, len: usize) -> ChangesetResult<()> {
    if index >= len {
        return Err(ChangesetError::IndexOutOfBounds { side, index, len });
    }
    Ok(())
}

pub(crate) fn check_ascending(list: &'static str, keys: impl Iterator<Item = usize>) -> ChangesetResult<()> {
    let mut previous: Option<usize> = None;
    for (entry, key) in keys.enumerate() {
        if previous.is_some_and(|p| p >= key) {
            return Err(ChangesetError::Unordered { list, entry });
        }
        previous = Some(key);
    }
    Ok(())
}

fn mark(taken: &mut [bool], side: Side, index: usize) -> ChangesetResult<()> {
    check_bounds(side, index, taken.len())?;
    if taken[index] {
        return Err(ChangesetError::DuplicateIndex { side, index });
    }
    taken[index] = true;
    Ok(())
}
