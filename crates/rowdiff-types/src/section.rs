//! The two-level changeset for sectioned lists.
//!
//! Section-level operations live in a flat [`Changeset`] over section
//! positions. Every pair of sections matched by identity additionally
//! carries a nested item changeset whose positions are local to that pair.
//! Inserted and deleted sections carry their items implicitly and have no
//! nested changeset.

use serde::{Deserialize, Serialize};

use crate::changeset::{check_ascending, Changeset};
use crate::error::{ChangesetError, ChangesetResult};

/// A (section, item) position in a sectioned list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IndexPath {
    /// Section position.
    pub section: usize,
    /// Item position within the section.
    pub item: usize,
}

impl IndexPath {
    /// Create an index path.
    pub fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

/// Item-level changes for one matched section pair.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionItemChanges {
    /// Position of the section in the source sections.
    pub from_section: usize,
    /// Position of the section in the target sections.
    pub to_section: usize,
    /// The diff of the pair's items, local to the pair.
    pub changes: Changeset,
}

/// The result of diffing two ordered collections of sections.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionedChangeset {
    /// Section-level deletes, inserts, moves and updates.
    pub sections: Changeset,
    /// One entry per matched section pair, ordered by `to_section`.
    pub items: Vec<SectionItemChanges>,
}

impl SectionedChangeset {
    /// Create an empty sectioned changeset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if neither sections nor any matched section's items changed.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.items.iter().all(|s| s.changes.is_empty())
    }

    /// Total number of section-level and item-level operations.
    pub fn len(&self) -> usize {
        self.sections.len() + self.items.iter().map(|s| s.changes.len()).sum::<usize>()
    }

    /// Nested changes for the matched pair whose source section is `section`.
    pub fn items_for_source(&self, section: usize) -> Option<&Changeset> {
        self.items
            .iter()
            .find(|s| s.from_section == section)
            .map(|s| &s.changes)
    }

    /// Nested changes for the matched pair whose target section is `section`.
    pub fn items_for_target(&self, section: usize) -> Option<&Changeset> {
        self.items
            .binary_search_by_key(&section, |s| s.to_section)
            .ok()
            .map(|i| &self.items[i].changes)
    }

    /// Item deletes as index paths into the source sections.
    pub fn item_deletes(&self) -> Vec<IndexPath> {
        self.items
            .iter()
            .flat_map(|s| {
                s.changes
                    .deletes
                    .iter()
                    .map(move |&item| IndexPath::new(s.from_section, item))
            })
            .collect()
    }

    /// Item inserts as index paths into the target sections.
    pub fn item_inserts(&self) -> Vec<IndexPath> {
        self.items
            .iter()
            .flat_map(|s| {
                s.changes
                    .inserts
                    .iter()
                    .map(move |&item| IndexPath::new(s.to_section, item))
            })
            .collect()
    }

    /// Item moves as (source path, target path) pairs.
    ///
    /// Moves stay within their section pair; cross-section moves are never
    /// produced because items are only diffed inside matched sections.
    pub fn item_moves(&self) -> Vec<(IndexPath, IndexPath)> {
        self.items
            .iter()
            .flat_map(|s| {
                s.changes.moves.iter().map(move |m| {
                    (
                        IndexPath::new(s.from_section, m.from),
                        IndexPath::new(s.to_section, m.to),
                    )
                })
            })
            .collect()
    }

    /// Item updates as (source path, target path) pairs.
    pub fn item_updates(&self) -> Vec<(IndexPath, IndexPath)> {
        self.items
            .iter()
            .flat_map(|s| {
                s.changes.updates.iter().map(move |u| {
                    (
                        IndexPath::new(s.from_section, u.from),
                        IndexPath::new(s.to_section, u.to),
                    )
                })
            })
            .collect()
    }

    /// Check this changeset against the item counts of every section.
    ///
    /// `source_items[i]` is the number of items in source section `i`, and
    /// likewise for `target_items`.
    pub fn validate(&self, source_items: &[usize], target_items: &[usize]) -> ChangesetResult<()> {
        self.sections
            .validate(source_items.len(), target_items.len())?;

        let mut pair_of = vec![None; source_items.len()];
        let mut expected = 0;
        for (from, to) in self
            .sections
            .unchanged_pairs(source_items.len(), target_items.len())
        {
            pair_of[from] = Some(to);
            expected += 1;
        }
        for m in &self.sections.moves {
            pair_of[m.from] = Some(m.to);
            expected += 1;
        }

        if expected != self.items.len() {
            return Err(ChangesetError::SectionCountMismatch {
                expected,
                actual: self.items.len(),
            });
        }
        check_ascending("items", self.items.iter().map(|n| n.to_section))?;

        for nested in &self.items {
            let (from, to) = (nested.from_section, nested.to_section);
            if pair_of.get(from).copied().flatten() != Some(to) {
                return Err(ChangesetError::UnmatchedSectionPair { from, to });
            }
            nested.changes.validate(source_items[from], target_items[to])?;
        }

        Ok(())
    }
}
