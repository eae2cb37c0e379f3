//! Apply a changeset the way a list view applies a batch update.
//!
//! Deletes and move sources are removed from the source first, leaving the
//! items that stay in their original relative order. Inserts and move
//! destinations are then placed at their target positions in ascending
//! order. Updated items take the target's content.

use rowdiff_types::{Changeset, Section, SectionedChangeset};

use crate::error::EngineResult;

/// Replay `changeset` against a copy of `source`.
///
/// `target` supplies the content of inserted and updated items. The
/// changeset is validated against both lengths first.
pub fn replay<T: Clone>(changeset: &Changeset, source: &[T], target: &[T]) -> EngineResult<Vec<T>> {
    changeset.validate(source.len(), target.len())?;

    let mut removed = vec![false; source.len()];
    for &from in &changeset.deletes {
        removed[from] = true;
    }
    for m in &changeset.moves {
        removed[m.from] = true;
    }

    let mut updated_to = vec![None; source.len()];
    for u in &changeset.updates {
        updated_to[u.from] = Some(u.to);
    }
    let carry = |from: usize| match updated_to[from] {
        Some(to) => target[to].clone(),
        None => source[from].clone(),
    };

    let mut kept = (0..source.len()).filter(|&from| !removed[from]).map(carry);

    let mut incoming: Vec<(usize, T)> = changeset
        .inserts
        .iter()
        .map(|&to| (to, target[to].clone()))
        .chain(changeset.moves.iter().map(|m| (m.to, carry(m.from))))
        .collect();
    incoming.sort_unstable_by_key(|(to, _)| *to);
    let mut incoming = incoming.into_iter().peekable();

    let mut result = Vec::with_capacity(target.len());
    for to in 0..target.len() {
        let next = match incoming.peek() {
            Some((at, _)) if *at == to => incoming.next().map(|(_, item)| item),
            _ => kept.next(),
        };
        result.extend(next);
    }

    Ok(result)
}

/// Replay a sectioned changeset against a copy of `source`.
///
/// Sections are replayed first; every matched section then has its items
/// replayed with its nested changeset.
pub fn replay_sections<K, T, H>(
    changeset: &SectionedChangeset,
    source: &[Section<K, T, H>],
    target: &[Section<K, T, H>],
) -> EngineResult<Vec<Section<K, T, H>>>
where
    K: Clone,
    T: Clone,
    H: Clone,
{
    let source_items: Vec<usize> = source.iter().map(|s| s.items.len()).collect();
    let target_items: Vec<usize> = target.iter().map(|s| s.items.len()).collect();
    changeset.validate(&source_items, &target_items)?;

    let mut sections = replay(&changeset.sections, source, target)?;
    for nested in &changeset.items {
        sections[nested.to_section].items = replay(
            &nested.changes,
            &source[nested.from_section].items,
            &target[nested.to_section].items,
        )?;
    }

    Ok(sections)
}
