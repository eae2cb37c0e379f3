//! Section-level diff: compare two ordered collections of sections.
//!
//! Sections are first diffed as items, by section identity and section
//! content equality. Every section pair matched across the two snapshots,
//! moved or not, then has its items diffed; inserted and deleted sections
//! carry their items implicitly.

use rowdiff_types::{DiffableSection, SectionItemChanges, SectionedChangeset};
use tracing::{debug, trace};

use crate::config::DiffConfig;
use crate::item_diff::{diff_matched, diff_with};

/// Diff two collections of sections with the default configuration.
pub fn diff_sections<S: DiffableSection>(source: &[S], target: &[S]) -> SectionedChangeset {
    diff_sections_with(source, target, &DiffConfig::default())
}

/// Diff two collections of sections.
///
/// A moved section whose header changed is reported as both a section
/// move and a section update, and still gets a nested item changeset.
pub fn diff_sections_with<S: DiffableSection>(
    source: &[S],
    target: &[S],
    config: &DiffConfig,
) -> SectionedChangeset {
    let (sections, matched) = diff_matched(source, target, S::diff_id, S::content_eq, config);

    let items: Vec<SectionItemChanges> = matched
        .into_iter()
        .map(|(from, to)| {
            let changes = diff_with(source[from].items(), target[to].items(), config);
            trace!(from, to, ops = changes.len(), "diffed section pair");
            SectionItemChanges {
                from_section: from,
                to_section: to,
                changes,
            }
        })
        .collect();

    debug!(
        source_sections = source.len(),
        target_sections = target.len(),
        section_ops = sections.len(),
        matched_sections = items.len(),
        "computed section diff"
    );

    SectionedChangeset { sections, items }
}
