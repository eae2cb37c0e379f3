//! Caller-owned cache of per-section values.
//!
//! List adapters often keep derived data per section (measured heights,
//! built row models, ...). A [`SectionCache`] keys that data by section
//! identity and is invalidated explicitly, either entry by entry or from a
//! [`SectionedChangeset`] after a diff.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use rowdiff_types::{DiffableSection, SectionedChangeset};
use tracing::debug;

/// Values cached per section identity.
#[derive(Clone, Debug)]
pub struct SectionCache<K, V> {
    entries: HashMap<K, V>,
}

impl<K, V> Default for SectionCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Hash + Eq, V> SectionCache<K, V> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached sections.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The cached value for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Whether a value is cached for `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Cache `value` for `key`, returning the value it replaced.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// The cached value for `key`, building it with `build` on a miss.
    pub fn get_or_insert_with(&mut self, key: K, build: impl FnOnce() -> V) -> &V {
        self.entries.entry(key).or_insert_with(build)
    }

    /// Drop the value cached for `key`.
    pub fn invalidate(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key)
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Keep only sections that survived `changes` untouched.
    ///
    /// A section survives when it was matched across the diff (a move is
    /// fine), its own content is unchanged, and its nested item changeset is
    /// empty. `target` is the collection the changeset was diffed into.
    /// Returns the number of evicted entries.
    pub fn retain_unchanged<S>(&mut self, changes: &SectionedChangeset, target: &[S]) -> usize
    where
        S: DiffableSection<Id = K>,
    {
        let survivors: HashSet<&K> = changes
            .items
            .iter()
            .filter(|pair| pair.changes.is_empty() && !changes.sections.is_updated(pair.to_section))
            .filter_map(|pair| target.get(pair.to_section))
            .map(|section| section.diff_id())
            .collect();

        let before = self.entries.len();
        self.entries.retain(|key, _| survivors.contains(key));
        let evicted = before - self.entries.len();

        debug!(evicted, kept = self.entries.len(), "invalidated section cache");
        evicted
    }
}
