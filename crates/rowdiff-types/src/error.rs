use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which snapshot of a diff an index refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The "before" collection.
    Source,
    /// The "after" collection.
    Target,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => f.write_str("source"),
            Side::Target => f.write_str("target"),
        }
    }
}

/// Errors produced when a changeset is checked against collection lengths.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChangesetError {
    #[error("{side} index {index} out of bounds (len {len})")]
    IndexOutOfBounds { side: Side, index: usize, len: usize },

    #[error("{side} index {index} classified more than once")]
    DuplicateIndex { side: Side, index: usize },

    #[error("unbalanced partition: {source_kept} source positions kept, {target_kept} target positions kept")]
    UnbalancedPartition {
        source_kept: usize,
        target_kept: usize,
    },

    #[error("{list} out of order at entry {entry}")]
    Unordered { list: &'static str, entry: usize },

    #[error("update {from} -> {to} does not pair matched positions")]
    UnmatchedUpdate { from: usize, to: usize },

    #[error("section pair {from} -> {to} is not a matched section pair")]
    UnmatchedSectionPair { from: usize, to: usize },

    #[error("expected {expected} nested item changesets, found {actual}")]
    SectionCountMismatch { expected: usize, actual: usize },
}

/// Convenience alias for changeset checks.
pub type ChangesetResult<T> = Result<T, ChangesetError>;
