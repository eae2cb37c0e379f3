//! Diff engine for rowdiff.
//!
//! Computes the minimal, conflict-free set of deletes, inserts, moves and
//! updates that turns one ordered collection into another, and the
//! two-level equivalent for sectioned lists. The differs are pure,
//! synchronous functions: they borrow their inputs for the duration of the
//! call, allocate a fresh result, and never fail.
//!
//! # Key Types
//!
//! - [`diff`] / [`diff_with`] / [`diff_by`] -- Flat item diff
//! - [`diff_sections`] / [`diff_sections_with`] -- Section + item diff
//! - [`DiffConfig`] / [`MoveStrategy`] -- How matches are classified
//! - [`replay`] / [`replay_sections`] -- Apply a changeset with batch-update semantics
//! - [`SectionCache`] -- Caller-owned cache invalidated by a sectioned changeset

pub mod cache;
pub mod config;
pub mod error;
pub mod item_diff;
mod matching;
mod moves;
pub mod replay;
pub mod section_diff;

pub use cache::SectionCache;
pub use config::{DiffConfig, MoveStrategy};
pub use error::{EngineError, EngineResult};
pub use item_diff::{diff, diff_by, diff_with};
pub use replay::{replay, replay_sections};
pub use section_diff::{diff_sections, diff_sections_with};

pub use rowdiff_types::{
    Changeset, Diffable, DiffableSection, IndexPath, Keyed, Move, Section, SectionItemChanges,
    SectionedChangeset, Update,
};
