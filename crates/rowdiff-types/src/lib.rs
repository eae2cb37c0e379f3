//! Foundation types for rowdiff.
//!
//! This crate defines what a value must expose to take part in a diff and
//! the pure result values a diff produces. Every other rowdiff crate
//! depends on `rowdiff-types`; it knows nothing about any UI toolkit.
//!
//! # Key Types
//!
//! - [`Diffable`] / [`DiffableSection`] -- Identity + content-equality capabilities
//! - [`Keyed`] / [`Section`] -- Ready-made carriers implementing those capabilities
//! - [`Changeset`] / [`Move`] / [`Update`] -- Flat deletes, inserts, moves and updates
//! - [`SectionedChangeset`] / [`SectionItemChanges`] / [`IndexPath`] -- Two-level result
//! - [`ChangesetError`] -- Raised by self-consistency checks, never by a diff

pub mod changeset;
pub mod diffable;
pub mod error;
pub mod section;

pub use changeset::{Changeset, Move, Update};
pub use diffable::{Diffable, DiffableSection, Keyed, Section};
pub use error::{ChangesetError, ChangesetResult, Side};
pub use section::{IndexPath, SectionItemChanges, SectionedChangeset};
