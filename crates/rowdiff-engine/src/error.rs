//! Error types for the engine crate.

use rowdiff_types::ChangesetError;

/// Errors that can occur outside of diffing itself.
///
/// Diffing never fails; these come from replaying a changeset against
/// collections it does not describe, or from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The changeset does not partition the collections it was applied to.
    #[error("inconsistent changeset: {0}")]
    Changeset(#[from] ChangesetError),

    /// Configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Convenience alias for engine results.
pub type EngineResult<T> = Result<T, EngineError>;
