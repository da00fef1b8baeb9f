//! Error kinds raised by repository operations
//!
//! Filesystem failures are translated into these kinds at their origin so
//! callers can distinguish them: a missing object is not an empty object, a
//! corrupt commit is not a missing one, and a dirty working directory is a
//! refusal rather than an I/O error.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("not a minigit repository (run 'minigit init' first)")]
    NotARepository,

    #[error("minigit repository already initialized in {}", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("no such path: {}", .0.display())]
    NoSuchPath(PathBuf),

    #[error("not a regular file: {}", .0.display())]
    NotARegularFile(PathBuf),

    #[error("could not read file: {}", .0.display())]
    UnreadableFile(PathBuf),

    #[error("no commits yet")]
    NoCommits,

    #[error("branch '{0}' already exists")]
    BranchExists(String),

    #[error("branch or commit not found: {0}")]
    UnknownTarget(String),

    #[error("working directory has uncommitted changes; commit or discard them before checking out")]
    WorkingDirDirty,

    #[error("missing object: {0}")]
    MissingObject(String),

    #[error("corrupt commit record: {0}")]
    CorruptCommit(String),

    #[error("no changes to commit")]
    NoEffectiveChanges,
}

impl RepoError {
    /// Inspect an `anyhow` chain for a specific repository error kind
    pub fn from_anyhow(error: &anyhow::Error) -> Option<&RepoError> {
        error.downcast_ref::<RepoError>()
    }
}
