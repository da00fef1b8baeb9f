//! A miniature git-style version control engine
//!
//! Models the essential Git object model for a single local repository:
//! content-addressed blobs, commit snapshots forming a DAG, branch refs
//! with an attachable/detachable HEAD, an in-memory staging index, and
//! working-directory reconciliation. All persistent state lives under a
//! `.minigit` directory at the working root.
//!
//! The [`Repository`] facade is the entry point; each command is a method
//! on it. The CLI binary performs one operation per run, while the library
//! supports driving multi-step flows in-process (the staging index is
//! process-local and never persisted).

pub mod areas;
pub mod artifacts;
mod commands;

pub use areas::repository::Repository;
