//! Classification rules
//!
//! Pure comparisons over the three views of a path. The index shadows HEAD:
//! when a path is staged, the working copy is judged against the staged
//! digest, not the committed one. A staged deletion is never recorded in the
//! index; it is inferred when a committed path is absent from both the index
//! and the working directory.

use crate::areas::index::Index;
use crate::artifacts::objects::commit::Tree;
use crate::artifacts::objects::digest::Digest;
use crate::artifacts::status::file_change::{StagedChange, UnstagedChange};
use derive_new::new;
use std::collections::BTreeMap;

/// Digest of every regular file currently at the working root
pub type WorkspaceState = BTreeMap<String, Digest>;

#[derive(new)]
pub struct Inspector<'a> {
    head_tree: &'a Tree,
    index: &'a Index,
    workspace: &'a WorkspaceState,
}

impl Inspector<'_> {
    /// Index entry against the HEAD tree
    pub fn classify_staged(&self, path: &str, staged: &Digest) -> Option<StagedChange> {
        match self.head_tree.get(path) {
            None => Some(StagedChange::Added),
            Some(committed) if committed != staged => Some(StagedChange::Modified),
            Some(_) => None,
        }
    }

    /// Committed path with no index entry: a deletion, once it is also gone
    /// from the working directory
    pub fn classify_staged_deletion(&self, path: &str) -> Option<StagedChange> {
        if !self.index.contains(path) && !self.workspace.contains_key(path) {
            Some(StagedChange::Deleted)
        } else {
            None
        }
    }

    /// Working file against the index first, HEAD second
    pub fn classify_workspace_file(&self, path: &str, current: &Digest) -> Option<UnstagedChange> {
        if let Some(staged) = self.index.get(path) {
            if staged != current {
                Some(UnstagedChange::ModifiedSinceStage)
            } else {
                None
            }
        } else if let Some(committed) = self.head_tree.get(path) {
            if committed != current {
                Some(UnstagedChange::Modified)
            } else {
                None
            }
        } else {
            Some(UnstagedChange::Untracked)
        }
    }

    /// Committed path missing from both the working directory and the index
    pub fn classify_workspace_deletion(&self, path: &str) -> Option<UnstagedChange> {
        if !self.workspace.contains_key(path) && !self.index.contains(path) {
            Some(UnstagedChange::Deleted)
        } else {
            None
        }
    }
}
