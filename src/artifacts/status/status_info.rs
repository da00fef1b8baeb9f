use crate::areas::index::Index;
use crate::artifacts::objects::commit::Tree;
use crate::artifacts::status::file_change::{StagedChange, UnstagedChange};
use crate::artifacts::status::inspector::{Inspector, WorkspaceState};
use std::collections::BTreeMap;

/// The tri-state partition of every path the repository knows about
///
/// `staged` compares the index against the HEAD tree; `unstaged` compares
/// the working directory against the index (or HEAD, for unstaged paths)
/// and includes untracked files. Both maps are ordered by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    staged: BTreeMap<String, StagedChange>,
    unstaged: BTreeMap<String, UnstagedChange>,
}

impl StatusReport {
    pub fn build(head_tree: &Tree, index: &Index, workspace: &WorkspaceState) -> Self {
        let inspector = Inspector::new(head_tree, index, workspace);

        let mut staged = BTreeMap::new();
        for (path, digest) in index.entries() {
            if let Some(change) = inspector.classify_staged(path, digest) {
                staged.insert(path.clone(), change);
            }
        }
        for path in head_tree.keys() {
            if let Some(change) = inspector.classify_staged_deletion(path) {
                staged.insert(path.clone(), change);
            }
        }

        let mut unstaged = BTreeMap::new();
        for (path, digest) in workspace {
            if let Some(change) = inspector.classify_workspace_file(path, digest) {
                unstaged.insert(path.clone(), change);
            }
        }
        for path in head_tree.keys() {
            if let Some(change) = inspector.classify_workspace_deletion(path) {
                unstaged.insert(path.clone(), change);
            }
        }

        StatusReport { staged, unstaged }
    }

    pub fn is_clean(&self) -> bool {
        self.staged.is_empty() && self.unstaged.is_empty()
    }

    pub fn staged(&self) -> &BTreeMap<String, StagedChange> {
        &self.staged
    }

    pub fn has_staged(&self) -> bool {
        !self.staged.is_empty()
    }

    /// Paths staged for deletion, the set the commit engine removes from the
    /// new snapshot
    pub fn staged_deletions(&self) -> impl Iterator<Item = &String> {
        self.staged
            .iter()
            .filter(|(_, change)| **change == StagedChange::Deleted)
            .map(|(path, _)| path)
    }

    /// Unstaged modifications and deletions, untracked files excluded
    pub fn unstaged_changes(&self) -> impl Iterator<Item = (&String, &UnstagedChange)> {
        self.unstaged
            .iter()
            .filter(|(_, change)| !change.is_untracked())
    }

    pub fn has_unstaged_changes(&self) -> bool {
        self.unstaged_changes().next().is_some()
    }

    pub fn untracked(&self) -> impl Iterator<Item = &String> {
        self.unstaged
            .iter()
            .filter(|(_, change)| change.is_untracked())
            .map(|(path, _)| path)
    }

    pub fn has_untracked(&self) -> bool {
        self.untracked().next().is_some()
    }

    pub fn unstaged_kind(&self, path: &str) -> Option<&UnstagedChange> {
        self.unstaged.get(path)
    }

    pub fn staged_kind(&self, path: &str) -> Option<&StagedChange> {
        self.staged.get(path)
    }
}
