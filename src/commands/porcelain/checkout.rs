use crate::areas::commits::CommitLookup;
use crate::areas::refs::HeadState;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::revision::{ResolvedTarget, RevisionContext};
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::errors::RepoError;
use crate::artifacts::objects::digest::Digest;
use std::io::Write;

impl Repository {
    /// Switch to a branch or commit, reconciling the working directory
    ///
    /// Refuses outright when anything is staged, modified, or untracked:
    /// the status is displayed and nothing on disk or in memory moves.
    pub fn checkout(&self, target: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let report = self.status_report()?;
        if !report.is_clean() {
            self.print_status_report(&report)?;
            return Err(RepoError::WorkingDirDirty.into());
        }

        match RevisionContext::new(self).resolve(target)? {
            ResolvedTarget::Branch { name, commit: None } => self.checkout_empty_branch(name),
            ResolvedTarget::Branch {
                name,
                commit: Some(digest),
            } => self.checkout_commit(Some(name), digest),
            ResolvedTarget::Commit(digest) => self.checkout_commit(None, digest),
        }
    }

    /// A branch with no commits has no snapshot to restore; the working
    /// root is simply emptied
    fn checkout_empty_branch(&self, name: BranchName) -> anyhow::Result<()> {
        if self.head().branch() == Some(&name) {
            writeln!(self.writer(), "Already on branch '{}'.", name)?;
            return Ok(());
        }

        for file in self.workspace().list_files()? {
            self.workspace().remove_file(&file)?;
        }

        let head = HeadState::attached(name.clone(), None);
        self.refs().write_head(&head)?;
        self.set_head(head);
        self.index_mut().clear();

        writeln!(
            self.writer(),
            "Switched to branch: {} (empty branch, no files restored).",
            name
        )?;

        Ok(())
    }

    fn checkout_commit(&self, branch: Option<BranchName>, digest: Digest) -> anyhow::Result<()> {
        let current = self.head().clone();
        if current.commit() == Some(&digest) {
            match (&branch, current.branch()) {
                (Some(name), Some(attached)) if name == attached => {
                    writeln!(self.writer(), "Already on branch '{}'.", name)?;
                    return Ok(());
                }
                (None, None) => {
                    writeln!(
                        self.writer(),
                        "Already on commit {} (detached HEAD).",
                        digest.to_short()
                    )?;
                    return Ok(());
                }
                _ => {}
            }
        }

        let commit = match self.commits().read(&digest) {
            CommitLookup::Found(commit) => commit,
            CommitLookup::Missing => {
                return Err(RepoError::MissingObject(digest.to_string()).into());
            }
            CommitLookup::Corrupt => {
                return Err(RepoError::CorruptCommit(digest.to_string()).into());
            }
        };

        // materialize first; HEAD moves only once the tree is on disk
        let removed = Migration::new(self.workspace(), self.database(), commit.tree()).apply()?;
        for file in &removed {
            writeln!(self.writer(), "Removed: {}", file)?;
        }
        writeln!(
            self.writer(),
            "Working directory updated to commit {}.",
            digest.to_short()
        )?;

        let head = match branch {
            Some(name) => HeadState::attached(name, Some(digest.clone())),
            None => HeadState::detached(digest.clone()),
        };
        self.refs().write_head(&head)?;

        match head.branch() {
            Some(name) => writeln!(self.writer(), "Switched to branch: {}", name)?,
            None => writeln!(
                self.writer(),
                "Checked out commit: {} (detached HEAD)",
                digest.to_short()
            )?,
        }

        self.set_head(head);
        self.index_mut().clear();

        Ok(())
    }
}
