use crate::areas::repository::Repository;
use crate::artifacts::core::clock;
use crate::artifacts::core::errors::RepoError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::status::status_info::StatusReport;
use std::io::Write;

impl Repository {
    /// Record the staged delta as a new commit and advance HEAD
    ///
    /// Nothing staged is not an error: the index is cleared, a notice is
    /// printed, and no commit is created. Persistence order is blobs
    /// (already written by `add`), commit record, branch ref, HEAD; a
    /// failure at any step leaves the in-memory position unchanged.
    pub fn commit(&self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let planned = match self.plan_commit(message) {
            Ok(commit) => commit,
            Err(error) => {
                if matches!(
                    RepoError::from_anyhow(&error),
                    Some(RepoError::NoEffectiveChanges)
                ) {
                    self.index_mut().clear();
                    writeln!(
                        self.writer(),
                        "No changes to commit. Staging area is empty or identical to HEAD."
                    )?;
                    return Ok(());
                }
                return Err(error);
            }
        };

        self.commits().write(&planned)?;

        let advanced = self.head().advanced_to(planned.digest().clone());
        self.refs().write_head(&advanced)?;
        self.set_head(advanced);
        self.index_mut().clear();

        writeln!(self.writer(), "Committed as {}", planned.digest().to_short())?;

        Ok(())
    }

    /// Derive the next snapshot: HEAD tree overlaid with the index, minus
    /// the staged deletions
    fn plan_commit(&self, message: &str) -> anyhow::Result<Commit> {
        let head_tree = self.head_tree()?;
        let workspace = self.workspace().scan()?;
        let index = self.index();
        let report = StatusReport::build(&head_tree, &index, &workspace);

        if !report.has_staged() {
            return Err(RepoError::NoEffectiveChanges.into());
        }

        let mut tree = head_tree;
        for (path, digest) in index.entries() {
            tree.insert(path.clone(), digest.clone());
        }
        for path in report.staged_deletions() {
            tree.remove(path);
        }

        let parents = self.head().commit().cloned().into_iter().collect();
        let timestamp = clock::local_timestamp();

        Ok(Commit::new(message.to_string(), timestamp, parents, tree))
    }
}
