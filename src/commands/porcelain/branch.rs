use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::errors::RepoError;
use std::io::Write;

impl Repository {
    /// Create a branch pointing at the current HEAD commit
    pub fn branch(&self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let commit = self
            .head()
            .commit()
            .cloned()
            .ok_or(RepoError::NoCommits)?;
        let name = BranchName::try_parse(name)?;

        if self.refs().branch_exists(&name) {
            return Err(RepoError::BranchExists(name.to_string()).into());
        }

        self.refs().write_branch(&name, Some(&commit))?;

        writeln!(
            self.writer(),
            "Created branch: {} pointing to {}",
            name,
            commit.to_short()
        )?;

        Ok(())
    }
}
