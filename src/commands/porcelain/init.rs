use crate::areas::refs::HeadState;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{BranchName, DEFAULT_BRANCH};
use crate::artifacts::core::errors::RepoError;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    pub fn init(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(RepoError::AlreadyInitialized(self.repo_path()).into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("failed to create objects directory")?;
        fs::create_dir_all(self.commits().commits_path())
            .context("failed to create commits directory")?;
        fs::create_dir_all(self.refs().heads_path())
            .context("failed to create refs directory")?;

        // the default branch exists from the start, with no commits
        let master = BranchName::try_parse(DEFAULT_BRANCH)?;
        self.refs().write_branch(&master, None)?;

        let head = HeadState::attached(master, None);
        self.refs().write_head(&head)?;
        self.set_head(head);

        writeln!(
            self.writer(),
            "Initialized empty minigit repository in {}",
            self.repo_path().display()
        )?;

        Ok(())
    }
}
