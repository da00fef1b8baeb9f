use crate::areas::commits::CommitLookup;
use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::RevisionContext;
use crate::artifacts::core::errors::RepoError;
use crate::artifacts::diff::line_diff::{diff_lines, DiffLine};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::digest::Digest;
use bytes::Bytes;
use colored::Colorize;
use std::collections::BTreeSet;
use std::io::Write;

impl Repository {
    /// Linewise diffs in four modes: working directory against the index,
    /// index against HEAD (`--staged`), working directory against a
    /// commit, and commit against commit
    pub fn diff(&self, staged: bool, targets: &[String]) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        match (staged, targets) {
            (true, []) => self.diff_index_against_head(),
            (false, []) => self.diff_workspace_against_index(),
            (false, [commit]) => self.diff_workspace_against_commit(commit),
            (false, [old, new]) => self.diff_between_commits(old, new),
            _ => anyhow::bail!("--staged does not take commit arguments"),
        }
    }

    fn diff_workspace_against_index(&self) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "Diff: Working Directory vs Staging Area (unstaged changes)"
        )?;

        let index = self.index().clone();
        let wd_files = self.workspace().list_files()?;
        let wd_set: BTreeSet<&String> = wd_files.iter().collect();
        let mut found = false;

        // untracked files are not the index's business here
        for file in &wd_files {
            let Some(staged) = index.get(file) else {
                continue;
            };
            let current = self.workspace().read_file(file)?;
            let staged_content = self.load_blob_or_empty(staged, file)?;
            if current != staged_content {
                self.print_line_diff(&staged_content, &current, file)?;
                found = true;
            }
        }

        for (path, digest) in index.entries() {
            if !wd_set.contains(path) {
                let staged_content = self.load_blob_or_empty(digest, path)?;
                self.print_line_diff(
                    &staged_content,
                    b"",
                    &format!("{path} (deleted from WD)"),
                )?;
                found = true;
            }
        }

        if !found {
            writeln!(
                self.writer(),
                "No differences in working directory compared to staged area."
            )?;
        }

        Ok(())
    }

    fn diff_index_against_head(&self) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "Diff: Staging Area vs HEAD commit (staged changes)"
        )?;

        let Some(head_commit) = self.head_commit()? else {
            writeln!(
                self.writer(),
                "No HEAD commit to compare against. Use `commit` first."
            )?;
            return Ok(());
        };
        let head_tree = head_commit.tree();
        let index = self.index().clone();

        let paths: BTreeSet<String> = index
            .entries()
            .map(|(path, _)| path.clone())
            .chain(head_tree.keys().cloned())
            .collect();

        let mut found = false;
        for path in paths {
            match (index.get(&path), head_tree.get(&path)) {
                (Some(staged), Some(committed)) if staged != committed => {
                    let old = self.load_blob_or_empty(committed, &path)?;
                    let new = self.load_blob_or_empty(staged, &path)?;
                    self.print_line_diff(&old, &new, &path)?;
                    found = true;
                }
                (None, Some(committed)) => {
                    let old = self.load_blob_or_empty(committed, &path)?;
                    self.print_line_diff(&old, b"", &format!("{path} (deleted from staged)"))?;
                    found = true;
                }
                (Some(staged), None) => {
                    let new = self.load_blob_or_empty(staged, &path)?;
                    self.print_line_diff(b"", &new, &format!("{path} (new file staged)"))?;
                    found = true;
                }
                _ => {}
            }
        }

        if !found {
            writeln!(self.writer(), "No staged changes to show.")?;
        }

        Ok(())
    }

    fn diff_workspace_against_commit(&self, target: &str) -> anyhow::Result<()> {
        let commit = self.resolve_diff_commit(target)?;

        writeln!(
            self.writer(),
            "Diff: Working Directory vs Commit {}",
            commit.digest().to_short()
        )?;

        let wd_files: BTreeSet<String> = self.workspace().list_files()?.into_iter().collect();
        let paths: BTreeSet<String> = wd_files
            .iter()
            .cloned()
            .chain(commit.tree().keys().cloned())
            .collect();

        let mut found = false;
        for path in paths {
            let in_workspace = wd_files.contains(&path);
            match (in_workspace, commit.tree().get(&path)) {
                (true, Some(committed)) => {
                    let current = self.workspace().read_file(&path)?;
                    let old = self.load_blob_or_empty(committed, &path)?;
                    if current != old {
                        self.print_line_diff(&old, &current, &path)?;
                        found = true;
                    }
                }
                (false, Some(committed)) => {
                    let old = self.load_blob_or_empty(committed, &path)?;
                    self.print_line_diff(&old, b"", &format!("{path} (deleted in WD)"))?;
                    found = true;
                }
                (true, None) => {
                    let current = self.workspace().read_file(&path)?;
                    self.print_line_diff(b"", &current, &format!("{path} (new in WD)"))?;
                    found = true;
                }
                (false, None) => {}
            }
        }

        if !found {
            writeln!(
                self.writer(),
                "No differences in working directory compared to commit {}.",
                commit.digest().to_short()
            )?;
        }

        Ok(())
    }

    fn diff_between_commits(&self, old: &str, new: &str) -> anyhow::Result<()> {
        let old_commit = self.resolve_diff_commit(old)?;
        let new_commit = self.resolve_diff_commit(new)?;

        writeln!(
            self.writer(),
            "Diff between {} and {}",
            old_commit.digest().to_short(),
            new_commit.digest().to_short()
        )?;

        let paths: BTreeSet<String> = old_commit
            .tree()
            .keys()
            .chain(new_commit.tree().keys())
            .cloned()
            .collect();

        let mut found = false;
        for path in paths {
            match (old_commit.tree().get(&path), new_commit.tree().get(&path)) {
                (Some(before), Some(after)) if before != after => {
                    let old_content = self.load_blob_or_empty(before, &path)?;
                    let new_content = self.load_blob_or_empty(after, &path)?;
                    self.print_line_diff(&old_content, &new_content, &path)?;
                    found = true;
                }
                (Some(before), None) => {
                    let old_content = self.load_blob_or_empty(before, &path)?;
                    self.print_line_diff(&old_content, b"", &format!("{path} (deleted)"))?;
                    found = true;
                }
                (None, Some(after)) => {
                    let new_content = self.load_blob_or_empty(after, &path)?;
                    self.print_line_diff(b"", &new_content, &format!("{path} (new file)"))?;
                    found = true;
                }
                _ => {}
            }
        }

        if !found {
            writeln!(self.writer(), "No differences between commits.")?;
        }

        Ok(())
    }

    /// Resolve a commit argument and load its record
    fn resolve_diff_commit(&self, target: &str) -> anyhow::Result<Commit> {
        let digest = RevisionContext::new(self).resolve_commit(target)?;

        match self.commits().read(&digest) {
            CommitLookup::Found(commit) => Ok(commit),
            CommitLookup::Missing => Err(RepoError::MissingObject(digest.to_string()).into()),
            CommitLookup::Corrupt => Err(RepoError::CorruptCommit(digest.to_string()).into()),
        }
    }

    /// Blob content for presentation; a missing blob warns and reads empty
    /// rather than aborting the whole diff
    fn load_blob_or_empty(&self, digest: &Digest, path: &str) -> anyhow::Result<Bytes> {
        match self.database().get(digest) {
            Ok(content) => Ok(content),
            Err(error) => match RepoError::from_anyhow(&error) {
                Some(RepoError::MissingObject(_)) => {
                    eprintln!("Warning: blob for {path} ({}) not found.", digest.to_short());
                    Ok(Bytes::new())
                }
                _ => Err(error),
            },
        }
    }

    fn print_line_diff(&self, old: &[u8], new: &[u8], label: &str) -> anyhow::Result<()> {
        writeln!(self.writer(), "{}", format!("--- Diff for: {label} ---").bold())?;

        for line in diff_lines(old, new) {
            let rendered = match &line {
                DiffLine::Unchanged(_) => line.to_string().normal(),
                DiffLine::Removed(_) => line.to_string().red(),
                DiffLine::Added(_) => line.to_string().green(),
            };
            writeln!(self.writer(), "{}", rendered)?;
        }

        writeln!(self.writer(), "---------------------------")?;

        Ok(())
    }
}
