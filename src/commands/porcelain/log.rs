use crate::areas::commits::CommitLookup;
use crate::areas::repository::Repository;
use colored::Colorize;
use std::collections::HashSet;
use std::io::Write;

impl Repository {
    /// Walk the first-parent chain from HEAD
    ///
    /// The visited set is a guard against malformed cycles; well-formed
    /// histories never revisit a commit. A corrupt reference stops the
    /// traversal with a report on stderr.
    pub fn log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let head = self.head().clone();
        let Some(start) = head.commit().cloned() else {
            writeln!(self.writer(), "No commits yet.")?;
            return Ok(());
        };

        let reverse_refs = self.refs().reverse_refs()?;

        writeln!(self.writer(), "--- Commit History ---")?;

        let mut visited = HashSet::new();
        let mut current = Some(start);

        while let Some(digest) = current {
            if !visited.insert(digest.clone()) {
                break;
            }

            let commit = match self.commits().read(&digest) {
                CommitLookup::Found(commit) => commit,
                CommitLookup::Missing | CommitLookup::Corrupt => {
                    eprintln!("Error: corrupt commit reference {digest}. Stopping log.");
                    break;
                }
            };

            let mut decorations = Vec::new();
            if head.commit() == Some(&digest) {
                match head.branch() {
                    Some(branch) => {
                        decorations.push(format!("HEAD -> {}", branch).green().to_string());
                    }
                    None => decorations.push("HEAD, detached".green().to_string()),
                }
            }
            if let Some(branches) = reverse_refs.get(&digest) {
                for branch in branches {
                    if head.branch() == Some(branch) {
                        continue;
                    }
                    decorations.push(branch.to_string());
                }
            }
            let decoration = if decorations.is_empty() {
                String::new()
            } else {
                format!(" ({})", decorations.join(", "))
            };

            writeln!(
                self.writer(),
                "Commit: {}{}",
                digest.to_short().yellow(),
                decoration
            )?;
            if !commit.parents().is_empty() {
                let parents = commit
                    .parents()
                    .iter()
                    .map(|parent| parent.to_short().to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                writeln!(self.writer(), "Parents: {}", parents)?;
            }
            writeln!(self.writer(), "Date:    {}", commit.timestamp())?;
            writeln!(self.writer(), "Message: {}", commit.message())?;
            writeln!(self.writer())?;

            current = commit.first_parent().cloned();
        }

        writeln!(self.writer(), "----------------------")?;

        Ok(())
    }
}
