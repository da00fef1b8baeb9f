//! Tree materialization
//!
//! Reconciles the working root with a target tree: every tree entry is
//! written over the working copy in binary mode, then every visible file
//! the tree does not mention is deleted. A blob missing from the object
//! store is a per-file warning on stderr; the remaining files still
//! materialize and the file already on disk at that path is left alone.

use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::errors::RepoError;
use crate::artifacts::objects::commit::Tree;
use derive_new::new;
use std::collections::BTreeSet;

#[derive(new)]
pub struct Migration<'a> {
    workspace: &'a Workspace,
    database: &'a Database,
    tree: &'a Tree,
}

impl Migration<'_> {
    /// Apply the target tree; returns the files deleted from the root
    pub fn apply(&self) -> anyhow::Result<Vec<String>> {
        let mut leftover: BTreeSet<String> =
            self.workspace.list_files()?.into_iter().collect();

        for (path, digest) in self.tree {
            leftover.remove(path);

            match self.database.get(digest) {
                Ok(content) => {
                    if let Err(error) = self.workspace.write_file(path, &content) {
                        eprintln!("Warning: could not write file {path}: {error:#}. Skipping.");
                    }
                }
                Err(error) => {
                    match RepoError::from_anyhow(&error) {
                        Some(RepoError::MissingObject(_)) => {
                            eprintln!(
                                "Warning: blob for {path} ({}) not found. Skipping.",
                                digest.to_short()
                            );
                        }
                        _ => return Err(error),
                    }
                }
            }
        }

        let mut removed = Vec::new();
        for path in leftover {
            match self.workspace.remove_file(&path) {
                Ok(()) => removed.push(path),
                Err(error) => eprintln!("Warning: could not remove file {path}: {error:#}"),
            }
        }

        Ok(removed)
    }
}
