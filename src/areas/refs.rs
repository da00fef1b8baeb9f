//! Branch references and the HEAD pointer
//!
//! Each branch is one file under `refs/heads/` holding a commit digest, or
//! the empty string for a branch with no commits yet. HEAD has two on-disk
//! forms, told apart by prefix:
//!
//! - `ref: refs/heads/<branch>` — attached to a branch
//! - `<digest>` — detached at a concrete commit
//!
//! When a ref and HEAD are updated together, the branch file is written
//! first so an interrupted run never leaves HEAD naming a branch that has
//! not caught up; a detached update touches only HEAD.

use crate::artifacts::branch::branch_name::{BranchName, DEFAULT_BRANCH};
use crate::artifacts::objects::digest::Digest;
use anyhow::Context;
use derive_new::new;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Regex for the symbolic HEAD form
const SYMREF_REGEX: &str = r"^ref: refs/heads/(.+)$";

/// Name of the HEAD file
pub const HEAD_FILE: &str = "HEAD";

/// The two-field HEAD representation: an empty branch means detached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadState {
    branch: Option<BranchName>,
    commit: Option<Digest>,
}

impl HeadState {
    pub fn attached(branch: BranchName, commit: Option<Digest>) -> Self {
        HeadState {
            branch: Some(branch),
            commit,
        }
    }

    pub fn detached(commit: Digest) -> Self {
        HeadState {
            branch: None,
            commit: Some(commit),
        }
    }

    pub fn branch(&self) -> Option<&BranchName> {
        self.branch.as_ref()
    }

    pub fn commit(&self) -> Option<&Digest> {
        self.commit.as_ref()
    }

    pub fn is_detached(&self) -> bool {
        self.branch.is_none()
    }

    /// The state after the current position advances to a new commit
    pub fn advanced_to(&self, commit: Digest) -> Self {
        HeadState {
            branch: self.branch.clone(),
            commit: Some(commit),
        }
    }
}

impl Default for HeadState {
    /// The fresh-repository position: attached to the default branch with
    /// no commits
    fn default() -> Self {
        HeadState::attached(
            BranchName::try_parse(DEFAULT_BRANCH).expect("default branch name is valid"),
            None,
        )
    }
}

/// Reference manager rooted at the repository directory
#[derive(Debug, new)]
pub struct Refs {
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_FILE)
    }

    pub fn heads_path(&self) -> PathBuf {
        self.path.join("refs").join("heads")
    }

    pub fn branch_path(&self, name: &BranchName) -> PathBuf {
        self.heads_path().join(name.as_str())
    }

    pub fn branch_exists(&self, name: &BranchName) -> bool {
        self.branch_path(name).is_file()
    }

    /// Commit digest a branch points to; `None` when the branch exists but
    /// has no commits (or when no ref file exists at all)
    pub fn read_branch(&self, name: &BranchName) -> anyhow::Result<Option<Digest>> {
        let ref_path = self.branch_path(name);
        if !ref_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&ref_path)
            .with_context(|| format!("unable to read ref file {}", ref_path.display()))?;
        let content = content.trim();

        if content.is_empty() {
            Ok(None)
        } else {
            Digest::try_parse(content.to_string())
                .map(Some)
                .with_context(|| format!("invalid digest in ref file {}", ref_path.display()))
        }
    }

    /// Write a branch ref, creating parent directories for hierarchical
    /// names; `None` records the branch as existing with no commits
    pub fn write_branch(&self, name: &BranchName, digest: Option<&Digest>) -> anyhow::Result<()> {
        let ref_path = self.branch_path(name);
        let parent = ref_path
            .parent()
            .with_context(|| format!("invalid ref path {}", ref_path.display()))?;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("unable to create ref directory {}", parent.display()))?;

        let content = match digest {
            Some(digest) => format!("{}\n", digest),
            None => String::new(),
        };
        std::fs::write(&ref_path, content)
            .with_context(|| format!("unable to write ref file {}", ref_path.display()))
    }

    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads = self.heads_path();
        if !heads.exists() {
            return Ok(Vec::new());
        }

        let mut branches: Vec<BranchName> = WalkDir::new(&heads)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(&heads).ok()?;
                BranchName::try_parse(relative.to_string_lossy().as_ref()).ok()
            })
            .collect();
        branches.sort();
        Ok(branches)
    }

    /// Read HEAD into the two-field representation
    ///
    /// A missing HEAD file reads as the fresh-repository position so a
    /// half-initialized directory still presents a consistent view.
    pub fn read_head(&self) -> anyhow::Result<HeadState> {
        let head_path = self.head_path();
        if !head_path.exists() {
            return Ok(HeadState::default());
        }

        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("unable to read HEAD file {}", head_path.display()))?;
        let content = content.trim();

        let symref = regex::Regex::new(SYMREF_REGEX).context("invalid symref regex")?;
        if let Some(captures) = symref.captures(content) {
            let branch = BranchName::try_parse(&captures[1])
                .with_context(|| format!("invalid branch name in HEAD: {}", &captures[1]))?;
            let commit = self.read_branch(&branch)?;
            Ok(HeadState::attached(branch, commit))
        } else {
            let digest = Digest::try_parse(content.to_string())
                .with_context(|| format!("unrecognized HEAD content: {content}"))?;
            Ok(HeadState::detached(digest))
        }
    }

    /// Persist a HEAD position, branch ref first when attached
    pub fn write_head(&self, head: &HeadState) -> anyhow::Result<()> {
        let content = match head.branch() {
            Some(branch) => {
                if head.commit().is_some() {
                    self.write_branch(branch, head.commit())?;
                }
                format!("ref: refs/heads/{}\n", branch)
            }
            None => {
                let commit = head
                    .commit()
                    .context("detached HEAD must name a commit")?;
                format!("{}\n", commit)
            }
        };

        let head_path = self.head_path();
        std::fs::write(&head_path, content)
            .with_context(|| format!("unable to write HEAD file {}", head_path.display()))
    }

    /// Map every commit digest to the branches pointing at it
    pub fn reverse_refs(&self) -> anyhow::Result<HashMap<Digest, Vec<BranchName>>> {
        let mut reverse: HashMap<Digest, Vec<BranchName>> = HashMap::new();
        for branch in self.list_branches()? {
            if let Some(digest) = self.read_branch(&branch)? {
                reverse.entry(digest).or_default().push(branch);
            }
        }
        Ok(reverse)
    }
}
