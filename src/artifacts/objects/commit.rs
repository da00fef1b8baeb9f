//! Commit records
//!
//! A commit is an immutable snapshot: a flat tree mapping file names to blob
//! digests, an ordered parent list (empty for the root commit, one entry for
//! ordinary commits, two or more reserved for future merges), a message, and
//! an opaque timestamp string produced by the clock collaborator.
//!
//! ## Record format
//!
//! On disk, one UTF-8 text file per commit:
//!
//! ```text
//! message:<message>
//! timestamp:<timestamp>
//! parents:<digest> <digest> ...
//! files:
//! <path>:<digest>
//! ...
//! ```
//!
//! The commit's identity is the digest of the canonical concatenation
//! `message || timestamp || parents || (path || blob digest)*`, with the
//! tree iterated in its sorted order so the computation is stable.

use crate::artifacts::objects::digest::{digest_bytes, Digest};
use anyhow::Context;
use std::collections::BTreeMap;

/// Flat snapshot tree: file name to blob digest
pub type Tree = BTreeMap<String, Digest>;

/// Immutable commit record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    digest: Digest,
    message: String,
    timestamp: String,
    parents: Vec<Digest>,
    tree: Tree,
}

impl Commit {
    /// Create a new commit, deriving its digest from the canonical
    /// serialization of the other fields
    pub fn new(message: String, timestamp: String, parents: Vec<Digest>, tree: Tree) -> Self {
        let digest = Self::compute_digest(&message, &timestamp, &parents, &tree);
        Commit {
            digest,
            message,
            timestamp,
            parents,
            tree,
        }
    }

    fn compute_digest(message: &str, timestamp: &str, parents: &[Digest], tree: &Tree) -> Digest {
        let mut canonical = String::new();
        canonical.push_str(message);
        canonical.push_str(timestamp);
        for parent in parents {
            canonical.push_str(parent.as_str());
        }
        for (path, blob) in tree {
            canonical.push_str(path);
            canonical.push_str(blob.as_str());
        }
        digest_bytes(canonical.as_bytes())
    }

    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn parents(&self) -> &[Digest] {
        &self.parents
    }

    /// First parent, the one the log traversal follows
    pub fn first_parent(&self) -> Option<&Digest> {
        self.parents.first()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Serialize to the line-oriented record format
    pub fn serialize(&self) -> String {
        let mut lines = Vec::with_capacity(4 + self.tree.len());

        lines.push(format!("message:{}", self.message));
        lines.push(format!("timestamp:{}", self.timestamp));
        let parents = self
            .parents
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(format!("parents:{}", parents));
        lines.push("files:".to_string());
        for (path, blob) in &self.tree {
            lines.push(format!("{}:{}", path, blob));
        }

        let mut record = lines.join("\n");
        record.push('\n');
        record
    }

    /// Parse a record read back from disk
    ///
    /// The identity comes from the record's file name, not from the content.
    /// Missing or empty `message`/`timestamp` fields indicate a partially
    /// written record and fail the parse.
    pub fn parse(digest: Digest, content: &str) -> anyhow::Result<Self> {
        let mut message = None;
        let mut timestamp = None;
        let mut parents = Vec::new();
        let mut tree = Tree::new();

        let mut lines = content.lines();
        while let Some(line) = lines.next() {
            if let Some(rest) = line.strip_prefix("message:") {
                message = Some(rest.to_string());
            } else if let Some(rest) = line.strip_prefix("timestamp:") {
                timestamp = Some(rest.to_string());
            } else if let Some(rest) = line.strip_prefix("parents:") {
                for raw in rest.split_whitespace() {
                    parents.push(
                        Digest::try_parse(raw.to_string())
                            .with_context(|| format!("invalid parent digest {raw}"))?,
                    );
                }
            } else if line == "files:" {
                for entry in lines.by_ref() {
                    if entry.is_empty() {
                        break;
                    }
                    let (path, blob) = entry
                        .split_once(':')
                        .with_context(|| format!("invalid tree entry {entry}"))?;
                    tree.insert(
                        path.to_string(),
                        Digest::try_parse(blob.to_string())
                            .with_context(|| format!("invalid blob digest for {path}"))?,
                    );
                }
            }
        }

        let message = message
            .filter(|m| !m.is_empty())
            .context("missing message field")?;
        let timestamp = timestamp
            .filter(|t| !t.is_empty())
            .context("missing timestamp field")?;

        Ok(Commit {
            digest,
            message,
            timestamp,
            parents,
            tree,
        })
    }
}
