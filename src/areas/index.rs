//! Staging index
//!
//! The index is the overlay describing what the next commit will contain,
//! as a delta on top of the HEAD tree. It lives only in memory: empty at
//! process start, cleared by a successful commit or checkout, and never
//! written to disk. A deletion is never staged explicitly; it is inferred
//! by the status classifier when a committed path is absent from both the
//! index and the working directory.

use crate::artifacts::objects::digest::Digest;
use std::collections::BTreeMap;

/// Path to blob digest mapping for the next commit
#[derive(Debug, Clone, Default)]
pub struct Index {
    entries: BTreeMap<String, Digest>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a path at a digest, replacing any prior entry
    pub fn stage(&mut self, path: String, digest: Digest) {
        self.entries.insert(path, digest);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, path: &str) -> Option<&Digest> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &Digest)> {
        self.entries.iter()
    }
}
