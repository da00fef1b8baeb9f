//! Commit record store
//!
//! Persists commit records under `.minigit/commits/<digest>` in the
//! line-oriented text format and keeps an in-memory cache keyed by digest.
//! The cache is populated eagerly at startup; digests first referenced
//! later are loaded lazily on demand.
//!
//! Reads return [`CommitLookup`] so that "the record does not exist" and
//! "the record exists but cannot be trusted" stay distinguishable; a
//! corrupt record is never smuggled through as an empty commit.

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::digest::Digest;
use anyhow::Context;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

/// Outcome of a commit-store read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitLookup {
    Found(Commit),
    Missing,
    Corrupt,
}

#[derive(Debug)]
pub struct CommitStore {
    /// Path to the commits directory
    path: Box<Path>,
    cache: HashMap<Digest, Commit>,
}

impl CommitStore {
    pub fn new(path: Box<Path>) -> Self {
        CommitStore {
            path,
            cache: HashMap::new(),
        }
    }

    pub fn commits_path(&self) -> &Path {
        &self.path
    }

    /// Eagerly load every record in the commits directory into the cache
    ///
    /// Corrupt records are reported on stderr and skipped; they will also
    /// surface as [`CommitLookup::Corrupt`] if anything references them.
    pub fn load_all(&mut self) -> anyhow::Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        for entry in std::fs::read_dir(&self.path)
            .with_context(|| format!("unable to scan commits directory {}", self.path.display()))?
        {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            let digest = match Digest::try_parse(name.clone()) {
                Ok(digest) => digest,
                Err(_) => {
                    eprintln!("Warning: ignoring stray file in commits directory: {name}");
                    continue;
                }
            };

            match self.load_record(&digest) {
                Ok(commit) => {
                    self.cache.insert(digest, commit);
                }
                Err(error) => {
                    eprintln!("Warning: corrupt commit record {digest}: {error:#}");
                }
            }
        }

        Ok(())
    }

    fn load_record(&self, digest: &Digest) -> anyhow::Result<Commit> {
        let record_path = self.path.join(digest.to_file_name());
        let content = std::fs::read_to_string(&record_path)
            .with_context(|| format!("unable to read commit record {}", record_path.display()))?;
        Commit::parse(digest.clone(), &content)
    }

    /// Persist a commit record, all-or-nothing
    ///
    /// The record is written to a temporary name and renamed into place; a
    /// partially written file never carries a valid digest name, so `read`
    /// can always detect the truncation.
    pub fn write(&mut self, commit: &Commit) -> anyhow::Result<()> {
        let digest = commit.digest();
        let record_path = self.path.join(digest.to_file_name());
        let temp_path = self.path.join(format!("tmp-{}", digest));

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("unable to open commit record {}", temp_path.display()))?;
        file.write_all(commit.serialize().as_bytes())
            .with_context(|| format!("unable to write commit record {}", temp_path.display()))?;

        std::fs::rename(&temp_path, &record_path).with_context(|| {
            format!("unable to rename commit record to {}", record_path.display())
        })?;

        self.cache.insert(digest.clone(), commit.clone());
        Ok(())
    }

    /// Look up a commit, filling the cache from disk when needed
    pub fn read(&mut self, digest: &Digest) -> CommitLookup {
        if !self.cache.contains_key(digest) {
            let record_path = self.path.join(digest.to_file_name());
            if !record_path.exists() {
                return CommitLookup::Missing;
            }
            match self.load_record(digest) {
                Ok(commit) => {
                    self.cache.insert(digest.clone(), commit);
                }
                Err(_) => return CommitLookup::Corrupt,
            }
        }

        match self.cache.get(digest) {
            Some(commit) => CommitLookup::Found(commit.clone()),
            None => CommitLookup::Missing,
        }
    }

    pub fn contains(&self, digest: &Digest) -> bool {
        self.cache.contains_key(digest) || self.path.join(digest.to_file_name()).exists()
    }

    /// All known commit digests starting with the given prefix
    pub fn find_by_prefix(&self, prefix: &str) -> Vec<Digest> {
        let mut matches: Vec<Digest> = self
            .cache
            .keys()
            .filter(|digest| digest.matches_prefix(prefix))
            .cloned()
            .collect();
        matches.sort();
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::commit::Tree;
    use crate::artifacts::objects::digest::digest_bytes;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;

    fn store_in(dir: &assert_fs::TempDir) -> CommitStore {
        let commits = dir.child("commits");
        commits.create_dir_all().unwrap();
        CommitStore::new(commits.path().to_path_buf().into_boxed_path())
    }

    fn sample_commit() -> Commit {
        let mut tree = Tree::new();
        tree.insert("file.txt".to_string(), digest_bytes(b"content"));
        Commit::new(
            "Add file.txt".to_string(),
            "2024-05-01 10:00:00".to_string(),
            vec![],
            tree,
        )
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = assert_fs::TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let commit = sample_commit();

        store.write(&commit).unwrap();

        assert_eq!(store.read(commit.digest()), CommitLookup::Found(commit));
    }

    #[test]
    fn reload_from_disk_yields_equal_records() {
        let dir = assert_fs::TempDir::new().unwrap();
        let commit = sample_commit();
        store_in(&dir).write(&commit).unwrap();

        let mut reloaded = store_in(&dir);
        reloaded.load_all().unwrap();

        assert_eq!(reloaded.read(commit.digest()), CommitLookup::Found(commit));
    }

    #[test]
    fn unknown_digest_is_missing() {
        let dir = assert_fs::TempDir::new().unwrap();
        let mut store = store_in(&dir);

        let lookup = store.read(&digest_bytes(b"nothing here"));

        assert_eq!(lookup, CommitLookup::Missing);
    }

    #[test]
    fn truncated_record_is_corrupt_not_missing() {
        let dir = assert_fs::TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let digest = digest_bytes(b"half written");
        std::fs::write(store.commits_path().join(digest.as_str()), "message:Oops\n").unwrap();

        assert_eq!(store.read(&digest), CommitLookup::Corrupt);
    }

    #[test]
    fn prefix_search_covers_loaded_records() {
        let dir = assert_fs::TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let commit = sample_commit();
        store.write(&commit).unwrap();

        let matches = store.find_by_prefix(&commit.digest().as_str()[..4]);

        assert_eq!(matches, vec![commit.digest().clone()]);
    }
}
