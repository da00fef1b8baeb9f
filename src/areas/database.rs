//! Blob object store
//!
//! Content-addressed storage for file blobs. Each blob lives in a single
//! file named by its digest, holding the raw bytes, written in binary mode:
//! `.minigit/objects/<digest>`. Writing the same content twice is a no-op,
//! and a missing object is always distinguishable from an empty one (the
//! empty blob has a perfectly valid digest and an empty file of its own).

use crate::artifacts::core::errors::RepoError;
use crate::artifacts::objects::digest::{digest_bytes, Digest};
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::Path;

#[derive(Debug)]
pub struct Database {
    /// Path to the objects directory
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store a blob, keyed by the digest of its content
    ///
    /// Idempotent: existing objects are left untouched. New objects are
    /// written to a temporary name and renamed into place so a partial
    /// write never shadows the digest.
    pub fn put(&self, content: &[u8]) -> anyhow::Result<Digest> {
        let digest = digest_bytes(content);
        let object_path = self.path.join(digest.to_file_name());

        if !object_path.exists() {
            let temp_path = self.path.join(format!("tmp-{}", digest));

            let mut file = std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("unable to open object file {}", temp_path.display()))?;
            file.write_all(content)
                .with_context(|| format!("unable to write object file {}", temp_path.display()))?;

            std::fs::rename(&temp_path, &object_path).with_context(|| {
                format!("unable to rename object file to {}", object_path.display())
            })?;
        }

        Ok(digest)
    }

    /// Retrieve a blob's bytes
    pub fn get(&self, digest: &Digest) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(digest.to_file_name());

        if !object_path.exists() {
            return Err(RepoError::MissingObject(digest.to_string()).into());
        }

        let content = std::fs::read(&object_path)
            .with_context(|| format!("unable to read object file {}", object_path.display()))?;
        Ok(Bytes::from(content))
    }

    pub fn contains(&self, digest: &Digest) -> bool {
        self.path.join(digest.to_file_name()).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn database_in(dir: &assert_fs::TempDir) -> Database {
        let objects = dir.child("objects");
        objects.create_dir_all().unwrap();
        Database::new(objects.path().to_path_buf().into_boxed_path())
    }

    #[test]
    fn put_then_get_round_trips_exact_bytes() {
        let dir = assert_fs::TempDir::new().unwrap();
        let database = database_in(&dir);
        let content = b"Line 1\nLine 2\n\x00binary tail";

        let digest = database.put(content).unwrap();

        assert_eq!(database.get(&digest).unwrap().as_ref(), content);
    }

    #[test]
    fn put_is_idempotent() {
        let dir = assert_fs::TempDir::new().unwrap();
        let database = database_in(&dir);

        let first = database.put(b"same content").unwrap();
        let second = database.put(b"same content").unwrap();

        assert_eq!(first, second);
        let entries = std::fs::read_dir(database.objects_path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn empty_blob_is_valid_and_distinct_from_missing() {
        let dir = assert_fs::TempDir::new().unwrap();
        let database = database_in(&dir);

        let empty = database.put(b"").unwrap();
        assert!(database.get(&empty).unwrap().is_empty());

        let unknown = digest_bytes(b"never stored");
        let err = database.get(&unknown).unwrap_err();
        assert!(matches!(
            RepoError::from_anyhow(&err),
            Some(RepoError::MissingObject(_))
        ));
    }
}
