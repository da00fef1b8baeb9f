//! Working directory access
//!
//! The working directory is the set of regular files immediately inside the
//! repository root. The scan is deliberately non-recursive and skips every
//! name whose first character is `.`, which also keeps the repository
//! directory itself out of view. All file I/O is binary.

use crate::artifacts::core::errors::RepoError;
use crate::artifacts::objects::digest::{digest_bytes, Digest};
use anyhow::Context;
use bytes::Bytes;
use std::path::Path;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of all visible regular files at the working root, sorted
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = Vec::new();

        for entry in std::fs::read_dir(&self.path)
            .with_context(|| format!("unable to scan working directory {}", self.path.display()))?
        {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => continue,
            };
            if name.starts_with('.') {
                continue;
            }
            files.push(name);
        }

        files.sort();
        Ok(files)
    }

    /// Read a file's bytes; empty files are valid and distinct from failures
    pub fn read_file(&self, name: &str) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(name);

        if !file_path.exists() {
            return Err(RepoError::NoSuchPath(file_path).into());
        }
        if !file_path.is_file() {
            return Err(RepoError::NotARegularFile(file_path).into());
        }

        let content = std::fs::read(&file_path).map_err(|_| RepoError::UnreadableFile(file_path))?;
        Ok(Bytes::from(content))
    }

    /// Read a file and compute its content digest
    pub fn hash_file(&self, name: &str) -> anyhow::Result<(Digest, Bytes)> {
        let content = self.read_file(name)?;
        Ok((digest_bytes(&content), content))
    }

    pub fn write_file(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(name);
        std::fs::write(&file_path, content)
            .with_context(|| format!("unable to write file {}", file_path.display()))
    }

    pub fn remove_file(&self, name: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(name);
        std::fs::remove_file(&file_path)
            .with_context(|| format!("unable to remove file {}", file_path.display()))
    }

    /// Digest every visible regular file, producing the scan the status
    /// classifier consumes
    pub fn scan(&self) -> anyhow::Result<std::collections::BTreeMap<String, Digest>> {
        let mut state = std::collections::BTreeMap::new();
        for name in self.list_files()? {
            let (digest, _) = self.hash_file(&name)?;
            state.insert(name, digest);
        }
        Ok(state)
    }
}
