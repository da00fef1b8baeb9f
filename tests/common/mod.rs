#![allow(dead_code)]

use assert_fs::TempDir;
use minigit::Repository;
use rstest::fixture;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Captures everything a repository writes to its output
#[derive(Debug, Clone, Default)]
pub struct OutputBuffer(Arc<Mutex<Vec<u8>>>);

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }

    pub fn take(&self) -> String {
        let mut locked = self.0.lock().unwrap();
        let contents = String::from_utf8_lossy(&locked).to_string();
        locked.clear();
        contents
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("failed to create temp dir")
}

/// Open a repository rooted at `dir`, capturing its output
pub fn open_repository(dir: &Path) -> (Repository, OutputBuffer) {
    let buffer = OutputBuffer::new();
    let repository = Repository::new(dir.to_path_buf(), Box::new(buffer.clone()))
        .expect("failed to open repository");
    (repository, buffer)
}

/// Open an initialized repository rooted at `dir`
pub fn init_repository(dir: &Path) -> (Repository, OutputBuffer) {
    let (repository, buffer) = open_repository(dir);
    repository.init().expect("failed to initialize repository");
    (repository, buffer)
}

pub fn write_file(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).expect("failed to write file");
}

pub fn read_file(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(name)).expect("failed to read file")
}

pub fn delete_file(dir: &Path, name: &str) {
    std::fs::remove_file(dir.join(name)).expect("failed to delete file");
}

/// The digest the current branch points at, straight from the ref file
pub fn current_commit(dir: &Path) -> String {
    read_file(dir, ".minigit/refs/heads/master").trim().to_string()
}

pub fn branch_commit(dir: &Path, branch: &str) -> String {
    read_file(dir, &format!(".minigit/refs/heads/{branch}"))
        .trim()
        .to_string()
}

pub fn head_file(dir: &Path) -> String {
    read_file(dir, ".minigit/HEAD")
}

/// Sorted listing of a directory under the repository root
pub fn dir_listing(dir: &Path, relative: &str) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir.join(relative))
        .expect("failed to list directory")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
