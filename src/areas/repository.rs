//! Repository facade
//!
//! `Repository` coordinates the stateful components: the blob database, the
//! commit store, the ref store, the in-memory staging index, and the
//! working directory. It is the entry point for every command; one instance
//! owns all repository state for the life of the process.
//!
//! State is loaded once at construction when the repository directory
//! exists: HEAD resolves into the `(current_branch, current_commit)` pair
//! and the commit store eagerly caches every record. A HEAD that points at
//! a missing or corrupt commit is reported, never silently repaired.

use crate::areas::commits::{CommitLookup, CommitStore};
use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::{HeadState, Refs};
use crate::areas::workspace::Workspace;
use crate::artifacts::core::errors::RepoError;
use crate::artifacts::objects::commit::{Commit, Tree};
use crate::artifacts::status::status_info::StatusReport;
use std::cell::{Ref, RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Repository directory name; its existence means "initialized"
pub const REPO_DIR: &str = ".minigit";

/// Blob object directory name
const OBJECTS_DIR: &str = "objects";

/// Commit record directory name
const COMMITS_DIR: &str = "commits";

pub struct Repository {
    /// Working root
    path: Box<Path>,
    /// Output writer (stdout in the CLI, a buffer in tests)
    writer: RefCell<Box<dyn std::io::Write>>,
    /// Blob object store
    database: Database,
    /// Commit record store with its in-memory cache
    commits: RefCell<CommitStore>,
    /// Branch refs and HEAD
    refs: Refs,
    /// Staging index, process-local only
    index: RefCell<Index>,
    /// Working directory
    workspace: Workspace,
    /// Current HEAD position
    head: RefCell<HeadState>,
}

impl Repository {
    pub fn new(path: PathBuf, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path.canonicalize()?;
        let repo_path = path.join(REPO_DIR);

        let repository = Repository {
            database: Database::new(repo_path.join(OBJECTS_DIR).into_boxed_path()),
            commits: RefCell::new(CommitStore::new(
                repo_path.join(COMMITS_DIR).into_boxed_path(),
            )),
            refs: Refs::new(repo_path.into_boxed_path()),
            index: RefCell::new(Index::new()),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            writer: RefCell::new(writer),
            head: RefCell::new(HeadState::default()),
            path: path.into_boxed_path(),
        };

        if repository.is_initialized() {
            repository.load_state()?;
        }

        Ok(repository)
    }

    fn load_state(&self) -> anyhow::Result<()> {
        self.commits.borrow_mut().load_all()?;

        let head = self.refs.read_head()?;
        if let Some(digest) = head.commit() {
            match self.commits.borrow_mut().read(digest) {
                CommitLookup::Found(_) => {}
                CommitLookup::Missing => {
                    eprintln!("Warning: HEAD points to missing commit {digest}");
                }
                CommitLookup::Corrupt => {
                    eprintln!("Warning: HEAD points to corrupt commit {digest}");
                }
            }
        }
        *self.head.borrow_mut() = head;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repo_path(&self) -> PathBuf {
        self.path.join(REPO_DIR)
    }

    pub fn is_initialized(&self) -> bool {
        self.repo_path().is_dir()
    }

    pub(crate) fn ensure_initialized(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(RepoError::NotARepository.into())
        }
    }

    pub fn writer(&self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn commits(&self) -> RefMut<'_, CommitStore> {
        self.commits.borrow_mut()
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn index(&self) -> Ref<'_, Index> {
        self.index.borrow()
    }

    pub fn index_mut(&self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn head(&self) -> Ref<'_, HeadState> {
        self.head.borrow()
    }

    pub fn set_head(&self, head: HeadState) {
        *self.head.borrow_mut() = head;
    }

    /// The commit HEAD points at, if any
    ///
    /// A dangling or corrupt HEAD commit is an error here; callers that can
    /// degrade gracefully (status) catch it and warn instead.
    pub fn head_commit(&self) -> anyhow::Result<Option<Commit>> {
        let digest = match self.head.borrow().commit().cloned() {
            Some(digest) => digest,
            None => return Ok(None),
        };

        match self.commits.borrow_mut().read(&digest) {
            CommitLookup::Found(commit) => Ok(Some(commit)),
            CommitLookup::Missing => Err(RepoError::MissingObject(digest.to_string()).into()),
            CommitLookup::Corrupt => Err(RepoError::CorruptCommit(digest.to_string()).into()),
        }
    }

    /// The HEAD commit's tree, or an empty tree before the first commit
    pub fn head_tree(&self) -> anyhow::Result<Tree> {
        Ok(self
            .head_commit()?
            .map(|commit| commit.tree().clone())
            .unwrap_or_default())
    }

    /// Classify every path across working directory, index, and HEAD tree
    ///
    /// A broken HEAD commit degrades to an empty tree with a warning so
    /// status can still describe the working directory.
    pub fn status_report(&self) -> anyhow::Result<StatusReport> {
        let head_tree = match self.head_tree() {
            Ok(tree) => tree,
            Err(error) => {
                eprintln!("Warning: unable to load HEAD commit: {error:#}");
                Tree::new()
            }
        };
        let workspace = self.workspace.scan()?;
        Ok(StatusReport::build(&head_tree, &self.index.borrow(), &workspace))
    }
}
