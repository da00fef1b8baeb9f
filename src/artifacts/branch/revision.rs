//! Checkout-target resolution
//!
//! A target string resolves in order: known branch name, exact commit
//! digest, then digest prefix. A prefix must be at least
//! [`MIN_PREFIX_LENGTH`](crate::artifacts::objects::digest::MIN_PREFIX_LENGTH)
//! characters and match exactly one known commit; an ambiguous prefix is an
//! unknown target, not a guess.

use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::errors::RepoError;
use crate::artifacts::objects::digest::{Digest, DIGEST_LENGTH, MIN_PREFIX_LENGTH};
use derive_new::new;

/// What a target string named
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// A branch, possibly with no commits yet
    Branch {
        name: BranchName,
        commit: Option<Digest>,
    },
    /// A concrete commit, for a detached checkout
    Commit(Digest),
}

#[derive(new)]
pub struct RevisionContext<'r> {
    repository: &'r Repository,
}

impl RevisionContext<'_> {
    /// Resolve a checkout target; branches shadow digests
    pub fn resolve(&self, target: &str) -> anyhow::Result<ResolvedTarget> {
        if let Ok(name) = BranchName::try_parse(target) {
            if self.repository.refs().branch_exists(&name) {
                let commit = self.repository.refs().read_branch(&name)?;
                return Ok(ResolvedTarget::Branch { name, commit });
            }
        }

        self.resolve_commit(target).map(ResolvedTarget::Commit)
    }

    /// Resolve a commit argument: exact digest or unique prefix
    pub fn resolve_commit(&self, target: &str) -> anyhow::Result<Digest> {
        if target.len() == DIGEST_LENGTH {
            if let Ok(digest) = Digest::try_parse(target.to_string()) {
                if self.repository.commits().contains(&digest) {
                    return Ok(digest);
                }
            }
        }

        if target.len() >= MIN_PREFIX_LENGTH {
            let matches = self.repository.commits().find_by_prefix(target);
            if let [digest] = matches.as_slice() {
                return Ok(digest.clone());
            }
        }

        Err(RepoError::UnknownTarget(target.to_string()).into())
    }
}
