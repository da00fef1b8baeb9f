use crate::artifacts::branch::INVALID_BRANCH_NAME_REGEX;
use anyhow::Context;

/// Name of the default branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";

/// Reserved name of the HEAD pointer; never a valid branch name
pub const HEAD_NAME: &str = "HEAD";

/// Validated branch name
///
/// Hierarchical names such as `feature/login` are allowed; names that would
/// break the ref file layout or collide with the HEAD pointer are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: &str) -> anyhow::Result<Self> {
        if name.is_empty() {
            anyhow::bail!("branch name cannot be empty");
        }
        if name == HEAD_NAME {
            anyhow::bail!("'{}' is a reserved name", HEAD_NAME);
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;
        if re.is_match(name) {
            anyhow::bail!("invalid branch name: {}", name);
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
