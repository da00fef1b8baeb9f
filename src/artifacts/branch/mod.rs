//! Branch names and checkout-target resolution
//!
//! - `branch_name`: validated branch names (hierarchical names allowed)
//! - `revision`: resolving a user-supplied target to a branch or commit

pub mod branch_name;
pub mod revision;

/// Regex pattern for invalid characters and sequences in branch names
pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
