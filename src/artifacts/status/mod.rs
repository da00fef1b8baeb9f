//! Working tree status inspection
//!
//! Classifies every file into the tri-state partition the status and
//! checkout operations need, by comparing three views of the repository:
//! the HEAD commit's tree, the staging index, and the working directory.
//!
//! - `file_change`: change kinds and their rendered labels
//! - `inspector`: the pure classification rules
//! - `status_info`: aggregation into a `StatusReport`

pub mod file_change;
pub mod inspector;
pub mod status_info;
