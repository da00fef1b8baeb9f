//! Content diffing
//!
//! - `line_diff`: heuristic linewise comparison of two blobs

pub mod line_diff;
