//! Command implementations
//!
//! Each user-facing command extends `Repository` with one method, one file
//! per command.

pub mod porcelain;
