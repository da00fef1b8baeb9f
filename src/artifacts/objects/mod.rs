//! Content-addressed data types
//!
//! - `digest`: the textual content digest and the hashing primitive
//! - `commit`: the commit record, its canonical digest, and its on-disk format

pub mod commit;
pub mod digest;
