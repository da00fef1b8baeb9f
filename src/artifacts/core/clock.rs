//! Clock collaborator
//!
//! The core treats timestamps as opaque strings; this is the single place
//! that knows how they are produced.

/// Current local time as `YYYY-MM-DD HH:MM:SS`
pub fn local_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
