//! Catalogue snapshot handling.
//!
//! The listing is written to a scratch file by the tool, then read back one
//! line at a time. Banner and summary lines are skipped by position, using a
//! newline count taken before reading.

mod snapshot;
mod types;

pub use snapshot::{count_lines, SnapshotWindow};
pub use types::{clean_line, CatalogueEntry, ADDED_MARKER};
