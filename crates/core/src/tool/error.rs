//! Error types for the tool module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that prevent an external command from producing an exit status.
///
/// A command that runs and exits non-zero is not an error at this level;
/// see [`CommandOutcome`](super::CommandOutcome).
#[derive(Debug, Error)]
pub enum ToolError {
    /// Binary not found.
    #[error("get_iplayer not found at path: {path}")]
    NotFound { path: PathBuf },

    /// Snapshot file could not be created or truncated.
    #[error("Failed to open snapshot file {path}: {source}")]
    SnapshotOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Command did not finish in time and was killed.
    #[error("{command} timed out after {timeout_secs} seconds")]
    Timeout {
        command: &'static str,
        timeout_secs: u64,
    },

    /// I/O error while running the command.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
