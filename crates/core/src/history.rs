//! Read-only view of get_iplayer's download history.
//!
//! The file is a flat list of records separated by `|||`, each record being
//! `|`-separated fields with the pid first:
//!
//! ```text
//! <pid>|<name>|<episode>|...|||<pid2>|...|||
//! ```
//!
//! get_iplayer owns and appends to this file; nothing here writes to it.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Separator between history records.
pub const RECORD_SEPARATOR: &str = "|||";

/// Separator between fields inside a record.
pub const FIELD_SEPARATOR: char = '|';

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Failed to read history file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Pids already downloaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistorySet {
    pids: HashSet<String>,
}

impl HistorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the history file, treating a missing file as empty history.
    pub async fn load(path: &Path) -> Result<Self, HistoryError> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Self::parse(&String::from_utf8_lossy(&bytes))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No download history at {:?}", path);
                Ok(Self::new())
            }
            Err(e) => Err(HistoryError::Read {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Extracts the pid of every non-empty record.
    pub fn parse(text: &str) -> Self {
        text.split(RECORD_SEPARATOR)
            .filter_map(|record| record.split(FIELD_SEPARATOR).next())
            .map(str::trim)
            .filter(|pid| !pid.is_empty())
            .collect()
    }

    pub fn contains(&self, pid: &str) -> bool {
        self.pids.contains(pid)
    }

    /// Records a pid downloaded during this run. Returns false if already present.
    pub fn insert(&mut self, pid: impl Into<String>) -> bool {
        self.pids.insert(pid.into())
    }

    pub fn len(&self) -> usize {
        self.pids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for HistorySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            pids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
