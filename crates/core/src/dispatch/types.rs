//! Types for the dispatch loop.

use chrono::{DateTime, Local};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a run early.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Listing failed and the policy is to abort.
    #[error("catalogue listing failed: {reason}")]
    FetchFailed { reason: String },

    /// Snapshot could not be read back.
    #[error("failed to read snapshot {path}: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Keyword file missing or unreadable.
    #[error("keyword error: {0}")]
    Keywords(#[from] crate::keywords::KeywordError),

    /// History file unreadable.
    #[error("history error: {0}")]
    History(#[from] crate::history::HistoryError),
}

/// Terminal state of one catalogue line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Fewer than three fields, or no pid.
    Invalid,
    /// Pid already downloaded.
    Duplicate,
    /// A keyword matched and the download succeeded.
    Downloaded { pid: String, keyword: String },
    /// A keyword matched and the download failed.
    DownloadFailed { pid: String, keyword: String },
    /// No keyword matched.
    Exhausted,
}

/// Summary of one run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Local>,
    pub finished_at: Option<DateTime<Local>>,
    /// Whether the listing command succeeded.
    pub fetch_succeeded: bool,
    /// Lines inside the header/footer window.
    pub lines: usize,
    pub invalid: usize,
    pub duplicates: usize,
    pub unmatched: usize,
    /// Pids downloaded this run, in order.
    pub downloaded: Vec<String>,
    /// Pids whose download failed, in order.
    pub failed: Vec<String>,
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            started_at: Local::now(),
            finished_at: None,
            fetch_succeeded: false,
            lines: 0,
            invalid: 0,
            duplicates: 0,
            unmatched: 0,
            downloaded: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Tallies one processed line.
    pub fn record(&mut self, outcome: &EntryOutcome) {
        self.lines += 1;
        match outcome {
            EntryOutcome::Invalid => self.invalid += 1,
            EntryOutcome::Duplicate => self.duplicates += 1,
            EntryOutcome::Exhausted => self.unmatched += 1,
            EntryOutcome::Downloaded { pid, .. } => self.downloaded.push(pid.clone()),
            EntryOutcome::DownloadFailed { pid, .. } => self.failed.push(pid.clone()),
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Local::now());
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}
