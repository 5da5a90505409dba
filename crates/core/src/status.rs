//! Timestamped status lines.
//!
//! Every decision the dispatch loop makes is reported as one line on stdout:
//!
//! ```text
//! [2024/03/01 06:00:01.123456] Downloading (Match: Archive Hour): pid123,The Archive Hour,Episode 4
//! ```
//!
//! These lines are the program's user-facing output (cron mails them).
//! Diagnostics go through `tracing` instead.

use chrono::Local;
use std::io::Write;

/// Timestamp layout for status lines, local time with microseconds.
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.6f";

/// A classification made while processing the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    /// Keyword found in name or episode; a download follows.
    Matched { keyword: String, line: String },
    /// Keyword tried and not found.
    NoMatch { keyword: String, line: String },
    /// Pid already in the download history.
    AlreadyDownloaded { line: String },
    /// Line could not be split into pid, name and episode.
    Invalid { line: String },
    /// Download command failed to run or exited non-zero.
    DownloadFailed {
        tool: String,
        reason: String,
        line: String,
    },
    /// Listing command failed to run or exited non-zero.
    FetchFailed { tool: String, reason: String },
}

impl StatusEvent {
    /// Leading label, e.g. `Skipping (Downloaded)`.
    pub fn category(&self) -> String {
        match self {
            Self::Matched { keyword, .. } => format!("Downloading (Match: {})", keyword),
            Self::NoMatch { keyword, .. } => format!("Skipping (No Match: {})", keyword),
            Self::AlreadyDownloaded { .. } => "Skipping (Downloaded)".to_string(),
            Self::Invalid { .. } => "Skipping (Invalid)".to_string(),
            Self::DownloadFailed { tool, .. } => format!("Error ({})", tool),
            Self::FetchFailed { tool, .. } => format!("Error ({} listing)", tool),
        }
    }

    /// Text after the category.
    pub fn detail(&self) -> String {
        match self {
            Self::Matched { line, .. }
            | Self::NoMatch { line, .. }
            | Self::AlreadyDownloaded { line }
            | Self::Invalid { line } => line.clone(),
            Self::DownloadFailed { reason, line, .. } => format!("{} - {}", reason, line),
            Self::FetchFailed { reason, .. } => reason.clone(),
        }
    }
}

/// Writes status lines to stdout or any other writer.
pub struct StatusLog<W: Write = std::io::Stdout> {
    out: W,
}

impl StatusLog<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> StatusLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Writes one line, stamped with the current local time.
    ///
    /// Write errors are logged and otherwise ignored; losing a status line
    /// must not stop downloads.
    pub fn emit(&mut self, event: &StatusEvent) {
        let now = Local::now().format(TIMESTAMP_FORMAT);
        let result = writeln!(self.out, "[{}] {}: {}", now, event.category(), event.detail())
            .and_then(|_| self.out.flush());
        if let Err(e) = result {
            tracing::error!("Failed to write status line: {}", e);
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
