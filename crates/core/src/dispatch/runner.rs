//! Single-pass catalogue dispatcher.
//!
//! One run: fetch the listing, load keywords and history, then walk the
//! snapshot once, downloading each unseen entry whose name or episode
//! contains a keyword. Everything is awaited in order; nothing runs in
//! parallel.

use std::io::Write;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::catalogue::{clean_line, count_lines, CatalogueEntry, SnapshotWindow};
use crate::config::{Config, FetchFailurePolicy};
use crate::history::HistorySet;
use crate::keywords::KeywordSet;
use crate::status::{StatusEvent, StatusLog};
use crate::tool::MediaTool;

use super::types::{DispatchError, EntryOutcome, RunReport};

/// Drives one run against a [`MediaTool`].
pub struct Dispatcher<T, W = std::io::Stdout>
where
    T: MediaTool,
    W: Write,
{
    config: Config,
    tool: T,
    status: StatusLog<W>,
}

impl<T, W> Dispatcher<T, W>
where
    T: MediaTool,
    W: Write,
{
    pub fn new(config: Config, tool: T, status: StatusLog<W>) -> Self {
        Self {
            config,
            tool,
            status,
        }
    }

    pub fn status(&self) -> &StatusLog<W> {
        &self.status
    }

    /// Runs the whole pipeline once.
    pub async fn run(&mut self) -> Result<RunReport, DispatchError> {
        let mut report = RunReport::new();
        let snapshot = self.config.paths.snapshot_file.clone();

        report.fetch_succeeded = self.fetch(&snapshot).await?;

        let line_count = count_lines(&snapshot)
            .await
            .map_err(|source| DispatchError::Snapshot {
                path: snapshot.clone(),
                source,
            })?;
        debug!("Snapshot {:?} has {} lines", snapshot, line_count);

        let keywords = KeywordSet::load(&self.config.paths.keywords_file).await?;
        if keywords.is_empty() {
            warn!(
                "Keyword file {:?} is empty, nothing will match",
                self.config.paths.keywords_file
            );
        }

        let history = HistorySet::load(&self.config.paths.history_file).await?;
        info!(
            "Loaded {} keywords and {} history entries",
            keywords.len(),
            history.len()
        );

        let history = self
            .dispatch(&snapshot, line_count, &keywords, history, &mut report)
            .await?;
        report.finish();

        info!(
            "Run complete: {} lines, {} downloaded, {} failed, {} already downloaded, {} invalid, {} unmatched ({} pids known)",
            report.lines,
            report.downloaded.len(),
            report.failed.len(),
            report.duplicates,
            report.invalid,
            report.unmatched,
            history.len()
        );

        Ok(report)
    }

    /// Runs the listing command, applying the configured failure policy.
    ///
    /// Returns whether the listing succeeded.
    async fn fetch(&mut self, snapshot: &Path) -> Result<bool, DispatchError> {
        info!("Fetching catalogue into {:?}", snapshot);

        let reason = match self.tool.fetch_listing(snapshot).await {
            Ok(outcome) if outcome.success => return Ok(true),
            Ok(outcome) => outcome.status_text().to_string(),
            Err(e) => e.to_string(),
        };

        self.status.emit(&StatusEvent::FetchFailed {
            tool: self.tool.name().to_string(),
            reason: reason.clone(),
        });

        match self.config.run.fetch_failure {
            FetchFailurePolicy::Continue => {
                warn!(
                    "Catalogue listing failed ({}), continuing with whatever the snapshot holds",
                    reason
                );
                Ok(false)
            }
            FetchFailurePolicy::Abort => Err(DispatchError::FetchFailed { reason }),
        }
    }

    /// Walks the snapshot window, returning the history as updated by this run.
    async fn dispatch(
        &mut self,
        snapshot: &Path,
        line_count: usize,
        keywords: &KeywordSet,
        mut history: HistorySet,
        report: &mut RunReport,
    ) -> Result<HistorySet, DispatchError> {
        let snapshot_error = |source: std::io::Error| DispatchError::Snapshot {
            path: snapshot.to_path_buf(),
            source,
        };

        let mut window = SnapshotWindow::with_line_count(
            snapshot,
            self.config.catalogue.header_lines,
            self.config.catalogue.footer_lines,
            line_count,
        )
        .await
        .map_err(snapshot_error)?;

        while let Some(raw) = window.next_line().await.map_err(snapshot_error)? {
            let outcome = self.process_line(keywords, &mut history, &raw).await;
            report.record(&outcome);
        }

        Ok(history)
    }

    /// Classifies one raw snapshot line, downloading it on a keyword match.
    ///
    /// Emits a status line for every keyword tried, so an entry matching the
    /// third keyword produces two `No Match` lines before the `Match` line.
    pub async fn process_line(
        &mut self,
        keywords: &KeywordSet,
        history: &mut HistorySet,
        raw: &str,
    ) -> EntryOutcome {
        let line = clean_line(raw);

        let Some(entry) = CatalogueEntry::parse(line) else {
            self.status.emit(&StatusEvent::Invalid {
                line: line.to_string(),
            });
            return EntryOutcome::Invalid;
        };

        if history.contains(&entry.pid) {
            self.status.emit(&StatusEvent::AlreadyDownloaded {
                line: line.to_string(),
            });
            return EntryOutcome::Duplicate;
        }

        for keyword in keywords.iter() {
            if !entry.mentions(keyword) {
                self.status.emit(&StatusEvent::NoMatch {
                    keyword: keyword.to_string(),
                    line: line.to_string(),
                });
                continue;
            }

            self.status.emit(&StatusEvent::Matched {
                keyword: keyword.to_string(),
                line: line.to_string(),
            });
            return self.download(&entry, keyword, line, history).await;
        }

        EntryOutcome::Exhausted
    }

    async fn download(
        &mut self,
        entry: &CatalogueEntry,
        keyword: &str,
        line: &str,
        history: &mut HistorySet,
    ) -> EntryOutcome {
        let reason = match self.tool.download(&entry.pid).await {
            Ok(outcome) if outcome.success => {
                debug!("Downloaded {}: {}", entry.pid, outcome.output.trim_end());
                history.insert(entry.pid.clone());
                return EntryOutcome::Downloaded {
                    pid: entry.pid.clone(),
                    keyword: keyword.to_string(),
                };
            }
            Ok(outcome) => {
                debug!("Download output for {}: {}", entry.pid, outcome.output.trim_end());
                outcome.status_text().to_string()
            }
            Err(e) => e.to_string(),
        };

        warn!("Download of {} failed: {}", entry.pid, reason);
        self.status.emit(&StatusEvent::DownloadFailed {
            tool: self.tool.name().to_string(),
            reason,
            line: line.to_string(),
        });

        EntryOutcome::DownloadFailed {
            pid: entry.pid.clone(),
            keyword: keyword.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockMediaTool;

    fn dispatcher(tool: MockMediaTool) -> Dispatcher<MockMediaTool, Vec<u8>> {
        Dispatcher::new(Config::default(), tool, StatusLog::new(Vec::new()))
    }

    /// Status lines with the timestamp prefix removed.
    fn status_lines(dispatcher: &Dispatcher<MockMediaTool, Vec<u8>>) -> Vec<String> {
        String::from_utf8(dispatcher.status().get_ref().clone())
            .unwrap()
            .lines()
            .map(|l| l.split_once("] ").unwrap().1.to_string())
            .collect()
    }

    fn keywords(words: &[&str]) -> KeywordSet {
        words.iter().copied().collect()
    }

    #[tokio::test]
    async fn test_match_downloads_and_records_history() {
        let tool = MockMediaTool::new();
        let mut d = dispatcher(tool.clone());
        let mut history = HistorySet::new();

        let outcome = d
            .process_line(
                &keywords(&["Archive Hour"]),
                &mut history,
                "pid123,The Archive Hour,Episode 4\n",
            )
            .await;

        assert_eq!(
            outcome,
            EntryOutcome::Downloaded {
                pid: "pid123".to_string(),
                keyword: "Archive Hour".to_string(),
            }
        );
        assert!(history.contains("pid123"));
        assert_eq!(tool.recorded_downloads().await, vec!["pid123"]);
        assert_eq!(
            status_lines(&d),
            vec!["Downloading (Match: Archive Hour): pid123,The Archive Hour,Episode 4"]
        );
    }

    #[tokio::test]
    async fn test_no_match_logs_one_skip_per_keyword() {
        let tool = MockMediaTool::new();
        let mut d = dispatcher(tool.clone());
        let mut history = HistorySet::new();

        let outcome = d
            .process_line(
                &keywords(&["Archive Hour", "Reith"]),
                &mut history,
                "pid123,Some Other Show,Finale",
            )
            .await;

        assert_eq!(outcome, EntryOutcome::Exhausted);
        assert_eq!(tool.download_count().await, 0);
        assert_eq!(
            status_lines(&d),
            vec![
                "Skipping (No Match: Archive Hour): pid123,Some Other Show,Finale",
                "Skipping (No Match: Reith): pid123,Some Other Show,Finale",
            ]
        );
    }

    #[tokio::test]
    async fn test_skips_before_match_then_stops() {
        let tool = MockMediaTool::new();
        let mut d = dispatcher(tool.clone());
        let mut history = HistorySet::new();

        let outcome = d
            .process_line(
                &keywords(&["Reith", "Episode", "Archive"]),
                &mut history,
                "pid9,The Archive Hour,Episode 4",
            )
            .await;

        assert!(matches!(
            outcome,
            EntryOutcome::Downloaded { ref keyword, .. } if keyword == "Episode"
        ));
        let lines = status_lines(&d);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Skipping (No Match: Reith)"));
        assert!(lines[1].starts_with("Downloading (Match: Episode)"));
        assert_eq!(tool.download_count().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_skips_keyword_loop() {
        let tool = MockMediaTool::new();
        let mut d = dispatcher(tool.clone());
        let mut history: HistorySet = ["pid123"].into_iter().collect();

        let outcome = d
            .process_line(
                &keywords(&["Archive Hour"]),
                &mut history,
                "pid123,The Archive Hour,Episode 4",
            )
            .await;

        assert_eq!(outcome, EntryOutcome::Duplicate);
        assert_eq!(tool.download_count().await, 0);
        assert_eq!(
            status_lines(&d),
            vec!["Skipping (Downloaded): pid123,The Archive Hour,Episode 4"]
        );
    }

    #[tokio::test]
    async fn test_invalid_line() {
        let tool = MockMediaTool::new();
        let mut d = dispatcher(tool.clone());
        let mut history = HistorySet::new();

        let outcome = d
            .process_line(&keywords(&["garbage"]), &mut history, "garbage-no-commas")
            .await;

        assert_eq!(outcome, EntryOutcome::Invalid);
        assert!(history.is_empty());
        assert_eq!(
            status_lines(&d),
            vec!["Skipping (Invalid): garbage-no-commas"]
        );
    }

    #[tokio::test]
    async fn test_added_marker_removed_before_matching() {
        let tool = MockMediaTool::new();
        let mut d = dispatcher(tool.clone());
        let mut history = HistorySet::new();

        // "Added" would otherwise be part of the pid
        let outcome = d
            .process_line(
                &keywords(&["Archive Hour"]),
                &mut history,
                "Added: pid123,The Archive Hour,Episode 4",
            )
            .await;

        assert!(matches!(outcome, EntryOutcome::Downloaded { ref pid, .. } if pid == "pid123"));
        assert_eq!(
            status_lines(&d),
            vec!["Downloading (Match: Archive Hour): pid123,The Archive Hour,Episode 4"]
        );
    }

    #[tokio::test]
    async fn test_download_failure_is_logged_not_recorded() {
        let tool = MockMediaTool::new();
        tool.fail_download("pid123", 1).await;
        let mut d = dispatcher(tool.clone());
        let mut history = HistorySet::new();

        let outcome = d
            .process_line(
                &keywords(&["Archive Hour"]),
                &mut history,
                "pid123,The Archive Hour,Episode 4",
            )
            .await;

        assert!(matches!(outcome, EntryOutcome::DownloadFailed { .. }));
        assert!(!history.contains("pid123"));
        // single attempt
        assert_eq!(tool.download_count().await, 1);

        let lines = status_lines(&d);
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "Error (mock): exit code 1 - pid123,The Archive Hour,Episode 4"
        );
    }

    #[tokio::test]
    async fn test_second_sighting_in_same_run_is_duplicate() {
        let tool = MockMediaTool::new();
        let mut d = dispatcher(tool.clone());
        let mut history = HistorySet::new();
        let kw = keywords(&["Archive Hour"]);

        d.process_line(&kw, &mut history, "pid123,The Archive Hour,Episode 4")
            .await;
        let outcome = d
            .process_line(&kw, &mut history, "Added: pid123,The Archive Hour,Episode 4")
            .await;

        assert_eq!(outcome, EntryOutcome::Duplicate);
        assert_eq!(tool.download_count().await, 1);
    }

    #[tokio::test]
    async fn test_empty_keywords_never_match() {
        let tool = MockMediaTool::new();
        let mut d = dispatcher(tool.clone());
        let mut history = HistorySet::new();

        let outcome = d
            .process_line(&KeywordSet::default(), &mut history, "pid1,Show,Ep")
            .await;

        assert_eq!(outcome, EntryOutcome::Exhausted);
        assert!(status_lines(&d).is_empty());
    }
}
