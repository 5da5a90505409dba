//! Mock media tool for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::tool::{CommandOutcome, MediaTool, ToolError};

/// Mock implementation of the MediaTool trait.
///
/// Provides controllable behavior for testing:
/// - Serve a canned listing into the snapshot file
/// - Simulate listing and per-pid download failures
/// - Track downloads for assertions
///
/// # Example
///
/// ```rust,ignore
/// use radiograb_core::testing::MockMediaTool;
///
/// let tool = MockMediaTool::new();
/// tool.set_listing(listing_with_entries(&["pid123,The Archive Hour,Episode 4"])).await;
/// tool.fail_download("pid123", 1).await;
///
/// // ... run a Dispatcher with tool.clone() ...
///
/// assert_eq!(tool.recorded_downloads().await, vec!["pid123"]);
/// ```
#[derive(Debug, Clone)]
pub struct MockMediaTool {
    /// Text written to the snapshot on each listing.
    listing: Arc<RwLock<String>>,
    /// Exit code returned by the listing (0 = success).
    listing_exit_code: Arc<RwLock<i32>>,
    /// If set, the next listing fails to run with this error.
    next_listing_error: Arc<RwLock<Option<ToolError>>>,
    /// Exit codes for pids whose download should fail.
    download_failures: Arc<RwLock<HashMap<String, i32>>>,
    /// Pids for which the download should fail to run at all.
    unrunnable: Arc<RwLock<Vec<String>>>,
    /// Pids passed to `download`, in call order.
    downloads: Arc<RwLock<Vec<String>>>,
    /// Number of listing calls.
    listings: Arc<RwLock<usize>>,
}

impl Default for MockMediaTool {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMediaTool {
    /// Create a new mock tool with an empty listing.
    pub fn new() -> Self {
        Self {
            listing: Arc::new(RwLock::new(String::new())),
            listing_exit_code: Arc::new(RwLock::new(0)),
            next_listing_error: Arc::new(RwLock::new(None)),
            download_failures: Arc::new(RwLock::new(HashMap::new())),
            unrunnable: Arc::new(RwLock::new(Vec::new())),
            downloads: Arc::new(RwLock::new(Vec::new())),
            listings: Arc::new(RwLock::new(0)),
        }
    }

    /// Set the raw text written to the snapshot.
    pub async fn set_listing(&self, text: impl Into<String>) {
        *self.listing.write().await = text.into();
    }

    /// Make the listing exit with a non-zero code (it still writes its text).
    pub async fn set_listing_exit_code(&self, code: i32) {
        *self.listing_exit_code.write().await = code;
    }

    /// Make the next listing fail to start, leaving an empty snapshot.
    pub async fn set_next_listing_error(&self, error: ToolError) {
        *self.next_listing_error.write().await = Some(error);
    }

    /// Make downloads of `pid` exit with `code`.
    pub async fn fail_download(&self, pid: impl Into<String>, code: i32) {
        self.download_failures.write().await.insert(pid.into(), code);
    }

    /// Make downloads of `pid` fail to start.
    pub async fn break_download(&self, pid: impl Into<String>) {
        self.unrunnable.write().await.push(pid.into());
    }

    /// Get all pids passed to `download`.
    pub async fn recorded_downloads(&self) -> Vec<String> {
        self.downloads.read().await.clone()
    }

    /// Get the number of download attempts.
    pub async fn download_count(&self) -> usize {
        self.downloads.read().await.len()
    }

    /// Get the number of listing calls.
    pub async fn listing_count(&self) -> usize {
        *self.listings.read().await
    }
}

#[async_trait]
impl MediaTool for MockMediaTool {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_listing(&self, dest: &Path) -> Result<CommandOutcome, ToolError> {
        *self.listings.write().await += 1;

        let snapshot_open = |source: std::io::Error| ToolError::SnapshotOpen {
            path: dest.to_path_buf(),
            source,
        };

        // The snapshot is truncated before the command is started
        tokio::fs::write(dest, "").await.map_err(snapshot_open)?;

        if let Some(error) = self.next_listing_error.write().await.take() {
            return Err(error);
        }

        let text = self.listing.read().await.clone();
        tokio::fs::write(dest, text).await.map_err(snapshot_open)?;

        match *self.listing_exit_code.read().await {
            0 => Ok(CommandOutcome::succeeded("")),
            code => Ok(CommandOutcome::failed(code, "")),
        }
    }

    async fn download(&self, pid: &str) -> Result<CommandOutcome, ToolError> {
        self.downloads.write().await.push(pid.to_string());

        if self.unrunnable.read().await.iter().any(|p| p == pid) {
            return Err(ToolError::NotFound {
                path: "mock".into(),
            });
        }

        match self.download_failures.read().await.get(pid) {
            Some(&code) => Ok(CommandOutcome::failed(code, "ERROR: Failed to record")),
            None => Ok(CommandOutcome::succeeded(format!("INFO: Recorded {}", pid))),
        }
    }
}
