//! get_iplayer-backed tool implementation.

use async_trait::async_trait;
use std::future::Future;
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

use super::error::ToolError;
use super::traits::MediaTool;
use super::types::CommandOutcome;
use crate::config::{PathsConfig, ToolConfig};

/// Listing format requested from get_iplayer; entry parsing depends on it.
pub const LISTING_FORMAT: &str = "<pid>,<name>,<episode>";

/// Runs the real get_iplayer binary.
pub struct GetIplayer {
    config: ToolConfig,
    output_dir: std::path::PathBuf,
}

impl GetIplayer {
    /// Creates a new adapter from the tool section and the download directory.
    pub fn new(config: ToolConfig, output_dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            config,
            output_dir: output_dir.into(),
        }
    }

    /// Creates an adapter using the tool and path sections of a loaded config.
    pub fn from_config(tool: &ToolConfig, paths: &PathsConfig) -> Self {
        Self::new(tool.clone(), paths.output_dir.clone())
    }

    /// Builds arguments for the catalogue listing.
    fn listing_args(&self) -> Vec<String> {
        vec![
            format!("--type={}", self.config.programme_type),
            format!("--listformat={}", LISTING_FORMAT),
        ]
    }

    /// Builds arguments for downloading one programme.
    fn download_args(&self, pid: &str) -> Vec<String> {
        vec![
            format!("--type={}", self.config.programme_type),
            format!("--pid={}", pid),
            format!("--modes={}", self.config.modes),
            format!("--output={}", self.output_dir.to_string_lossy()),
        ]
    }

    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.config.binary);
        cmd.args(args).stdin(Stdio::null()).kill_on_drop(true);
        cmd
    }

    fn map_spawn_error(&self, e: std::io::Error) -> ToolError {
        if e.kind() == std::io::ErrorKind::NotFound {
            ToolError::NotFound {
                path: self.config.binary.clone(),
            }
        } else {
            ToolError::Io(e)
        }
    }

    /// Awaits `fut`, bounded by the configured timeout if any.
    ///
    /// On timeout the child is killed when it is dropped (`kill_on_drop`).
    async fn bounded<T>(
        &self,
        command: &'static str,
        fut: impl Future<Output = std::io::Result<T>>,
    ) -> Result<T, ToolError> {
        let result = match self.config.timeout_secs {
            Some(secs) => timeout(Duration::from_secs(secs), fut)
                .await
                .map_err(|_| ToolError::Timeout {
                    command,
                    timeout_secs: secs,
                })?,
            None => fut.await,
        };
        result.map_err(|e| self.map_spawn_error(e))
    }
}

#[async_trait]
impl MediaTool for GetIplayer {
    fn name(&self) -> &str {
        "get_iplayer"
    }

    async fn fetch_listing(&self, dest: &Path) -> Result<CommandOutcome, ToolError> {
        let start = Instant::now();
        let snapshot = tokio::fs::File::create(dest)
            .await
            .map_err(|source| ToolError::SnapshotOpen {
                path: dest.to_path_buf(),
                source,
            })?
            .into_std()
            .await;

        let args = self.listing_args();
        debug!("Running {:?} {:?}", self.config.binary, args);

        let mut cmd = self.command(&args);
        cmd.stdout(Stdio::from(snapshot)).stderr(Stdio::inherit());
        let mut child = cmd.spawn().map_err(|e| self.map_spawn_error(e))?;

        let status = self.bounded("listing", child.wait()).await?;
        debug!(
            "Listing finished with {:?} in {} ms",
            status.code(),
            start.elapsed().as_millis()
        );

        Ok(CommandOutcome::from_status(status, String::new()))
    }

    async fn download(&self, pid: &str) -> Result<CommandOutcome, ToolError> {
        let start = Instant::now();
        let args = self.download_args(pid);
        debug!("Running {:?} {:?}", self.config.binary, args);

        let mut cmd = self.command(&args);
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

        let output = self.bounded("download", cmd.output()).await?;

        // stderr is folded into the captured output
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        debug!(
            "Download of {} finished with {:?} in {} ms",
            pid,
            output.status.code(),
            start.elapsed().as_millis()
        );

        Ok(CommandOutcome::from_status(output.status, text))
    }
}
