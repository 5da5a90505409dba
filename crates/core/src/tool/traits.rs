//! Trait definitions for the tool module.

use async_trait::async_trait;
use std::path::Path;

use super::error::ToolError;
use super::types::CommandOutcome;

/// An external tool that can list the catalogue and download programmes.
#[async_trait]
pub trait MediaTool: Send + Sync {
    /// Returns the name used in status lines, e.g. `get_iplayer`.
    fn name(&self) -> &str;

    /// Writes the full catalogue listing to `dest`, replacing its contents.
    ///
    /// Listing output is one `pid,name,episode` entry per line, surrounded by
    /// the tool's own banner and summary lines.
    async fn fetch_listing(&self, dest: &Path) -> Result<CommandOutcome, ToolError>;

    /// Downloads a single programme by pid.
    async fn download(&self, pid: &str) -> Result<CommandOutcome, ToolError>;
}
