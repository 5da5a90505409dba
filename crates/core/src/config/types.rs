use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub tool: ToolConfig,
    #[serde(default)]
    pub catalogue: CatalogueConfig,
    #[serde(default)]
    pub run: RunConfig,
}

/// File locations used by a run
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Newline-delimited keyword list
    #[serde(default = "default_keywords_file")]
    pub keywords_file: PathBuf,
    /// Scratch file the catalogue listing is written to (kept after the run)
    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: PathBuf,
    /// get_iplayer's own download history (read only)
    #[serde(default = "default_history_file")]
    pub history_file: PathBuf,
    /// Directory downloads are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            keywords_file: default_keywords_file(),
            snapshot_file: default_snapshot_file(),
            history_file: default_history_file(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_keywords_file() -> PathBuf {
    PathBuf::from("/home/pi/radio/keywords")
}

fn default_snapshot_file() -> PathBuf {
    PathBuf::from("/tmp/radio")
}

fn default_history_file() -> PathBuf {
    PathBuf::from("/home/pi/.get_iplayer/download_history")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("/home/pi/radio/downloads")
}

/// External listing/download tool configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolConfig {
    /// Path to the get_iplayer binary
    #[serde(default = "default_binary")]
    pub binary: PathBuf,
    /// Programme type passed as `--type`
    #[serde(default = "default_programme_type")]
    pub programme_type: String,
    /// Quality selection passed as `--modes`
    #[serde(default = "default_modes")]
    pub modes: String,
    /// Kill a listing or download after this many seconds (unset = wait forever)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            programme_type: default_programme_type(),
            modes: default_modes(),
            timeout_secs: None,
        }
    }
}

fn default_binary() -> PathBuf {
    PathBuf::from("get_iplayer")
}

fn default_programme_type() -> String {
    "radio".to_string()
}

fn default_modes() -> String {
    "best".to_string()
}

/// Shape of the listing snapshot
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogueConfig {
    /// Banner lines printed before the first entry
    #[serde(default = "default_header_lines")]
    pub header_lines: usize,
    /// Summary lines printed after the last entry
    #[serde(default = "default_footer_lines")]
    pub footer_lines: usize,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            header_lines: default_header_lines(),
            footer_lines: default_footer_lines(),
        }
    }
}

fn default_header_lines() -> usize {
    6
}

fn default_footer_lines() -> usize {
    2
}

/// Per-run behaviour
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RunConfig {
    #[serde(default)]
    pub fetch_failure: FetchFailurePolicy,
}

/// What to do when the catalogue listing command fails
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FetchFailurePolicy {
    /// Log the failure and process whatever the snapshot holds
    #[default]
    Continue,
    /// Stop the run with an error
    Abort,
}
