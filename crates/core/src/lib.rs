pub mod catalogue;
pub mod config;
pub mod dispatch;
pub mod history;
pub mod keywords;
pub mod status;
pub mod testing;
pub mod tool;

pub use catalogue::{clean_line, count_lines, CatalogueEntry, SnapshotWindow};
pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_config, Config,
    ConfigError, FetchFailurePolicy,
};
pub use dispatch::{DispatchError, Dispatcher, EntryOutcome, RunReport};
pub use history::{HistoryError, HistorySet};
pub use keywords::{KeywordError, KeywordSet};
pub use status::{StatusEvent, StatusLog};
pub use tool::{CommandOutcome, GetIplayer, MediaTool, ToolError};
