//! External catalogue and download tool.
//!
//! The [`MediaTool`] trait is the seam between the dispatch loop and the
//! process that actually talks to iPlayer. [`GetIplayer`] shells out to the
//! real binary; tests use `testing::MockMediaTool`.
//!
//! Commands run one at a time and are awaited to completion. A non-zero exit
//! is reported through [`CommandOutcome`], not as an error, so callers decide
//! how to treat it.

mod error;
mod get_iplayer;
mod traits;
mod types;

pub use error::ToolError;
pub use get_iplayer::{GetIplayer, LISTING_FORMAT};
pub use traits::MediaTool;
pub use types::{CommandOutcome, ExitText};
