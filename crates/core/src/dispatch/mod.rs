//! Filter and dispatch loop.
//!
//! Per entry the loop moves through:
//! `Invalid | Duplicate | NoMatch* -> (Downloaded | DownloadFailed) | NoMatch* (exhausted)`.
//! History is owned by the run and passed explicitly; pids downloaded during
//! the run are added so repeats later in the same listing are skipped.

mod runner;
mod types;

pub use runner::Dispatcher;
pub use types::{DispatchError, EntryOutcome, RunReport};
