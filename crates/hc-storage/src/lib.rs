//! hc-storage - Storage library for hot-cold
//!
//! This crate writes the durable artifacts of won games: the append-only
//! game log, the closeness chart and optional per-session exports.

mod log_store;
mod output;
pub mod paths;
mod recorder;

pub use log_store::{GameLogStore, LogEntry, LogSummary};
pub use output::OutputDir;
pub use recorder::{WinRecorder, WinReport};
