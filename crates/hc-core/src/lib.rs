//! hc-core - Core library for hot-cold
//!
//! This crate provides the game logic for the hot-or-cold number guessing game,
//! including guess evaluation, session state, input validation, configuration
//! and the log and chart exporters.

pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod types;
pub mod validation;

pub use error::{HotColdError, Result};
pub use types::*;
