//! Append-only log of won games

use hc_core::engine::Session;
use hc_core::error::{HotColdError, Result};
use hc_core::export::{append, Exporter, LogExporter};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// One line of the game log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEntry {
    pub target: i64,
    pub attempts: usize,
}

impl FromStr for LogEntry {
    type Err = HotColdError;

    fn from_str(line: &str) -> Result<Self> {
        let mut target = None;
        let mut attempts = None;

        for part in line.split(',') {
            let Some((key, value)) = part.split_once('=') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                "target" => target = value.parse().ok(),
                "attempts" => attempts = value.parse().ok(),
                _ => {}
            }
        }

        match (target, attempts) {
            (Some(target), Some(attempts)) => Ok(Self { target, attempts }),
            _ => Err(HotColdError::Validation(format!(
                "Unrecognized log line: {}",
                line
            ))),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "target={}, attempts={}", self.target, self.attempts)
    }
}

/// Aggregate over all logged games
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogSummary {
    pub games: usize,
    pub best: usize,
    pub worst: usize,
    pub average: f64,
}

impl LogSummary {
    pub fn from_entries(entries: &[LogEntry]) -> Option<Self> {
        let best = entries.iter().map(|e| e.attempts).min()?;
        let worst = entries.iter().map(|e| e.attempts).max()?;
        let total: usize = entries.iter().map(|e| e.attempts).sum();
        Some(Self {
            games: entries.len(),
            best,
            worst,
            average: total as f64 / entries.len() as f64,
        })
    }
}

/// Text log that only ever grows
pub struct GameLogStore {
    path: PathBuf,
}

impl GameLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append the summary line of a session
    pub fn append(&self, session: &Session) -> Result<()> {
        let line = LogExporter::new().export(session)?;
        append(&self.path, line.as_bytes()).map_err(|e| {
            e.with_context(format!("Failed to append to {}", self.path.display()))
        })?;
        debug!("Logged session {} to {:?}", session.id, self.path);
        Ok(())
    }

    /// Read back every parseable entry; a missing log is empty
    pub fn entries(&self) -> Result<Vec<LogEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let mut entries = Vec::new();
        for (number, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<LogEntry>() {
                Ok(entry) => entries.push(entry),
                Err(e) => debug!("Skipping log line {}: {}", number + 1, e),
            }
        }
        Ok(entries)
    }

    pub fn summary(&self) -> Result<Option<LogSummary>> {
        Ok(LogSummary::from_entries(&self.entries()?))
    }
}
