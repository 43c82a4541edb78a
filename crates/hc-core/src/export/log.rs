//! Plain text game log line

use super::exporter::Exporter;
use crate::engine::Session;
use crate::error::Result;

/// Renders the one-line summary appended to the game log
pub struct LogExporter;

impl LogExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for LogExporter {
    /// `target=<t>, attempts=<n>` plus newline, ready to append
    fn export(&self, session: &Session) -> Result<String> {
        Ok(format!(
            "target={}, attempts={}\n",
            session.target(),
            session.attempts()
        ))
    }

    fn format_name(&self) -> &str {
        "log"
    }

    fn file_extension(&self) -> &str {
        "txt"
    }
}
