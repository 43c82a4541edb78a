//! Exporter trait and manager

use crate::engine::Session;
use crate::error::{HotColdError, Result};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Trait for session exporters
pub trait Exporter: Send + Sync {
    /// Export a session to string
    fn export(&self, session: &Session) -> Result<String>;

    /// Get the format name
    fn format_name(&self) -> &str;

    /// Get the file extension
    fn file_extension(&self) -> &str;
}

/// Manager for handling multiple export formats
pub struct ExportManager {
    exporters: HashMap<String, Box<dyn Exporter>>,
}

impl ExportManager {
    /// Create a new export manager with default exporters
    pub fn new() -> Self {
        let mut manager = Self {
            exporters: HashMap::new(),
        };

        manager.register(Box::new(super::log::LogExporter::new()));
        manager.register(Box::new(super::chart::ChartExporter::svg()));
        manager.register(Box::new(super::json::JsonExporter::new()));
        manager.register(Box::new(super::json::JsonExporter::compact()));

        manager
    }

    /// Register a new exporter
    pub fn register(&mut self, exporter: Box<dyn Exporter>) {
        self.exporters
            .insert(exporter.format_name().to_string(), exporter);
    }

    fn exporter(&self, format: &str) -> Result<&dyn Exporter> {
        self.exporters
            .get(format)
            .map(|e| e.as_ref())
            .ok_or_else(|| HotColdError::Validation(format!("Unknown export format: {}", format)))
    }

    /// Export a session to the specified format
    pub fn export(&self, session: &Session, format: &str) -> Result<String> {
        self.exporter(format)?.export(session)
    }

    /// Export a session to a file, replacing any previous content
    pub fn export_to_file(&self, session: &Session, format: &str, path: &Path) -> Result<()> {
        let exporter = self.exporter(format)?;
        let content = exporter.export(session)?;

        let final_path = if path.extension().is_some() {
            path.to_path_buf()
        } else {
            path.with_extension(exporter.file_extension())
        };
        write_atomic(&final_path, content.as_bytes())?;
        debug!("Exported session {} as {} to {:?}", session.id, format, final_path);
        Ok(())
    }

    /// Get list of available format names
    pub fn available_formats(&self) -> Vec<String> {
        let mut formats: Vec<_> = self.exporters.keys().cloned().collect();
        formats.sort();
        formats
    }

    /// Check if a format is available
    pub fn has_format(&self, format: &str) -> bool {
        self.exporters.contains_key(format)
    }

    /// Get an exporter by format name
    pub fn get(&self, format: &str) -> Option<&dyn Exporter> {
        self.exporters.get(format).map(|e| e.as_ref())
    }
}

impl Default for ExportManager {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Write a file through a temp file and rename
fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    ensure_parent(path)?;

    let temp_path = path.with_extension("tmp");
    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(content)?;
        file.flush()?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        HotColdError::Io(e)
    })
}

/// Append to a file, creating it if needed
pub fn append(path: &Path, content: &[u8]) -> Result<()> {
    ensure_parent(path)?;

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(content)?;
    file.flush()?;
    Ok(())
}
