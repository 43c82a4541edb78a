//! Output directory selection

use hc_core::config::ExportConfig;
use hc_core::engine::Session;
use hc_core::error::{HotColdError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the game log and chart of won sessions are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    root: PathBuf,
    log_file: String,
    chart_file: String,
}

impl OutputDir {
    /// Output directory with the default file names
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let defaults = ExportConfig::default();
        Self {
            root: root.into(),
            log_file: defaults.log_file,
            chart_file: defaults.chart_file,
        }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            root: config.output_dir.clone(),
            log_file: config.log_file.clone(),
            chart_file: config.chart_file.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Point output at another directory
    pub fn set_root(&mut self, root: impl Into<PathBuf>) {
        self.root = root.into();
        debug!("Output directory set to {:?}", self.root);
    }

    pub fn log_path(&self) -> PathBuf {
        self.root.join(&self.log_file)
    }

    pub fn chart_path(&self) -> PathBuf {
        self.root.join(&self.chart_file)
    }

    /// Per-session export file, keyed by session id and format
    pub fn session_path(&self, session: &Session, format: &str, extension: &str) -> PathBuf {
        let name = if format == extension {
            format!("{}.{}", session.id, extension)
        } else {
            format!("{}-{}.{}", session.id, format, extension)
        };
        self.root.join(name)
    }

    /// Create the directory if it does not exist yet
    pub fn ensure(&self) -> Result<()> {
        if self.root.exists() {
            if !self.root.is_dir() {
                return Err(HotColdError::Validation(format!(
                    "{} is not a directory",
                    self.root.display()
                )));
            }
            return Ok(());
        }
        fs::create_dir_all(&self.root).map_err(|e| {
            HotColdError::Io(e).with_context(format!(
                "Failed to create output directory {}",
                self.root.display()
            ))
        })?;
        debug!("Created output directory {:?}", self.root);
        Ok(())
    }
}

impl Default for OutputDir {
    fn default() -> Self {
        Self::from_config(&ExportConfig::default())
    }
}
