//! Configuration management for hot-cold

use crate::engine::Thresholds;
use crate::error::{HotColdError, Result};
use crate::export::ExportManager;
use crate::types::{GuessRange, DEFAULT_MAX, DEFAULT_MIN};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Game rules
    pub game: GameConfig,
    /// Export settings
    pub export: ExportConfig,
    /// UI settings
    pub ui: UiConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HotColdError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| HotColdError::from(e).with_context(path.display().to_string()))?;
        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is missing
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(HotColdError::FileNotFound(_)) => {
                debug!("No configuration at {:?}, using defaults", path);
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Serialize to pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<()> {
        self.game.range()?;
        self.game.thresholds.validate()?;

        if self.export.log_file.trim().is_empty() {
            return Err(HotColdError::Config(
                "export.log_file must not be empty".to_string(),
            ));
        }
        if self.export.chart_file.trim().is_empty() {
            return Err(HotColdError::Config(
                "export.chart_file must not be empty".to_string(),
            ));
        }

        let exports = ExportManager::new();
        for format in &self.export.formats {
            if !exports.has_format(format) {
                return Err(HotColdError::Config(format!(
                    "export.formats: unknown format '{}' (available: {})",
                    format,
                    exports.available_formats().join(", ")
                )));
            }
        }
        Ok(())
    }
}

/// Game rule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Lowest possible target
    pub min: i64,
    /// Highest possible target
    pub max: i64,
    /// Reject guesses outside [min, max] before they reach the engine
    pub validate_range: bool,
    /// Temperature bands
    pub thresholds: Thresholds,
}

impl GameConfig {
    pub fn range(&self) -> Result<GuessRange> {
        GuessRange::new(self.min, self.max)
            .map_err(|e| HotColdError::Config(format!("[game] {}", e)))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            validate_range: true,
            thresholds: Thresholds::default(),
        }
    }
}

/// Export-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory the log and chart are written into
    pub output_dir: PathBuf,
    /// Append-only log of won games
    pub log_file: String,
    /// Closeness chart file
    pub chart_file: String,
    /// Write the chart on a win
    pub write_chart: bool,
    /// Extra per-session exports written on a win, by format name
    pub formats: Vec<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            log_file: "game_log.txt".to_string(),
            chart_file: "closeness_chart.svg".to_string(),
            write_chart: true,
            formats: Vec::new(),
        }
    }
}

/// UI-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Colored terminal output
    pub color: bool,
    /// Print the full guess history after a win
    pub show_history_on_win: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_history_on_win: true,
        }
    }
}
