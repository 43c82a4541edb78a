//! Default locations for configuration and output

use std::path::PathBuf;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "hot-cold";
const APPLICATION: &str = "hot-cold";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "hot-cold.toml";

fn fallback_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".hot-cold")
}

/// Directory holding the configuration file
pub fn config_dir() -> PathBuf {
    directories::ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(fallback_dir)
}

/// Default configuration file path
pub fn default_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}
