//! Config command
//!
//! Manage hot-cold configuration.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::fs;
use std::path::Path;

use hc_core::config::Config;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the configuration file path
    Path,

    /// Reset to default configuration
    Reset {
        /// Force reset without confirmation
        #[arg(long)]
        force: bool,
    },

    /// Validate configuration
    Validate,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, config_path: &Path) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(config_path, json),
        ConfigCommand::Path => {
            println!("{}", config_path.display());
            Ok(())
        }
        ConfigCommand::Reset { force } => reset_config(config_path, force),
        ConfigCommand::Validate => validate_config(config_path),
    }
}

fn show_config(config_path: &Path, as_json: bool) -> Result<()> {
    use colored::Colorize;

    if !config_path.exists() {
        eprintln!(
            "{} No configuration at {}, showing defaults. Run '{}' to create one.",
            "⚠".yellow(),
            config_path.display(),
            "hot-cold config reset".cyan()
        );
    }

    let config = Config::load_or_default(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!("{}", "Configuration:".bold().underline());
        println!("{}", config_path.display().to_string().dimmed());
        println!();
        println!("{}", config.to_toml()?);
    }

    Ok(())
}

fn default_config_text() -> Result<String> {
    Ok(format!(
        "# hot-cold configuration\n\n{}",
        Config::default().to_toml()?
    ))
}

fn reset_config(config_path: &Path, force: bool) -> Result<()> {
    use colored::Colorize;

    if !force {
        use dialoguer::Confirm;

        let confirmed = Confirm::new()
            .with_prompt("Reset configuration to defaults?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Reset cancelled.");
            return Ok(());
        }
    }

    if config_path.exists() {
        let backup_path = format!(
            "{}.backup-{}",
            config_path.display(),
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        );
        fs::copy(config_path, &backup_path)?;
        println!("{} Backed up to {}", "✓".green(), backup_path);
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(config_path, default_config_text()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!(
        "{} Configuration reset to defaults at {}",
        "✓".green(),
        config_path.display()
    );

    Ok(())
}

fn validate_config(config_path: &Path) -> Result<()> {
    use colored::Colorize;

    if !config_path.exists() {
        eprintln!(
            "{} Configuration not found at {}",
            "✗".red(),
            config_path.display()
        );
        return Ok(());
    }

    let content = fs::read_to_string(config_path)?;

    let value = match toml::from_str::<toml::Value>(&content) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{} Invalid TOML: {}", "✗".red(), e);
            return Ok(());
        }
    };
    println!("{} Configuration is valid TOML", "✓".green());

    for section in ["game", "export", "ui"] {
        if value.get(section).is_none() {
            println!("{} [{}] section not found, defaults apply", "⚠".yellow(), section);
        }
    }

    match toml::from_str::<Config>(&content)
        .map_err(hc_core::HotColdError::from)
        .and_then(|config| config.validate())
    {
        Ok(()) => println!("{} Settings are consistent", "✓".green()),
        Err(e) => eprintln!("{} {}", "✗".red(), e),
    }

    Ok(())
}
