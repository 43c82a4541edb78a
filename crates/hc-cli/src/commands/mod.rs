//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod log;
pub mod play;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hc_core::config::Config;
use std::path::{Path, PathBuf};

/// hot-cold - guess the secret number, guided by how hot or cold you are
#[derive(Debug, Parser)]
#[command(name = "hot-cold")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "HOT_COLD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Play a game (default)
    Play(play::PlayArgs),

    /// Show the log of won games
    Log(log::LogArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(hc_storage::paths::default_config_path);

    match cli.command {
        Some(Commands::Config(cmd)) => {
            set_color(!cli.no_color);
            config::execute(cmd, &config_path)
        }
        command => {
            let config = load_config(&config_path, cli.config.is_some())?;
            set_color(!cli.no_color && config.ui.color);
            match command {
                Some(Commands::Log(args)) => log::execute(args, &config),
                Some(Commands::Play(args)) => play::execute(args, &config),
                _ => play::execute(play::PlayArgs::default(), &config),
            }
        }
    }
}

/// Load and validate configuration; an explicitly given file must exist
fn load_config(path: &Path, explicit: bool) -> Result<Config> {
    let config = if explicit {
        Config::load(path)
    } else {
        Config::load_or_default(path)
    }
    .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;
    Ok(config)
}

fn set_color(enabled: bool) {
    if !enabled {
        colored::control::set_override(false);
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
