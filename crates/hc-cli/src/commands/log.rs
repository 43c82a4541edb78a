//! Log command
//!
//! Read back the log of won games.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use hc_core::config::Config;
use hc_storage::{GameLogStore, LogSummary, OutputDir};

/// Arguments for the log command
#[derive(Debug, Args)]
pub struct LogArgs {
    /// Directory holding the game log
    #[arg(long, short)]
    pub output_dir: Option<PathBuf>,

    /// Only show the last N games
    #[arg(long, short = 'n')]
    pub last: Option<usize>,

    /// Only print the summary
    #[arg(long)]
    pub summary: bool,
}

/// Execute the log command
pub fn execute(args: LogArgs, config: &Config) -> Result<()> {
    use colored::Colorize;

    let mut output = OutputDir::from_config(&config.export);
    if let Some(dir) = args.output_dir {
        output.set_root(dir);
    }

    let store = GameLogStore::new(output.log_path());
    let entries = store
        .entries()
        .with_context(|| format!("Failed to read {}", store.path().display()))?;

    let Some(summary) = LogSummary::from_entries(&entries) else {
        eprintln!(
            "{} No games logged in {}",
            "⚠".yellow(),
            store.path().display()
        );
        return Ok(());
    };

    if !args.summary {
        let skip = args
            .last
            .map(|n| entries.len().saturating_sub(n))
            .unwrap_or(0);
        println!("{}", "Won games:".bold().underline());
        for (i, entry) in entries.iter().enumerate().skip(skip) {
            println!(
                "  {:>4}. number {:>4} in {} attempts",
                i + 1,
                entry.target.to_string().cyan(),
                entry.attempts.to_string().yellow()
            );
        }
        println!();
    }

    println!("{}", "Summary:".bold().underline());
    println!("  Games:   {}", summary.games);
    println!("  Best:    {} attempts", summary.best.to_string().green());
    println!("  Worst:   {} attempts", summary.worst);
    println!("  Average: {:.1} attempts", summary.average);

    Ok(())
}
