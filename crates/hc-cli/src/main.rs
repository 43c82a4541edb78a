//! hot-cold - guess the number CLI
//!
//! The program picks a secret number and answers every guess with how hot or
//! cold it is. Won games are appended to a log and plotted as a chart.
//!
//! ## Quick Start
//!
//! ```bash
//! # Play with the defaults (numbers 1 to 100)
//! hot-cold
//!
//! # Save results somewhere else
//! hot-cold play --output-dir ~/games
//!
//! # Look back at won games
//! hot-cold log
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
