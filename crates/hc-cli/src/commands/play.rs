//! Play command
//!
//! Interactive guessing loop reading one action per line.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use hc_core::config::Config;
use hc_core::engine::{Feedback, GuessEngine, GuessEvaluator, Session};
use hc_core::validation::GuessValidator;
use hc_storage::{OutputDir, WinRecorder, WinReport};

/// Arguments for the play command
#[derive(Debug, Default, Args)]
pub struct PlayArgs {
    /// Seed for the secret number (reproducible games)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory for the game log and chart
    #[arg(long, short)]
    pub output_dir: Option<PathBuf>,

    /// Accept guesses outside the configured range
    #[arg(long)]
    pub no_validate: bool,

    /// Don't write the closeness chart on a win
    #[arg(long)]
    pub no_chart: bool,

    /// Also export every won session in this format (json, json-compact, log, svg)
    #[arg(long = "export", value_name = "FORMAT")]
    pub formats: Vec<String>,
}

/// One line of player input
#[derive(Debug, Clone, PartialEq, Eq)]
enum PlayerAction {
    Guess(String),
    Reset,
    History,
    SetDir(PathBuf),
    ShowDir,
    Help,
    Quit,
}

impl PlayerAction {
    fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (trimmed, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "q" | "quit" | "exit" => PlayerAction::Quit,
            "r" | "reset" => PlayerAction::Reset,
            "h" | "history" => PlayerAction::History,
            "?" | "help" => PlayerAction::Help,
            "dir" if rest.is_empty() => PlayerAction::ShowDir,
            "dir" => PlayerAction::SetDir(PathBuf::from(rest)),
            _ => PlayerAction::Guess(trimmed.to_string()),
        }
    }
}

/// Drives a guess evaluator from line-based input
pub struct PlayLoop<E: GuessEvaluator> {
    engine: E,
    validator: GuessValidator,
    recorder: WinRecorder,
    show_history_on_win: bool,
}

impl<E: GuessEvaluator> PlayLoop<E> {
    pub fn new(engine: E, validator: GuessValidator, recorder: WinRecorder) -> Self {
        Self {
            engine,
            validator,
            recorder,
            show_history_on_win: true,
        }
    }

    pub fn with_history_on_win(mut self, enabled: bool) -> Self {
        self.show_history_on_win = enabled;
        self
    }

    pub fn session(&self) -> &Session {
        self.engine.session()
    }

    /// Run until quit or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<()> {
        self.print_intro(out)?;

        let mut buf = Vec::new();
        loop {
            write!(out, "> ")?;
            out.flush()?;

            buf.clear();
            let read = input
                .read_until(b'\n', &mut buf)
                .context("Failed to read input")?;
            if read == 0 {
                writeln!(out)?;
                break;
            }
            // Undecodable bytes become U+FFFD and are rejected as a guess
            let line = String::from_utf8_lossy(&buf);

            match PlayerAction::parse(&line) {
                PlayerAction::Quit => break,
                PlayerAction::Reset => {
                    self.engine.reset();
                    writeln!(out, "{}", "New number picked. Good luck!".cyan())?;
                }
                PlayerAction::History => self.print_history(out)?,
                PlayerAction::Help => print_help(out)?,
                PlayerAction::ShowDir => {
                    writeln!(
                        out,
                        "Current save directory: {}",
                        self.recorder.output().root().display()
                    )?;
                }
                PlayerAction::SetDir(path) => {
                    self.recorder.output_mut().set_root(&path);
                    writeln!(out, "Current save directory: {}", path.display())?;
                }
                PlayerAction::Guess(text) => self.handle_guess(&text, out)?,
            }
        }

        writeln!(out, "Bye!")?;
        Ok(())
    }

    fn handle_guess<W: Write>(&mut self, text: &str, out: &mut W) -> Result<()> {
        let guess = match self.validator.parse(text) {
            Ok(guess) => guess,
            Err(e) => {
                writeln!(out, "{}", e.to_string().red())?;
                return Ok(());
            }
        };

        let feedback = self.engine.submit_guess(guess);
        let attempt = self.engine.session().attempts();
        writeln!(
            out,
            "Attempt #{}: {} -> {} {}",
            attempt,
            guess,
            feedback.icon(),
            paint(feedback)
        )?;

        if feedback.is_win() {
            self.celebrate(out)?;
        }
        Ok(())
    }

    fn celebrate<W: Write>(&self, out: &mut W) -> Result<()> {
        let session = self.engine.session();
        writeln!(out)?;
        writeln!(out, "{}", "Congratulations!".green().bold())?;
        writeln!(
            out,
            "You guessed the number {} in {} attempts.",
            session.target(),
            session.attempts()
        )?;

        if self.show_history_on_win {
            self.print_history(out)?;
        }

        let report = self.recorder.record(self.engine.session());
        print_report(&report, out)?;

        writeln!(
            out,
            "Type {} to play again or {} to exit.",
            "reset".cyan(),
            "quit".cyan()
        )?;
        Ok(())
    }

    fn print_intro<W: Write>(&self, out: &mut W) -> Result<()> {
        let range = self.validator.range();
        writeln!(
            out,
            "{}",
            format!("Guess the number from {} to {}", range.min, range.max).bold()
        )?;
        writeln!(out, "Type {} for commands.", "help".cyan())?;
        Ok(())
    }

    fn print_history<W: Write>(&self, out: &mut W) -> Result<()> {
        let history = self.engine.session().history();
        if history.is_empty() {
            writeln!(out, "{}", "No guesses yet.".dimmed())?;
            return Ok(());
        }
        for (i, record) in history.iter().enumerate() {
            writeln!(
                out,
                "Attempt #{}: {} -> {} {}",
                i + 1,
                record.guess,
                record.feedback.icon(),
                record.feedback
            )?;
        }
        Ok(())
    }
}

fn paint(feedback: Feedback) -> colored::ColoredString {
    let label = feedback.label();
    match feedback {
        Feedback::Win => label.green().bold(),
        Feedback::VeryHot => label.red().bold(),
        Feedback::Hot => label.red(),
        Feedback::Warm => label.yellow(),
        Feedback::Cold => label.blue(),
    }
}

fn print_report<W: Write>(report: &WinReport, out: &mut W) -> Result<()> {
    if let Some(path) = &report.log_path {
        writeln!(out, "{} Result saved to {}", "✓".green(), path.display())?;
    }
    if let Some(path) = &report.chart_path {
        writeln!(out, "{} Chart saved to {}", "✓".green(), path.display())?;
    }
    for path in &report.exported {
        writeln!(out, "{} Session exported to {}", "✓".green(), path.display())?;
    }
    for warning in &report.warnings {
        writeln!(out, "{} Could not save results: {}", "⚠".yellow(), warning)?;
    }
    Ok(())
}

fn print_help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "  <number>     submit a guess")?;
    writeln!(out, "  history, h   show your guesses so far")?;
    writeln!(out, "  reset, r     pick a new number")?;
    writeln!(out, "  dir [PATH]   show or change the save directory")?;
    writeln!(out, "  quit, q      leave the game")?;
    Ok(())
}

/// Execute the play command
pub fn execute(args: PlayArgs, config: &Config) -> Result<()> {
    let engine = GuessEngine::from_config(&config.game, args.seed)
        .context("Failed to set up the game")?;

    let validate = config.game.validate_range && !args.no_validate;
    let validator = GuessValidator::new(engine.range()).with_range_check(validate);

    let mut output = OutputDir::from_config(&config.export);
    if let Some(dir) = args.output_dir {
        output.set_root(dir);
    }
    let recorder = WinRecorder::new(output)
        .with_chart(config.export.write_chart && !args.no_chart)
        .with_formats(config.export.formats.iter().chain(&args.formats).cloned())
        .context("Invalid export format")?;

    tracing::info!(
        "Starting game over {} (range check: {})",
        engine.range(),
        validate
    );

    let mut game = PlayLoop::new(engine, validator, recorder)
        .with_history_on_win(config.ui.show_history_on_win);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    game.run(stdin.lock(), &mut stdout)?;

    tracing::debug!(
        "Left session {} after {} attempts",
        game.session().id,
        game.session().attempts()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn play(input: &str, dir: &TempDir) -> (String, PlayLoop<GuessEngine>) {
        colored::control::set_override(false);
        let engine = GuessEngine::with_seed(99);
        let recorder = WinRecorder::new(OutputDir::new(dir.path()));
        let mut game = PlayLoop::new(engine, GuessValidator::default(), recorder);

        let mut out = Vec::new();
        game.run(input.as_bytes(), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), game)
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!(PlayerAction::parse("q"), PlayerAction::Quit);
        assert_eq!(PlayerAction::parse(" RESET "), PlayerAction::Reset);
        assert_eq!(PlayerAction::parse("h"), PlayerAction::History);
        assert_eq!(PlayerAction::parse("dir"), PlayerAction::ShowDir);
        assert_eq!(
            PlayerAction::parse("dir /tmp/games"),
            PlayerAction::SetDir(PathBuf::from("/tmp/games"))
        );
        assert_eq!(
            PlayerAction::parse("42"),
            PlayerAction::Guess("42".to_string())
        );
    }

    #[test]
    fn test_invalid_input_leaves_state_unchanged() {
        let dir = TempDir::new().unwrap();
        let (out, game) = play("abc\n0\n101\nquit\n", &dir);

        assert!(out.contains("'abc' is not a valid number"));
        assert!(out.contains("Enter a number from 1 to 100"));
        assert_eq!(game.session().attempts(), 0);
    }

    #[test]
    fn test_win_writes_log_and_chart() {
        let dir = TempDir::new().unwrap();
        let target = GuessEngine::with_seed(99).session().target();
        let (out, game) = play(&format!("{}\nquit\n", target), &dir);

        assert!(out.contains("Congratulations!"));
        assert!(out.contains(&format!("You guessed the number {} in 1 attempts.", target)));
        assert!(game.session().is_won());

        let log = fs::read_to_string(dir.path().join("game_log.txt")).unwrap();
        assert_eq!(log, format!("target={}, attempts=1\n", target));
        assert!(dir.path().join("closeness_chart.svg").exists());
    }

    #[test]
    fn test_reset_starts_over() {
        let dir = TempDir::new().unwrap();
        let (out, game) = play("50\n60\nreset\n", &dir);

        assert!(out.contains("Attempt #2: 60"));
        assert!(out.contains("New number picked"));
        assert_eq!(game.session().attempts(), 0);
    }

    #[test]
    fn test_history_lists_guesses_in_order() {
        let dir = TempDir::new().unwrap();
        let (out, _) = play("10\n90\nhistory\n", &dir);

        let first = out.rfind("Attempt #1: 10").unwrap();
        let second = out.rfind("Attempt #2: 90").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_set_dir_redirects_output() {
        let dir = TempDir::new().unwrap();
        let elsewhere = dir.path().join("elsewhere");
        let target = GuessEngine::with_seed(99).session().target();
        let input = format!("dir {}\n{}\n", elsewhere.display(), target);
        play(&input, &dir);

        assert!(elsewhere.join("game_log.txt").exists());
        assert!(!dir.path().join("game_log.txt").exists());
    }

    #[test]
    fn test_invalid_utf8_is_reported_and_play_continues() {
        let dir = TempDir::new().unwrap();
        colored::control::set_override(false);
        let engine = GuessEngine::with_seed(99);
        let recorder = WinRecorder::new(OutputDir::new(dir.path()));
        let mut game = PlayLoop::new(engine, GuessValidator::default(), recorder);

        let mut out = Vec::new();
        let input: &[u8] = b"50\n\xff\xfe\n60\nquit\n";
        game.run(input, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("is not a valid number"));
        assert!(out.contains("Attempt #2: 60"));
        assert!(out.contains("Bye!"));
        assert_eq!(game.session().attempts(), 2);
    }

    #[test]
    fn test_win_writes_extra_exports() {
        let dir = TempDir::new().unwrap();
        colored::control::set_override(false);
        let engine = GuessEngine::with_seed(99);
        let target = engine.session().target();
        let recorder = WinRecorder::new(OutputDir::new(dir.path()))
            .with_formats(["json"])
            .unwrap();
        let mut game = PlayLoop::new(engine, GuessValidator::default(), recorder);

        let mut out = Vec::new();
        game.run(format!("{}\n", target).as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        let exported = dir.path().join(format!("{}.json", game.session().id));
        assert!(out.contains("Session exported to"));
        assert!(exported.exists());
    }

    #[test]
    fn test_end_of_input_quits() {
        let dir = TempDir::new().unwrap();
        let (out, _) = play("", &dir);
        assert!(out.contains("Bye!"));
    }
}
