//! The guess evaluation engine

use super::feedback::{distance, Feedback, Thresholds};
use super::session::{GuessRecord, Session};
use crate::config::GameConfig;
use crate::error::Result;
use crate::types::GuessRange;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

/// Capability of evaluating guesses against a hidden target
pub trait GuessEvaluator {
    /// Start a new session, discarding the current one
    fn reset(&mut self);

    /// Evaluate a guess, record it and return the feedback
    fn submit_guess(&mut self, guess: i64) -> Feedback;

    /// The active session
    fn session(&self) -> &Session;
}

/// Owns the active session and the random source targets are drawn from
#[derive(Debug, Clone)]
pub struct GuessEngine<R = ChaCha8Rng> {
    rng: R,
    range: GuessRange,
    thresholds: Thresholds,
    session: Session,
}

impl GuessEngine<ChaCha8Rng> {
    /// Engine over the default range, seeded from system entropy
    pub fn new() -> Self {
        Self::with_rng(
            ChaCha8Rng::from_entropy(),
            GuessRange::default(),
            Thresholds::default(),
        )
    }

    /// Engine whose targets are reproducible for a given seed
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(
            ChaCha8Rng::seed_from_u64(seed),
            GuessRange::default(),
            Thresholds::default(),
        )
    }

    /// Build an engine from game settings, optionally seeded
    pub fn from_config(config: &GameConfig, seed: Option<u64>) -> Result<Self> {
        let range = config.range()?;
        config.thresholds.validate()?;
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self::with_rng(rng, range, config.thresholds))
    }
}

impl Default for GuessEngine<ChaCha8Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> GuessEngine<R> {
    /// Engine over an arbitrary random source
    pub fn with_rng(mut rng: R, range: GuessRange, thresholds: Thresholds) -> Self {
        let session = Self::draw_session(&mut rng, range);
        Self {
            rng,
            range,
            thresholds,
            session,
        }
    }

    fn draw_session(rng: &mut R, range: GuessRange) -> Session {
        let target = rng.gen_range(range.as_inclusive());
        let session = Session::new(target, range);
        debug!("Started session {} over {}", session.id, range);
        session
    }

    pub fn range(&self) -> GuessRange {
        self.range
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Feedback of the most recent guess, if any
    pub fn last_feedback(&self) -> Option<Feedback> {
        self.session.last().map(|r| r.feedback)
    }

    pub fn is_won(&self) -> bool {
        self.session.is_won()
    }

    /// Hand the finished session out and start a fresh one
    pub fn take_session(&mut self) -> Session {
        let next = Self::draw_session(&mut self.rng, self.range);
        std::mem::replace(&mut self.session, next)
    }
}

impl<R: Rng> GuessEvaluator for GuessEngine<R> {
    fn reset(&mut self) {
        let previous = self.take_session();
        info!(
            "Reset session {} after {} attempts",
            previous.id,
            previous.attempts()
        );
    }

    fn submit_guess(&mut self, guess: i64) -> Feedback {
        let target = self.session.target();
        let feedback = self
            .thresholds
            .classify_distance(distance(guess, target));
        self.session.push(GuessRecord { guess, feedback });

        debug!(
            "Attempt {}: {} -> {:?}",
            self.session.attempts(),
            guess,
            feedback
        );
        if feedback.is_win() {
            info!(
                "Session {} won in {} attempts",
                self.session.id,
                self.session.attempts()
            );
        }
        feedback
    }

    fn session(&self) -> &Session {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn engine() -> GuessEngine {
        GuessEngine::with_seed(7)
    }

    #[test]
    fn test_new_engine_starts_empty() {
        let engine = engine();
        let session = engine.session();
        assert_eq!(session.attempts(), 0);
        assert!(session.history().is_empty());
        assert!(GuessRange::default().contains(session.target()));
        assert!(engine.last_feedback().is_none());
    }

    #[test]
    fn test_guessing_target_wins() {
        let mut engine = engine();
        let target = engine.session().target();
        assert_eq!(engine.submit_guess(target), Feedback::Win);
        assert!(engine.is_won());
    }

    #[test]
    fn test_attempts_track_history_in_order() {
        let mut engine = engine();
        let guesses = [3, 99, 50, 50, 12];
        for g in guesses {
            engine.submit_guess(g);
        }

        let session = engine.session();
        assert_eq!(session.attempts(), guesses.len());
        let recorded: Vec<i64> = session.history().iter().map(|r| r.guess).collect();
        assert_eq!(recorded, guesses.to_vec());
    }

    #[test]
    fn test_no_range_check_inside_engine() {
        let mut engine = engine();
        assert_eq!(engine.submit_guess(-1000), Feedback::Cold);
        assert_eq!(engine.submit_guess(5000), Feedback::Cold);
        assert_eq!(engine.session().attempts(), 2);
    }

    #[test]
    fn test_feedback_matches_classifier() {
        let mut engine = engine();
        let target = engine.session().target();
        for g in 1..=100 {
            let expected = Thresholds::default().classify_distance(distance(g, target));
            assert_eq!(engine.submit_guess(g), expected);
        }
        let wins = engine
            .session()
            .history()
            .iter()
            .filter(|r| r.feedback.is_win())
            .count();
        assert_eq!(wins, 1);
    }

    #[test]
    fn test_reset_clears_session() {
        let mut engine = engine();
        engine.submit_guess(10);
        engine.submit_guess(20);
        let old_id = engine.session().id.clone();

        engine.reset();

        assert_eq!(engine.session().attempts(), 0);
        assert!(engine.session().history().is_empty());
        assert_ne!(engine.session().id, old_id);
    }

    #[test]
    fn test_reset_draws_targets_across_range() {
        let mut engine = engine();
        let mut seen = HashSet::new();
        for _ in 0..500 {
            engine.reset();
            let target = engine.session().target();
            assert!(GuessRange::default().contains(target));
            seen.insert(target);
        }
        // 500 uniform draws over 100 values miss almost nothing
        assert!(seen.len() > 90, "only {} distinct targets", seen.len());
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = GuessEngine::with_seed(42);
        let b = GuessEngine::with_seed(42);
        assert_eq!(a.session().target(), b.session().target());
    }

    #[test]
    fn test_custom_range_and_thresholds() {
        let range = GuessRange::new(1, 3).unwrap();
        let thresholds = Thresholds {
            very_hot: 1,
            hot: 1,
            warm: 1,
        };
        let mut engine = GuessEngine::with_rng(ChaCha8Rng::seed_from_u64(1), range, thresholds);
        let target = engine.session().target();
        assert!(range.contains(target));
        assert_eq!(engine.submit_guess(target + 1), Feedback::VeryHot);
        assert_eq!(engine.submit_guess(target + 2), Feedback::Cold);
    }

    #[test]
    fn test_take_session_returns_finished_round() {
        let mut engine = engine();
        let target = engine.session().target();
        engine.submit_guess(target);

        let finished = engine.take_session();
        assert!(finished.is_won());
        assert_eq!(engine.session().attempts(), 0);
    }

    #[test]
    fn test_from_config_rejects_bad_thresholds() {
        let mut config = GameConfig::default();
        config.thresholds.hot = 1;
        assert!(GuessEngine::from_config(&config, Some(1)).is_err());
    }

    #[test]
    fn test_engine_behind_trait_object() {
        let mut evaluator: Box<dyn GuessEvaluator> = Box::new(engine());
        let target = evaluator.session().target();
        assert!(evaluator.submit_guess(target).is_win());
        evaluator.reset();
        assert_eq!(evaluator.session().attempts(), 0);
    }
}
