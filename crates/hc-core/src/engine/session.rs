//! Session data model

use super::feedback::{distance, Feedback};
use crate::types::{GuessRange, SessionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single submitted guess and the answer it received
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub guess: i64,
    pub feedback: Feedback,
}

/// One round of play, from target selection to reset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier
    pub id: SessionId,
    /// When the session was created
    pub started_at: DateTime<Utc>,
    /// Range the target was drawn from
    pub range: GuessRange,
    target: i64,
    history: Vec<GuessRecord>,
}

impl Session {
    pub(crate) fn new(target: i64, range: GuessRange) -> Self {
        Self {
            id: SessionId::generate(),
            started_at: Utc::now(),
            range,
            target,
            history: Vec::new(),
        }
    }

    /// The secret number
    pub fn target(&self) -> i64 {
        self.target
    }

    /// Number of guesses submitted so far
    pub fn attempts(&self) -> usize {
        self.history.len()
    }

    /// Submitted guesses in submission order
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    pub fn last(&self) -> Option<&GuessRecord> {
        self.history.last()
    }

    /// True once any guess hit the target
    pub fn is_won(&self) -> bool {
        self.history.iter().any(|r| r.feedback.is_win())
    }

    /// Distance of every guess from the target, in submission order
    pub fn distances(&self) -> impl Iterator<Item = u64> + '_ {
        self.history.iter().map(|r| distance(r.guess, self.target))
    }

    pub(crate) fn push(&mut self, record: GuessRecord) {
        self.history.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new(42, GuessRange::default());
        assert_eq!(session.target(), 42);
        assert_eq!(session.attempts(), 0);
        assert!(session.history().is_empty());
        assert!(!session.is_won());
        assert!(session.last().is_none());
    }

    #[test]
    fn test_distances_follow_history() {
        let mut session = Session::new(50, GuessRange::default());
        session.push(GuessRecord {
            guess: 20,
            feedback: Feedback::Cold,
        });
        session.push(GuessRecord {
            guess: 55,
            feedback: Feedback::VeryHot,
        });

        let distances: Vec<u64> = session.distances().collect();
        assert_eq!(distances, vec![30, 5]);
        assert_eq!(session.attempts(), 2);
    }

    #[test]
    fn test_session_serialization() {
        let session = Session::new(7, GuessRange::default());
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"target\":7"));

        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id, session.id);
        assert_eq!(restored.target(), 7);
    }
}
