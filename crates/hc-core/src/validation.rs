//! Guess input validation
//!
//! The engine classifies any integer; rejecting malformed or out-of-range
//! input is the front end's job and happens here, before the engine is
//! touched.

use crate::types::GuessRange;
use thiserror::Error;

/// Why a line of player input could not be used as a guess
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessInputError {
    #[error("Please enter a number")]
    Empty,

    #[error("'{0}' is not a valid number")]
    NotANumber(String),

    #[error("Enter a number from {min} to {max}")]
    OutOfRange { value: i64, min: i64, max: i64 },
}

/// Parses player input into a guess
#[derive(Debug, Clone, Copy)]
pub struct GuessValidator {
    range: GuessRange,
    check_range: bool,
}

impl GuessValidator {
    /// Validator that enforces the given range
    pub fn new(range: GuessRange) -> Self {
        Self {
            range,
            check_range: true,
        }
    }

    /// Toggle the range check; parsing is always enforced
    pub fn with_range_check(mut self, enabled: bool) -> Self {
        self.check_range = enabled;
        self
    }

    pub fn range(&self) -> GuessRange {
        self.range
    }

    /// Parse a raw input line
    pub fn parse(&self, input: &str) -> Result<i64, GuessInputError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(GuessInputError::Empty);
        }

        let value: i64 = trimmed
            .parse()
            .map_err(|_| GuessInputError::NotANumber(trimmed.to_string()))?;

        if self.check_range && !self.range.contains(value) {
            return Err(GuessInputError::OutOfRange {
                value,
                min: self.range.min,
                max: self.range.max,
            });
        }

        Ok(value)
    }
}

impl Default for GuessValidator {
    fn default() -> Self {
        Self::new(GuessRange::default())
    }
}
