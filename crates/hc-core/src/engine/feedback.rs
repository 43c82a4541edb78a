//! Proximity feedback and the distance classifier

use crate::error::{HotColdError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Proximity classification returned for a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    /// The guess is the secret number
    Win,
    /// Within the very-hot threshold
    VeryHot,
    /// Within the hot threshold
    Hot,
    /// Within the warm threshold
    Warm,
    /// Everything further away
    Cold,
}

impl Feedback {
    /// Ordinal temperature: higher means closer to the target
    pub fn warmth(self) -> u8 {
        match self {
            Feedback::Win => 4,
            Feedback::VeryHot => 3,
            Feedback::Hot => 2,
            Feedback::Warm => 1,
            Feedback::Cold => 0,
        }
    }

    pub fn is_win(self) -> bool {
        matches!(self, Feedback::Win)
    }

    /// Human readable hint
    pub fn label(self) -> &'static str {
        match self {
            Feedback::Win => "You got it!",
            Feedback::VeryHot => "Very hot!",
            Feedback::Hot => "Hot.",
            Feedback::Warm => "Warm.",
            Feedback::Cold => "Cold.",
        }
    }

    /// Icon shown next to the hint
    pub fn icon(self) -> &'static str {
        match self {
            Feedback::Win => "🎉",
            Feedback::VeryHot => "🔥",
            Feedback::Hot => "🌡️",
            Feedback::Warm => "☀️",
            Feedback::Cold => "❄️",
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Distance limits (inclusive) for each temperature band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub very_hot: u64,
    pub hot: u64,
    pub warm: u64,
}

impl Thresholds {
    /// Check that the bands nest inside each other
    pub fn validate(&self) -> Result<()> {
        if self.very_hot == 0 {
            return Err(HotColdError::Validation(
                "very_hot threshold must be at least 1".to_string(),
            ));
        }
        if self.very_hot > self.hot || self.hot > self.warm {
            return Err(HotColdError::Validation(format!(
                "Thresholds must satisfy very_hot <= hot <= warm (got {}, {}, {})",
                self.very_hot, self.hot, self.warm
            )));
        }
        Ok(())
    }

    /// Classify an absolute distance
    pub fn classify_distance(&self, distance: u64) -> Feedback {
        if distance == 0 {
            Feedback::Win
        } else if distance <= self.very_hot {
            Feedback::VeryHot
        } else if distance <= self.hot {
            Feedback::Hot
        } else if distance <= self.warm {
            Feedback::Warm
        } else {
            Feedback::Cold
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            very_hot: 5,
            hot: 10,
            warm: 20,
        }
    }
}

/// Absolute distance between a guess and the target
pub fn distance(guess: i64, target: i64) -> u64 {
    guess.abs_diff(target)
}

/// Classify a guess against a target with the default thresholds
pub fn classify(guess: i64, target: i64) -> Feedback {
    Thresholds::default().classify_distance(distance(guess, target))
}
