//! Core type definitions for hot-cold

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use uuid::Uuid;

/// Lowest number the game picks by default
pub const DEFAULT_MIN: i64 = 1;

/// Highest number the game picks by default
pub const DEFAULT_MAX: i64 = 100;

/// Unique identifier for a game session
/// Format: YYYYMMDDHHMMSS-<short_uuid>
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a new SessionId
    pub fn generate() -> Self {
        let now = chrono::Utc::now();
        let uuid = Uuid::new_v4();
        let short_uuid = &uuid.to_string()[..8];
        SessionId(format!("{}-{}", now.format("%Y%m%d%H%M%S"), short_uuid))
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inclusive range the secret number is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRange {
    pub min: i64,
    pub max: i64,
}

impl GuessRange {
    /// Create a range, rejecting empty ones
    pub fn new(min: i64, max: i64) -> crate::Result<Self> {
        if min > max {
            return Err(crate::HotColdError::Validation(format!(
                "Invalid range: {} is greater than {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// Check whether a number lies inside the range
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn as_inclusive(&self) -> RangeInclusive<i64> {
        self.min..=self.max
    }
}

impl Default for GuessRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
        }
    }
}

impl fmt::Display for GuessRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.min, self.max)
    }
}
