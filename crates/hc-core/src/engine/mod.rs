//! Guess evaluation engine
//!
//! The engine owns the secret target, the attempt counter and the ordered
//! history of guesses for the active session.
//!
//! # Example
//!
//! ```
//! use hc_core::engine::{Feedback, GuessEngine, GuessEvaluator};
//!
//! let mut engine = GuessEngine::with_seed(42);
//! let target = engine.session().target();
//!
//! assert_eq!(engine.submit_guess(target), Feedback::Win);
//! assert_eq!(engine.session().attempts(), 1);
//!
//! engine.reset();
//! assert_eq!(engine.session().attempts(), 0);
//! ```

mod feedback;
mod game;
mod session;

pub use feedback::{classify, distance, Feedback, Thresholds};
pub use game::{GuessEngine, GuessEvaluator};
pub use session::{GuessRecord, Session};
