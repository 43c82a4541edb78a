//! Export functionality for sessions
//!
//! Exporters turn a finished session into text artifacts:
//! - `log`: the one-line `target=<n>, attempts=<n>` summary appended to the game log
//! - `svg`: the closeness chart (attempt number vs. distance to the target)
//! - `json`: the full session with its closeness series
//!
//! # Example
//!
//! ```
//! use hc_core::engine::{GuessEngine, GuessEvaluator};
//! use hc_core::export::ExportManager;
//!
//! let mut engine = GuessEngine::with_seed(1);
//! let target = engine.session().target();
//! engine.submit_guess(target);
//!
//! let manager = ExportManager::new();
//! let line = manager.export(engine.session(), "log").unwrap();
//! assert_eq!(line, format!("target={}, attempts=1\n", target));
//! ```

mod chart;
mod exporter;
mod json;
mod log;

pub use chart::{ChartExporter, ChartRenderer, ClosenessPoint, ClosenessSeries, SvgChartRenderer};
pub use exporter::{append, ExportManager, Exporter};
pub use json::{ExportData, JsonExporter};
pub use log::LogExporter;
