//! JSON exporter for sessions

use super::chart::ClosenessSeries;
use super::exporter::Exporter;
use crate::engine::{GuessRecord, Session};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Serialized view of a finished session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportData {
    pub session_id: String,
    pub started_at: DateTime<Utc>,
    pub range: [i64; 2],
    pub target: i64,
    pub attempts: usize,
    pub won: bool,
    pub history: Vec<GuessRecord>,
    pub series: ClosenessSeries,
}

impl From<&Session> for ExportData {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id.to_string(),
            started_at: session.started_at,
            range: [session.range.min, session.range.max],
            target: session.target(),
            attempts: session.attempts(),
            won: session.is_won(),
            history: session.history().to_vec(),
            series: ClosenessSeries::from_session(session),
        }
    }
}

/// JSON exporter
pub struct JsonExporter {
    pretty: bool,
}

impl JsonExporter {
    /// Pretty-printed output
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for JsonExporter {
    fn export(&self, session: &Session) -> Result<String> {
        let data = ExportData::from(session);
        let json = if self.pretty {
            serde_json::to_string_pretty(&data)?
        } else {
            serde_json::to_string(&data)?
        };
        Ok(json)
    }

    fn format_name(&self) -> &str {
        if self.pretty {
            "json"
        } else {
            "json-compact"
        }
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Feedback, GuessEngine, GuessEvaluator};

    #[test]
    fn test_json_export() {
        let mut engine = GuessEngine::with_seed(9);
        let target = engine.session().target();
        engine.submit_guess(target);

        let json = JsonExporter::new().export(engine.session()).unwrap();
        let data: ExportData = serde_json::from_str(&json).unwrap();

        assert_eq!(data.target, target);
        assert_eq!(data.attempts, 1);
        assert!(data.won);
        assert_eq!(data.history[0].feedback, Feedback::Win);
        assert_eq!(data.series.points[0].distance, 0);
        assert_eq!(data.range, [1, 100]);
    }

    #[test]
    fn test_compact_is_single_line() {
        let engine = GuessEngine::with_seed(9);
        let json = JsonExporter::compact().export(engine.session()).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"won\":false"));
    }
}
