//! Persisting the artifacts of a won session

use crate::log_store::GameLogStore;
use crate::output::OutputDir;
use hc_core::engine::Session;
use hc_core::error::{HotColdError, Result};
use hc_core::export::{ChartExporter, ChartRenderer, ExportManager};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Outcome of recording a win; failures are collected, not raised
#[derive(Debug, Default)]
pub struct WinReport {
    pub log_path: Option<PathBuf>,
    pub chart_path: Option<PathBuf>,
    pub exported: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

impl WinReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    fn warn(&mut self, what: &str, err: HotColdError) {
        warn!("Could not write {}: {}", what, err);
        self.warnings.push(err.to_string());
    }
}

/// Appends the log line, writes the chart and any extra exports after a win
pub struct WinRecorder {
    output: OutputDir,
    write_chart: bool,
    chart_format: String,
    extra_formats: Vec<String>,
    exports: ExportManager,
}

impl WinRecorder {
    pub fn new(output: OutputDir) -> Self {
        Self {
            output,
            write_chart: true,
            chart_format: "svg".to_string(),
            extra_formats: Vec::new(),
            exports: ExportManager::new(),
        }
    }

    pub fn with_chart(mut self, enabled: bool) -> Self {
        self.write_chart = enabled;
        self
    }

    /// Draw the chart with another renderer, registered under its extension
    pub fn with_renderer(mut self, renderer: Box<dyn ChartRenderer>) -> Self {
        self.chart_format = renderer.file_extension().to_string();
        self.exports.register(Box::new(ChartExporter::new(renderer)));
        self
    }

    /// Also export every win in these formats, one file per session
    pub fn with_formats<I, S>(mut self, formats: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for format in formats {
            let format = format.into();
            if !self.exports.has_format(&format) {
                return Err(HotColdError::Validation(format!(
                    "Unknown export format: {} (available: {})",
                    format,
                    self.exports.available_formats().join(", ")
                )));
            }
            if !self.extra_formats.contains(&format) {
                self.extra_formats.push(format);
            }
        }
        Ok(self)
    }

    pub fn output(&self) -> &OutputDir {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut OutputDir {
        &mut self.output
    }

    pub fn extra_formats(&self) -> &[String] {
        &self.extra_formats
    }

    /// Chart location, forced to the renderer's extension
    fn chart_path(&self, report: &mut WinReport) -> PathBuf {
        let configured = self.output.chart_path();
        let matches = configured
            .extension()
            .is_some_and(|ext| ext == self.chart_format.as_str());
        if matches {
            return configured;
        }

        let path = configured.with_extension(&self.chart_format);
        let message = format!(
            "chart file {} does not match the {} renderer, writing {} instead",
            file_name(&configured),
            self.chart_format,
            file_name(&path)
        );
        warn!("{}", message);
        report.warnings.push(message);
        path
    }

    /// Export the log line, chart and extra formats for a won session
    ///
    /// Every failure is logged and returned as a warning; the session is
    /// only borrowed and stays with the caller either way.
    pub fn record(&self, session: &Session) -> WinReport {
        let mut report = WinReport::default();

        if let Err(e) = self.output.ensure() {
            report.warn("to the output directory", e);
            return report;
        }

        let log = GameLogStore::new(self.output.log_path());
        match log.append(session) {
            Ok(()) => report.log_path = Some(log.path().to_path_buf()),
            Err(e) => report.warn("game log", e),
        }

        if self.write_chart {
            let path = self.chart_path(&mut report);
            match self.exports.export_to_file(session, &self.chart_format, &path) {
                Ok(()) => report.chart_path = Some(path),
                Err(e) => report.warn("closeness chart", e),
            }
        }

        for format in &self.extra_formats {
            let Some(exporter) = self.exports.get(format) else {
                continue;
            };
            let path = self
                .output
                .session_path(session, exporter.format_name(), exporter.file_extension());
            match self.exports.export_to_file(session, format, &path) {
                Ok(()) => report.exported.push(path),
                Err(e) => report.warn(&format!("{} export", format), e),
            }
        }

        debug!(
            "Recorded session {} with {} warning(s)",
            session.id,
            report.warnings.len()
        );
        report
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hc_core::config::ExportConfig;
    use hc_core::engine::{GuessEngine, GuessEvaluator};
    use hc_core::export::ClosenessSeries;
    use std::fs;
    use tempfile::TempDir;

    fn won_session() -> Session {
        let mut engine = GuessEngine::with_seed(21);
        let target = engine.session().target();
        engine.submit_guess(if target > 50 { 1 } else { 100 });
        engine.submit_guess(target);
        engine.session().clone()
    }

    struct FailingRenderer;

    impl ChartRenderer for FailingRenderer {
        fn render(&self, _series: &ClosenessSeries) -> Result<String> {
            Err(HotColdError::Render("backend unavailable".to_string()))
        }

        fn file_extension(&self) -> &str {
            "png"
        }
    }

    struct CsvRenderer;

    impl ChartRenderer for CsvRenderer {
        fn render(&self, series: &ClosenessSeries) -> Result<String> {
            Ok(series
                .points
                .iter()
                .map(|p| format!("{},{}\n", p.attempt, p.distance))
                .collect())
        }

        fn file_extension(&self) -> &str {
            "csv"
        }
    }

    #[test]
    fn test_record_writes_log_and_chart() {
        let dir = TempDir::new().unwrap();
        let recorder = WinRecorder::new(OutputDir::new(dir.path()));
        let session = won_session();

        let report = recorder.record(&session);
        assert!(report.is_clean(), "{:?}", report.warnings);

        let log = fs::read_to_string(report.log_path.unwrap()).unwrap();
        assert_eq!(
            log,
            format!("target={}, attempts=2\n", session.target())
        );
        let chart = fs::read_to_string(report.chart_path.unwrap()).unwrap();
        assert!(chart.starts_with("<svg"));
        assert!(report.exported.is_empty());
    }

    #[test]
    fn test_record_twice_appends_log_and_replaces_chart() {
        let dir = TempDir::new().unwrap();
        let recorder = WinRecorder::new(OutputDir::new(dir.path()));
        let session = won_session();

        recorder.record(&session);
        recorder.record(&session);

        let log = fs::read_to_string(recorder.output().log_path()).unwrap();
        assert_eq!(log.lines().count(), 2);
        let chart = fs::read_to_string(recorder.output().chart_path()).unwrap();
        assert_eq!(chart.matches("<svg").count(), 1);
    }

    #[test]
    fn test_chart_can_be_disabled() {
        let dir = TempDir::new().unwrap();
        let recorder = WinRecorder::new(OutputDir::new(dir.path())).with_chart(false);

        let report = recorder.record(&won_session());
        assert!(report.log_path.is_some());
        assert!(report.chart_path.is_none());
        assert!(!recorder.output().chart_path().exists());
    }

    #[test]
    fn test_render_failure_is_a_warning() {
        let dir = TempDir::new().unwrap();
        let mut config = ExportConfig::default();
        config.output_dir = dir.path().to_path_buf();
        config.chart_file = "closeness_chart.png".to_string();
        let recorder = WinRecorder::new(OutputDir::from_config(&config))
            .with_renderer(Box::new(FailingRenderer));

        let report = recorder.record(&won_session());
        assert!(report.log_path.is_some());
        assert!(report.chart_path.is_none());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("backend unavailable"));
    }

    #[test]
    fn test_custom_renderer_writes_through_export_manager() {
        let dir = TempDir::new().unwrap();
        let mut config = ExportConfig::default();
        config.output_dir = dir.path().to_path_buf();
        config.chart_file = "closeness.csv".to_string();
        let recorder = WinRecorder::new(OutputDir::from_config(&config))
            .with_renderer(Box::new(CsvRenderer));

        let report = recorder.record(&won_session());
        assert!(report.is_clean(), "{:?}", report.warnings);
        let chart = fs::read_to_string(dir.path().join("closeness.csv")).unwrap();
        assert_eq!(chart.lines().last(), Some("2,0"));
    }

    #[test]
    fn test_mismatched_chart_extension_is_reported() {
        let dir = TempDir::new().unwrap();
        let mut config = ExportConfig::default();
        config.output_dir = dir.path().to_path_buf();
        config.chart_file = "last.png".to_string();
        let recorder = WinRecorder::new(OutputDir::from_config(&config));

        let report = recorder.record(&won_session());
        assert_eq!(report.chart_path, Some(dir.path().join("last.svg")));
        assert!(dir.path().join("last.svg").exists());
        assert!(!dir.path().join("last.png").exists());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("last.png"));
        assert!(report.warnings[0].contains("last.svg"));
    }

    #[test]
    fn test_extra_formats_write_one_file_per_session() {
        let dir = TempDir::new().unwrap();
        let recorder = WinRecorder::new(OutputDir::new(dir.path()))
            .with_chart(false)
            .with_formats(["json", "json"])
            .unwrap();
        assert_eq!(recorder.extra_formats(), ["json".to_string()]);

        let session = won_session();
        let report = recorder.record(&session);
        assert!(report.is_clean(), "{:?}", report.warnings);
        assert_eq!(report.exported.len(), 1);

        let path = &report.exported[0];
        assert!(path.starts_with(dir.path()));
        assert!(path.to_string_lossy().contains(session.id.as_str()));
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(json["target"], session.target());
        assert_eq!(json["attempts"], 2);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let err = WinRecorder::new(OutputDir::default())
            .with_formats(["pdf"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("Unknown export format: pdf"));
        assert!(err.to_string().contains("json"));
    }

    #[test]
    fn test_unusable_output_dir_is_a_warning() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let recorder = WinRecorder::new(OutputDir::new(&blocker));
        let session = won_session();
        let report = recorder.record(&session);

        assert!(!report.is_clean());
        assert!(report.log_path.is_none());
        assert_eq!(session.attempts(), 2);
    }
}
