//! Closeness chart export
//!
//! The engine only supplies the `(attempt, distance)` series. Drawing it is
//! delegated to a [`ChartRenderer`]; [`SvgChartRenderer`] is the bundled one.

use super::exporter::Exporter;
use crate::engine::Session;
use crate::error::{HotColdError, Result};
use serde::{Deserialize, Serialize};

/// One plotted point: attempt number (1-based) and distance to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosenessPoint {
    pub attempt: usize,
    pub distance: u64,
}

/// Distance to the target for every guess of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosenessSeries {
    pub points: Vec<ClosenessPoint>,
}

impl ClosenessSeries {
    pub fn from_session(session: &Session) -> Self {
        let points = session
            .distances()
            .enumerate()
            .map(|(i, distance)| ClosenessPoint {
                attempt: i + 1,
                distance,
            })
            .collect();
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn max_distance(&self) -> u64 {
        self.points.iter().map(|p| p.distance).max().unwrap_or(0)
    }
}

/// Draws a closeness series into an image document
pub trait ChartRenderer: Send + Sync {
    fn render(&self, series: &ClosenessSeries) -> Result<String>;

    /// File extension of the produced image
    fn file_extension(&self) -> &str;
}

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 500.0;
const LEFT: f64 = 80.0;
const RIGHT: f64 = 30.0;
const TOP: f64 = 60.0;
const BOTTOM: f64 = 70.0;

/// Static SVG line chart with markers, grid and a zero reference line
pub struct SvgChartRenderer {
    title: String,
    line_color: String,
    zero_color: String,
}

impl SvgChartRenderer {
    pub fn new() -> Self {
        Self {
            title: "Closeness to the secret number".to_string(),
            line_color: "orange".to_string(),
            zero_color: "green".to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn plot_width() -> f64 {
        WIDTH - LEFT - RIGHT
    }

    fn plot_height() -> f64 {
        HEIGHT - TOP - BOTTOM
    }

    fn x_of(attempt: usize, count: usize) -> f64 {
        if count <= 1 {
            return LEFT + Self::plot_width() / 2.0;
        }
        LEFT + (attempt - 1) as f64 / (count - 1) as f64 * Self::plot_width()
    }

    fn y_of(distance: u64, y_max: u64) -> f64 {
        TOP + Self::plot_height() - distance as f64 / y_max as f64 * Self::plot_height()
    }

    fn render_axes(&self, svg: &mut String, count: usize, y_max: u64, y_step: u64) {
        let bottom = TOP + Self::plot_height();
        let right = LEFT + Self::plot_width();

        // Horizontal grid and y labels
        let mut tick = 0;
        while tick <= y_max {
            let y = Self::y_of(tick, y_max);
            svg.push_str(&format!(
                "  <line x1=\"{LEFT:.1}\" y1=\"{y:.1}\" x2=\"{right:.1}\" y2=\"{y:.1}\" stroke=\"#cccccc\" stroke-dasharray=\"4 4\"/>\n"
            ));
            svg.push_str(&format!(
                "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"end\">{}</text>\n",
                LEFT - 8.0,
                y + 4.0,
                tick
            ));
            match tick.checked_add(y_step) {
                Some(next) => tick = next,
                None => break,
            }
        }

        // Vertical grid and x labels
        let x_step = count.div_ceil(10).max(1);
        for attempt in (1..=count).step_by(x_step) {
            let x = Self::x_of(attempt, count);
            svg.push_str(&format!(
                "  <line x1=\"{x:.1}\" y1=\"{TOP:.1}\" x2=\"{x:.1}\" y2=\"{bottom:.1}\" stroke=\"#cccccc\" stroke-dasharray=\"4 4\"/>\n"
            ));
            svg.push_str(&format!(
                "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"middle\">{}</text>\n",
                x,
                bottom + 18.0,
                attempt
            ));
        }

        svg.push_str(&format!(
            "  <rect x=\"{LEFT:.1}\" y=\"{TOP:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"none\" stroke=\"black\"/>\n",
            Self::plot_width(),
            Self::plot_height()
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"14\" text-anchor=\"middle\">Attempt number</text>\n",
            LEFT + Self::plot_width() / 2.0,
            HEIGHT - 20.0
        ));
        svg.push_str(&format!(
            "  <text x=\"20\" y=\"{y:.1}\" font-size=\"14\" text-anchor=\"middle\" transform=\"rotate(-90 20 {y:.1})\">Distance from the secret number</text>\n",
            y = TOP + Self::plot_height() / 2.0
        ));
    }

    fn render_legend(&self, svg: &mut String) {
        let x = WIDTH - RIGHT - 230.0;
        let y = TOP + 15.0;
        svg.push_str(&format!(
            "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"220\" height=\"48\" fill=\"white\" stroke=\"#999999\"/>\n",
            x,
            y - 12.0
        ));
        svg.push_str(&format!(
            "  <line x1=\"{:.1}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"{}\" stroke-width=\"2\"/>\n",
            x + 8.0,
            x + 32.0,
            self.line_color
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\">Distance to the secret number</text>\n",
            x + 40.0,
            y + 4.0
        ));
        let y2 = y + 22.0;
        svg.push_str(&format!(
            "  <line x1=\"{:.1}\" y1=\"{y2:.1}\" x2=\"{:.1}\" y2=\"{y2:.1}\" stroke=\"{}\" stroke-width=\"2\" stroke-dasharray=\"6 4\"/>\n",
            x + 8.0,
            x + 32.0,
            self.zero_color
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\">Secret number guessed</text>\n",
            x + 40.0,
            y2 + 4.0
        ));
    }
}

impl Default for SvgChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&self, series: &ClosenessSeries) -> Result<String> {
        if series.is_empty() {
            return Err(HotColdError::Render("no guesses to plot".to_string()));
        }

        let top = series.max_distance().max(1);
        let y_step = nice_step(top as f64 / 5.0);
        // Distances near the full i64 span leave no room to round up
        let y_max = top
            .div_ceil(y_step)
            .checked_mul(y_step)
            .unwrap_or(u64::MAX);
        let count = series.len();

        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" viewBox=\"0 0 {WIDTH} {HEIGHT}\" font-family=\"sans-serif\">\n"
        ));
        svg.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"35\" font-size=\"18\" text-anchor=\"middle\">{}</text>\n",
            WIDTH / 2.0,
            escape(&self.title)
        ));

        self.render_axes(&mut svg, count, y_max, y_step);

        let zero = Self::y_of(0, y_max);
        svg.push_str(&format!(
            "  <line class=\"zero\" x1=\"{LEFT:.1}\" y1=\"{zero:.1}\" x2=\"{:.1}\" y2=\"{zero:.1}\" stroke=\"{}\" stroke-width=\"2\" stroke-dasharray=\"6 4\"/>\n",
            LEFT + Self::plot_width(),
            self.zero_color
        ));

        let coords: Vec<(f64, f64)> = series
            .points
            .iter()
            .map(|p| (Self::x_of(p.attempt, count), Self::y_of(p.distance, y_max)))
            .collect();
        let polyline: Vec<String> = coords
            .iter()
            .map(|(x, y)| format!("{:.1},{:.1}", x, y))
            .collect();
        svg.push_str(&format!(
            "  <polyline class=\"series\" points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\"/>\n",
            polyline.join(" "),
            self.line_color
        ));
        for (x, y) in &coords {
            svg.push_str(&format!(
                "  <circle class=\"marker\" cx=\"{:.1}\" cy=\"{:.1}\" r=\"4\" fill=\"{}\"/>\n",
                x, y, self.line_color
            ));
        }

        self.render_legend(&mut svg);
        svg.push_str("</svg>\n");
        Ok(svg)
    }

    fn file_extension(&self) -> &str {
        "svg"
    }
}

/// Round a raw tick step up to 1, 2 or 5 times a power of ten
fn nice_step(raw: f64) -> u64 {
    if raw <= 1.0 {
        return 1;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    for m in [1.0, 2.0, 5.0, 10.0] {
        if m * magnitude >= raw {
            return (m * magnitude) as u64;
        }
    }
    (10.0 * magnitude) as u64
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Exporter adapter around a chart renderer
pub struct ChartExporter {
    renderer: Box<dyn ChartRenderer>,
}

impl ChartExporter {
    pub fn new(renderer: Box<dyn ChartRenderer>) -> Self {
        Self { renderer }
    }

    pub fn svg() -> Self {
        Self::new(Box::new(SvgChartRenderer::new()))
    }
}

impl Exporter for ChartExporter {
    fn export(&self, session: &Session) -> Result<String> {
        self.renderer.render(&ClosenessSeries::from_session(session))
    }

    fn format_name(&self) -> &str {
        self.renderer.file_extension()
    }

    fn file_extension(&self) -> &str {
        self.renderer.file_extension()
    }
}
