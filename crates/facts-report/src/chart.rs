//! Renderer-neutral line charts.
//!
//! A [`Chart`] is a title, two axis labels and one or more named series of
//! `(date, value)` points ordered by date. Undefined values never become
//! points, so a series can be shorter than the table it came from. Rendering
//! is behind [`ChartRenderer`]; [`TextRenderer`] draws an ASCII plot and the
//! JSON form of a chart can be handed to any external plotting tool.

use chrono::NaiveDate;
use facts_core::{FactsError, Result};
use serde::Serialize;
use std::fmt::Write as _;

const MARKERS: [char; 4] = ['*', 'o', '+', 'x'];
const MIN_WIDTH: usize = 20;
const MIN_HEIGHT: usize = 5;
/// Widest plot area accepted, in characters.
pub const MAX_WIDTH: usize = 400;
/// Tallest plot area accepted, in lines.
pub const MAX_HEIGHT: usize = 200;
const LABEL_WIDTH: usize = 12;

/// One named line in a chart.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSeries {
    /// Legend entry.
    pub name: String,
    /// Points ordered by date.
    pub points: Vec<(NaiveDate, f64)>,
}

impl ChartSeries {
    /// Creates a series, ordering the points by date.
    pub fn new(name: impl Into<String>, mut points: Vec<(NaiveDate, f64)>) -> Self {
        points.sort_by_key(|(date, _)| *date);
        Self {
            name: name.into(),
            points,
        }
    }

    /// Creates a series from possibly undefined values; undefined ones are skipped.
    pub fn from_options(
        name: impl Into<String>,
        points: impl IntoIterator<Item = (NaiveDate, Option<f64>)>,
    ) -> Self {
        Self::new(
            name,
            points
                .into_iter()
                .filter_map(|(date, value)| value.map(|v| (date, v)))
                .collect(),
        )
    }

    /// Returns true if the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A line chart over time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Chart {
    /// Chart title.
    pub title: String,
    /// Horizontal axis label.
    pub x_label: String,
    /// Vertical axis label.
    pub y_label: String,
    /// Lines drawn on the chart.
    pub series: Vec<ChartSeries>,
}

impl Chart {
    /// Creates a chart without series and a `Date` horizontal axis.
    pub fn new(title: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: "Date".to_string(),
            y_label: y_label.into(),
            series: Vec::new(),
        }
    }

    /// Adds a series.
    #[must_use]
    pub fn with_series(mut self, series: ChartSeries) -> Self {
        self.series.push(series);
        self
    }

    /// Returns true if no series has a point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(ChartSeries::is_empty)
    }

    /// Serializes the chart for an external renderer.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(FactsError::from)
    }
}

/// Charts stacked vertically under one title.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Panels {
    /// Overall title.
    pub title: String,
    /// Panels from top to bottom.
    pub charts: Vec<Chart>,
}

impl Panels {
    /// Creates a panel group.
    pub fn new(title: impl Into<String>, charts: Vec<Chart>) -> Self {
        Self {
            title: title.into(),
            charts,
        }
    }

    /// Serializes the panels for an external renderer.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(FactsError::from)
    }
}

/// Draws charts into text.
pub trait ChartRenderer {
    /// Renders a single chart.
    fn render(&self, chart: &Chart) -> String;

    /// Renders a panel group, one chart after another under the group title.
    fn render_panels(&self, panels: &Panels) -> String {
        let mut out = format!("{}\n", panels.title);
        for chart in &panels.charts {
            out.push_str(&self.render(chart));
            out.push('\n');
        }
        out
    }
}

/// ASCII line plot for terminals.
///
/// Points are placed on a `width` x `height` grid, marked with one character
/// per series and joined with dots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextRenderer {
    width: usize,
    height: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(72, 16)
    }
}

impl TextRenderer {
    /// Creates a renderer with the given plot area, clamped to
    /// `MIN_WIDTH..=MAX_WIDTH` by `MIN_HEIGHT..=MAX_HEIGHT`.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.clamp(MIN_WIDTH, MAX_WIDTH),
            height: height.clamp(MIN_HEIGHT, MAX_HEIGHT),
        }
    }

    /// Plot area width in characters.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Plot area height in lines.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    fn column(&self, date: NaiveDate, first: NaiveDate, span: i64) -> usize {
        if span == 0 {
            return self.width / 2;
        }
        let offset = (date - first).num_days() as f64 / span as f64;
        ((offset * (self.width - 1) as f64).round() as usize).min(self.width - 1)
    }

    fn row(&self, value: f64, min: f64, max: f64) -> usize {
        if max == min {
            return self.height / 2;
        }
        let offset = (max - value) / (max - min);
        ((offset * (self.height - 1) as f64).round() as usize).min(self.height - 1)
    }
}

fn draw_segment(grid: &mut [Vec<char>], from: (usize, usize), to: (usize, usize)) {
    let (c0, r0) = (from.0 as i64, from.1 as i64);
    let (c1, r1) = (to.0 as i64, to.1 as i64);
    let steps = (c1 - c0).abs().max((r1 - r0).abs());
    for step in 1..steps {
        let t = step as f64 / steps as f64;
        let c = (c0 as f64 + (c1 - c0) as f64 * t).round() as usize;
        let r = (r0 as f64 + (r1 - r0) as f64 * t).round() as usize;
        if grid[r][c] == ' ' {
            grid[r][c] = '.';
        }
    }
}

impl ChartRenderer for TextRenderer {
    fn render(&self, chart: &Chart) -> String {
        let mut out = format!("{}\n", chart.title);
        let points = chart.series.iter().flat_map(|s| s.points.iter());

        let (Some(first), Some(last)) = (
            points.clone().map(|(d, _)| *d).min(),
            points.clone().map(|(d, _)| *d).max(),
        ) else {
            out.push_str("  (no data)\n");
            return out;
        };
        let min = points.clone().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
        let max = points.map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
        let span = (last - first).num_days();

        let mut grid = vec![vec![' '; self.width]; self.height];
        for (series, marker) in chart.series.iter().zip(MARKERS.iter().cycle()) {
            let cells: Vec<(usize, usize)> = series
                .points
                .iter()
                .map(|(date, value)| (self.column(*date, first, span), self.row(*value, min, max)))
                .collect();
            for pair in cells.windows(2) {
                draw_segment(&mut grid, pair[0], pair[1]);
            }
            for (c, r) in cells {
                grid[r][c] = *marker;
            }
        }

        let _ = writeln!(out, "{:>LABEL_WIDTH$}", chart.y_label);
        for (i, line) in grid.iter().enumerate() {
            let label = if i == 0 {
                crate::report::format_value(max)
            } else if i == self.height - 1 {
                crate::report::format_value(min)
            } else {
                String::new()
            };
            let body: String = line.iter().collect();
            let _ = writeln!(out, "{label:>LABEL_WIDTH$} |{}", body.trim_end());
        }
        let _ = writeln!(out, "{:>LABEL_WIDTH$} +{}", "", "-".repeat(self.width));

        let first_label = first.to_string();
        let last_label = last.to_string();
        let gap = self
            .width
            .saturating_sub(first_label.len() + last_label.len())
            .max(1);
        let _ = writeln!(
            out,
            "{:>LABEL_WIDTH$}  {first_label}{}{last_label}",
            "",
            " ".repeat(gap)
        );
        let _ = writeln!(out, "{:>LABEL_WIDTH$}  {}", "", chart.x_label);

        if chart.series.len() > 1 || chart.series.iter().any(|s| !s.name.is_empty()) {
            let legend: Vec<String> = chart
                .series
                .iter()
                .zip(MARKERS.iter().cycle())
                .map(|(s, m)| format!("{m} {}", s.name))
                .collect();
            let _ = writeln!(out, "{:>LABEL_WIDTH$}  {}", "", legend.join("   "));
        }
        out
    }
}
