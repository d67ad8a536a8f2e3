// Copyright 2025 Benchplot Contributors
// SPDX-License-Identifier: Apache-2.0

//! Chart construction and emission.
//!
//! Charts are built as fully computed [`Chart`] values (labels, values,
//! annotations and colors resolved) and handed to a [`ChartBackend`], which
//! only draws. Each emission acquires a fresh drawing surface and releases
//! it after saving, so nothing carries over between charts.

pub mod bitmap;
pub mod palette;

use crate::aggregate::{Comparison, Curve, RunStats};
use crate::error::Result;
use crate::format;
use palette::{evenly_spaced, Rgb, DEFAULT_COLOR};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

pub use bitmap::PngBackend;

/// How tick values on an axis are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AxisFormat {
    /// Up to two decimals.
    Plain,
    /// `K` / `M` suffixes, see [`format::magnitude`].
    Magnitude,
}

impl AxisFormat {
    /// Format one tick value.
    pub fn tick(&self, value: f64) -> String {
        match self {
            AxisFormat::Plain => format::plain(value),
            AxisFormat::Magnitude => format::magnitude(value),
        }
    }
}

/// Axis description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    /// Axis title.
    pub label: String,
    /// Tick formatting.
    pub format: AxisFormat,
}

impl Axis {
    fn new(label: impl Into<String>, format: AxisFormat) -> Self {
        Self {
            label: label.into(),
            format,
        }
    }
}

/// One bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSpec {
    /// Category label on the x axis.
    pub label: String,
    /// Bar height.
    pub value: f64,
    /// Text drawn above the bar.
    pub annotation: Option<String>,
    /// Fill color.
    pub color: Rgb,
}

/// One line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSpec {
    /// Legend entry.
    pub label: String,
    /// `(x, y)` points in drawing order.
    pub points: Vec<(f64, f64)>,
    /// Stroke color.
    pub color: Rgb,
}

/// Chart geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChartKind {
    /// Categorical bars.
    Bar(Vec<BarSpec>),
    /// Lines over a numeric x axis.
    Line(Vec<LineSpec>),
}

/// A fully computed chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    /// Caption.
    pub title: String,
    /// Horizontal axis.
    pub x_axis: Axis,
    /// Vertical axis.
    pub y_axis: Axis,
    /// Whether to draw a legend.
    pub legend: bool,
    /// Bars or lines.
    pub kind: ChartKind,
}

impl Chart {
    /// Whether the chart has anything to draw.
    pub fn is_empty(&self) -> bool {
        match &self.kind {
            ChartKind::Bar(bars) => bars.is_empty(),
            ChartKind::Line(lines) => lines.iter().all(|l| l.points.is_empty()),
        }
    }
}

/// Drawing backend that turns a [`Chart`] into an image file.
#[cfg_attr(test, mockall::automock)]
pub trait ChartBackend {
    /// Draw `chart` and save it to `path`, overwriting any existing file.
    fn render(&mut self, chart: &Chart, path: &Path) -> Result<()>;
}

/// Record of one emission attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOutcome {
    /// Chart caption.
    pub title: String,
    /// Target image path.
    pub path: PathBuf,
    /// Error message if rendering failed.
    pub error: Option<String>,
}

/// Emits charts through a backend into an output directory.
pub struct Renderer<B> {
    backend: B,
    output_dir: PathBuf,
    outcomes: Vec<ChartOutcome>,
}

impl<B: ChartBackend> Renderer<B> {
    /// Create a renderer writing into `output_dir`.
    pub fn new(backend: B, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            output_dir: output_dir.into(),
            outcomes: Vec::new(),
        }
    }

    /// Output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render `chart` to `<output_dir>/<file_name>`.
    ///
    /// A failure is logged and recorded; it does not affect later charts.
    pub fn emit(&mut self, file_name: &str, chart: &Chart) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        debug!(path = %path.display(), title = %chart.title, "Rendering chart");

        let result = self.backend.render(chart, &path);
        self.outcomes.push(ChartOutcome {
            title: chart.title.clone(),
            path: path.clone(),
            error: result.as_ref().err().map(|e| e.to_string()),
        });

        match result {
            Ok(()) => Ok(path),
            Err(e) => {
                error!(path = %path.display(), error = %e, "Chart render failed");
                Err(e)
            }
        }
    }

    /// Every emission attempt so far.
    pub fn outcomes(&self) -> &[ChartOutcome] {
        &self.outcomes
    }

    /// Consume the renderer, returning its outcomes.
    pub fn into_outcomes(self) -> Vec<ChartOutcome> {
        self.outcomes
    }
}

/// File name of the duration line chart for `action`.
pub fn action_file_name(action: &str) -> String {
    format!("benchmark_{}.png", action)
}

/// File name of the throughput comparison for `action` at `ops`.
pub fn comparison_file_name(action: &str, ops: u64) -> String {
    format!("benchmark_{}_{}.png", action, ops)
}

/// Duration-versus-ops line chart, one line per family.
pub fn duration_chart(action: &str, curves: &[Curve]) -> Chart {
    let colors = evenly_spaced(curves.len());
    let lines = curves
        .iter()
        .zip(colors)
        .map(|(curve, color)| LineSpec {
            label: curve.family.clone(),
            points: curve.points.clone(),
            color,
        })
        .collect();

    Chart {
        title: format!("Queue - {}", action),
        x_axis: Axis::new("Number of operations", AxisFormat::Magnitude),
        y_axis: Axis::new("Duration (ms)", AxisFormat::Plain),
        legend: true,
        kind: ChartKind::Line(lines),
    }
}

/// Throughput bars for every family of one comparison.
///
/// Colors are spread over the families present in this chart only.
pub fn comparison_chart(comparison: &Comparison) -> Chart {
    let colors = evenly_spaced(comparison.bars.len());
    let bars = comparison
        .bars
        .iter()
        .zip(colors)
        .map(|(bar, color)| BarSpec {
            label: bar.family.clone(),
            value: bar.record.throughput,
            annotation: Some(format::fixed(bar.record.throughput, 0, "")),
            color,
        })
        .collect();

    Chart {
        title: format!("{} - {} operations", comparison.category, comparison.ops),
        x_axis: Axis::new("Queue", AxisFormat::Plain),
        y_axis: Axis::new("Throughput (op/s)", AxisFormat::Magnitude),
        legend: true,
        kind: ChartKind::Bar(bars),
    }
}

/// Per-run metric of a repeated-trial benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMetric {
    /// Wall-clock duration in milliseconds.
    TimeTaken,
    /// Nanoseconds per operation.
    Latency,
    /// Operations per second.
    Throughput,
}

impl RunMetric {
    /// All metrics in emission order.
    pub const ALL: [RunMetric; 3] = [RunMetric::TimeTaken, RunMetric::Latency, RunMetric::Throughput];

    /// Fixed output file name.
    pub fn file_name(&self) -> &'static str {
        match self {
            RunMetric::TimeTaken => "benchmark_time_taken.png",
            RunMetric::Latency => "benchmark_latency.png",
            RunMetric::Throughput => "benchmark_throughput.png",
        }
    }

    fn title(&self, runs: usize) -> String {
        match self {
            RunMetric::TimeTaken => format!("Time taken across {} runs", runs),
            RunMetric::Latency => format!("Average latency per operation across {} runs", runs),
            RunMetric::Throughput => format!("Throughput across {} runs", runs),
        }
    }

    fn y_axis(&self) -> Axis {
        match self {
            RunMetric::TimeTaken => Axis::new("Time taken (ms)", AxisFormat::Plain),
            RunMetric::Latency => Axis::new("Average Latency (ns)", AxisFormat::Plain),
            RunMetric::Throughput => Axis::new("Throughput (op/s)", AxisFormat::Magnitude),
        }
    }

    /// Plotted value for one run.
    pub fn value(&self, run: &RunStats) -> f64 {
        match self {
            RunMetric::TimeTaken => run.duration_ms,
            RunMetric::Latency => run.latency_ns,
            RunMetric::Throughput => run.throughput,
        }
    }

    /// Bar annotation for one value.
    pub fn annotate(&self, value: f64) -> String {
        match self {
            RunMetric::TimeTaken => format::fixed(value, 2, "ms"),
            RunMetric::Latency => format::fixed(value, 2, "ns"),
            RunMetric::Throughput => format::fixed(value, 0, ""),
        }
    }
}

/// One bar per run for `metric`, x ticks labelled with the run number.
///
/// `total` is the number of input runs, including any that were skipped.
pub fn runs_chart(metric: RunMetric, runs: &[RunStats], total: usize) -> Chart {
    let bars = runs
        .iter()
        .map(|run| {
            let value = metric.value(run);
            BarSpec {
                label: run.run.to_string(),
                value,
                annotation: Some(metric.annotate(value)),
                color: DEFAULT_COLOR,
            }
        })
        .collect();

    Chart {
        title: metric.title(total),
        x_axis: Axis::new("Runs", AxisFormat::Plain),
        y_axis: metric.y_axis(),
        legend: false,
        kind: ChartKind::Bar(bars),
    }
}
