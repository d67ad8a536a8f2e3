// Copyright 2025 Benchplot Contributors
// SPDX-License-Identifier: Apache-2.0

//! Pipeline orchestration.
//!
//! A [`Pipeline`] owns the configuration, the compiled classification table
//! and the chart renderer for a single run, and drives each dataset through
//! load, derive, group, aggregate and render in sequence.

use crate::aggregate::{comparisons, duration_curves, mean_throughput, per_run};
use crate::classify::{partition, Classifier};
use crate::config::ReportConfig;
use crate::derive::derive;
use crate::edges::{load_edges, write_edges, EDGES_FILE};
use crate::error::Result;
use crate::io;
use crate::loader::{self, Schema};
use crate::record::BenchmarkRecord;
use crate::render::{
    action_file_name, comparison_chart, comparison_file_name, duration_chart, runs_chart,
    ChartBackend, ChartOutcome, PngBackend, Renderer, RunMetric,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Dataset name of the multi-series queue benchmark.
pub const QUEUE_DATASET: &str = "queue";

/// Dataset name of the repeated-trial benchmark.
pub const RUNS_DATASET: &str = "runs";

/// Outcome of reporting on one tabular dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetReport {
    /// Dataset name.
    pub dataset: String,
    /// Input file.
    pub input: PathBuf,
    /// Records loaded.
    pub records: usize,
    /// Records skipped as degenerate.
    pub skipped: usize,
    /// Records no classification rule matched.
    pub unclassified: usize,
    /// Mean of per-run throughput, for repeated-trial data.
    pub mean_throughput: Option<f64>,
    /// Derived table written for this dataset.
    pub derived_table: PathBuf,
    /// Charts attempted for this dataset.
    pub charts: Vec<ChartOutcome>,
}

/// Outcome of the edge-list hand-off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeReport {
    /// Raw edge list.
    pub input: PathBuf,
    /// Edges kept.
    pub edges: usize,
    /// File handed to the layout tool.
    pub output: PathBuf,
}

/// Everything produced by one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// When the run finished.
    pub generated_at: DateTime<Utc>,
    /// Tabular datasets, in processing order.
    pub datasets: Vec<DatasetReport>,
    /// Edge-list hand-off, if performed.
    pub edges: Option<EdgeReport>,
}

impl RunReport {
    /// Number of charts that failed to render.
    pub fn failed_charts(&self) -> usize {
        self.datasets
            .iter()
            .flat_map(|d| d.charts.iter())
            .filter(|c| c.error.is_some())
            .count()
    }
}

/// A single reporting run.
pub struct Pipeline<B> {
    config: ReportConfig,
    classifier: Classifier,
    renderer: Renderer<B>,
}

impl Pipeline<PngBackend> {
    /// Build a pipeline that renders PNG files.
    pub fn new(config: ReportConfig) -> Result<Self> {
        let backend = PngBackend::new(config.chart.width, config.chart.height);
        Self::with_backend(config, backend)
    }
}

impl<B: ChartBackend> Pipeline<B> {
    /// Build a pipeline with a custom chart backend.
    pub fn with_backend(config: ReportConfig, backend: B) -> Result<Self> {
        let classifier = Classifier::new(&config.rules)?;
        let renderer = Renderer::new(backend, config.output_dir.clone());
        Ok(Self {
            config,
            classifier,
            renderer,
        })
    }

    /// Effective configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    /// Report on the multi-series queue benchmark at `input`.
    ///
    /// Emits one duration line chart per action category and one throughput
    /// comparison per (category, workload size).
    pub fn run_queue(&mut self, input: &Path) -> Result<DatasetReport> {
        info!(input = %input.display(), "Building queue report");
        let records: Vec<BenchmarkRecord> = loader::load(input, &Schema::queue())?;
        let derivation = derive(&records);

        io::ensure_output_dir(self.output_dir())?;
        let derived_table = self.output_dir().join(io::derived_file_name(QUEUE_DATASET));
        io::write_derived_csv(&derivation.records, &derived_table)?;

        let partition = partition(&derivation.records, &self.classifier);
        let first_chart = self.renderer.outcomes().len();

        for category in self.classifier.categories() {
            let chart = duration_chart(category, &duration_curves(&partition, category));
            if chart.is_empty() {
                debug!(category, "No records for action, skipping line chart");
                continue;
            }
            self.renderer.emit(&action_file_name(category), &chart).ok();
        }

        for category in self.classifier.categories() {
            for comparison in comparisons(&partition, category) {
                let file_name = comparison_file_name(category, comparison.ops);
                self.renderer.emit(&file_name, &comparison_chart(&comparison)).ok();
            }
        }

        if !partition.unclassified.is_empty() {
            warn!(
                count = partition.unclassified.len(),
                "Unclassified records excluded from charts"
            );
        }

        Ok(DatasetReport {
            dataset: QUEUE_DATASET.to_string(),
            input: input.to_path_buf(),
            records: records.len(),
            skipped: derivation.skipped.len(),
            unclassified: partition.unclassified.len(),
            mean_throughput: None,
            derived_table,
            charts: self.renderer.outcomes()[first_chart..].to_vec(),
        })
    }

    /// Report on the repeated-trial benchmark at `input`.
    ///
    /// Emits per-run duration, latency and throughput bar charts and
    /// computes the mean throughput across runs.
    pub fn run_runs(&mut self, input: &Path) -> Result<DatasetReport> {
        info!(input = %input.display(), "Building runs report");
        let records: Vec<BenchmarkRecord> = loader::load(input, &Schema::runs())?;
        let derivation = derive(&records);

        io::ensure_output_dir(self.output_dir())?;
        let derived_table = self.output_dir().join(io::derived_file_name(RUNS_DATASET));
        io::write_derived_csv(&derivation.records, &derived_table)?;

        let runs = per_run(derivation.numbered());
        let first_chart = self.renderer.outcomes().len();
        if runs.is_empty() {
            warn!("No usable runs, skipping charts");
        } else {
            for metric in RunMetric::ALL {
                self.renderer
                    .emit(metric.file_name(), &runs_chart(metric, &runs, records.len()))
                    .ok();
            }
        }

        let mean = mean_throughput(&derivation.records);
        if let Some(mean) = mean {
            info!("Average throughput: {}", mean.round());
        }

        Ok(DatasetReport {
            dataset: RUNS_DATASET.to_string(),
            input: input.to_path_buf(),
            records: records.len(),
            skipped: derivation.skipped.len(),
            unclassified: 0,
            mean_throughput: mean,
            derived_table,
            charts: self.renderer.outcomes()[first_chart..].to_vec(),
        })
    }

    /// Truncate the edge list at `input` and write it for the layout tool.
    pub fn run_edges(&mut self, input: &Path, skip_rows: usize, limit: usize) -> Result<EdgeReport> {
        info!(input = %input.display(), limit, "Preparing edge list");
        let edges = load_edges(input, skip_rows, limit)?;

        io::ensure_output_dir(self.output_dir())?;
        let output = self.output_dir().join(EDGES_FILE);
        write_edges(&edges, &output)?;

        Ok(EdgeReport {
            input: input.to_path_buf(),
            edges: edges.len(),
            output,
        })
    }

    /// Run every enabled dataset, then write the summary.
    ///
    /// A missing or malformed input of an enabled dataset aborts the whole
    /// run before the summary is written.
    pub fn run_all(&mut self) -> Result<RunReport> {
        let mut datasets = Vec::new();

        let queue = self.config.queue.clone();
        if queue.enabled {
            datasets.push(self.run_queue(&queue.input)?);
        } else {
            debug!("Queue dataset disabled, skipping");
        }

        let runs = self.config.runs.clone();
        if runs.enabled {
            datasets.push(self.run_runs(&runs.input)?);
        } else {
            debug!("Runs dataset disabled, skipping");
        }

        let edges_config = self.config.edges.clone();
        let edges = if edges_config.enabled {
            Some(self.run_edges(&edges_config.input, edges_config.skip_rows, edges_config.limit)?)
        } else {
            debug!("Edge list hand-off disabled, skipping");
            None
        };

        self.finish(datasets, edges)
    }

    /// Stamp the run and write `summary.md` and `report.json`.
    pub fn finish(&self, datasets: Vec<DatasetReport>, edges: Option<EdgeReport>) -> Result<RunReport> {
        let report = RunReport {
            generated_at: Utc::now(),
            datasets,
            edges,
        };
        io::write_summary(&report, self.output_dir())?;
        info!(
            dir = %self.output_dir().display(),
            failed = report.failed_charts(),
            "Wrote summary"
        );
        Ok(report)
    }
}
