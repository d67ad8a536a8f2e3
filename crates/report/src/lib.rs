// Copyright 2025 Benchplot Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark aggregation and chart reporting.
//!
//! This crate turns raw benchmark CSV output into derived metrics
//! (throughput, average latency) and comparative charts.
//!
//! # Quick Start
//!
//! ```no_run
//! use benchplot_report::{Pipeline, ReportConfig};
//!
//! let mut pipeline = Pipeline::new(ReportConfig::default())?;
//! let report = pipeline.run_all()?;
//!
//! for dataset in &report.datasets {
//!     println!("{}: {} charts", dataset.dataset, dataset.charts.len());
//! }
//! # Ok::<(), benchplot_report::ReportError>(())
//! ```
//!
//! # Modules
//!
//! - [`loader`] - Schema-bound delimited table loading
//! - [`derive`] - Throughput and latency derivation
//! - [`classify`] - Action category and operation family grouping
//! - [`aggregate`] - Cross-run averaging and cross-family comparison
//! - [`render`] - Chart construction and PNG output
//! - [`edges`] - Edge-list hand-off to the graph layout tool
//! - [`io`] / [`markdown`] - Derived tables and run summaries

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod derive;
pub mod edges;
pub mod error;
pub mod format;
pub mod io;
pub mod loader;
pub mod markdown;
pub mod pipeline;
pub mod record;
pub mod render;

pub use crate::config::ReportConfig;
pub use error::{ReportError, Result};
pub use pipeline::{DatasetReport, EdgeReport, Pipeline, RunReport};
pub use record::{BenchmarkRecord, DerivedRecord};

/// Run every configured dataset and write PNG charts and the summary.
///
/// This is the canonical entrypoint used by the command-line tool.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, an input table is
/// malformed, or output files cannot be written. Individual chart failures
/// are recorded in the returned report instead.
pub fn run_all(config: ReportConfig) -> Result<RunReport> {
    Pipeline::new(config)?.run_all()
}
