// Copyright 2025 Benchplot Contributors
// SPDX-License-Identifier: Apache-2.0

//! Report configuration.
//!
//! Configuration is read from an optional TOML file. Every key has a
//! default, so an empty or missing file yields [`ReportConfig::default`].
//!
//! ```toml
//! output_dir = "images"
//!
//! [queue]
//! input = "data/benchmark.csv"
//!
//! [runs]
//! input = "app/src/main/resources/benchmark.csv"
//! enabled = false
//!
//! [edges]
//! input = "app/src/main/resources/facebook-wosn-links/out.facebook-wosn-links"
//! limit = 92
//!
//! [[rules]]
//! pattern = "poll"
//! category = "poll"
//! ```

use crate::classify::Rule;
use crate::edges::{DEFAULT_LIMIT, DEFAULT_SKIP_ROWS};
use crate::error::{ReportError, Result};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "benchplot.toml";

/// Input of one tabular dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Path of the CSV file.
    pub input: PathBuf,
    /// Whether `run` reports on this dataset. An enabled dataset with a
    /// missing input aborts the run.
    #[serde(default = "enabled")]
    pub enabled: bool,
}

impl DatasetConfig {
    /// Enabled dataset reading `input`.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            enabled: true,
        }
    }
}

fn enabled() -> bool {
    true
}

/// Edge-list hand-off settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgesConfig {
    /// Path of the raw edge list.
    pub input: PathBuf,
    /// Whether `run` performs the hand-off.
    pub enabled: bool,
    /// Leading comment lines to skip.
    pub skip_rows: usize,
    /// Maximum number of edges to keep.
    pub limit: usize,
}

impl Default for EdgesConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("app/src/main/resources/facebook-wosn-links/out.facebook-wosn-links"),
            enabled: true,
            skip_rows: DEFAULT_SKIP_ROWS,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory receiving charts, derived tables and the summary.
    pub output_dir: PathBuf,
    /// Multi-series queue benchmark.
    pub queue: DatasetConfig,
    /// Repeated-trial benchmark.
    pub runs: DatasetConfig,
    /// Edge-list hand-off.
    pub edges: EdgesConfig,
    /// Ordered classification table.
    pub rules: Vec<Rule>,
    /// Image settings.
    pub chart: ChartConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("images"),
            queue: DatasetConfig::new("data/benchmark.csv"),
            runs: DatasetConfig::new("app/src/main/resources/benchmark.csv"),
            edges: EdgesConfig::default(),
            rules: Rule::defaults(),
            chart: ChartConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Load configuration.
    ///
    /// With `Some(path)` the file must exist. With `None`,
    /// [`DEFAULT_CONFIG_FILE`] is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let source = match path {
            Some(path) => File::new(&path.to_string_lossy(), FileFormat::Toml).required(true),
            None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
        };

        let config: ReportConfig = Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
            .map_err(ReportError::from)?;

        debug!(?config, "Loaded configuration");
        Ok(config)
    }
}
