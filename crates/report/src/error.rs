// Copyright 2025 Benchplot Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the reporting pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, deriving, or rendering benchmark data.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Input table is missing, malformed, or does not match its schema.
    #[error("Data format error in {}: {reason}", .path.display())]
    DataFormat {
        /// Offending input file.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// A record whose ops or duration is zero cannot feed a ratio.
    #[error("Degenerate record {name:?}: ops={ops}, duration={duration}ns")]
    DegenerateRecord {
        /// Record name.
        name: String,
        /// Operation count.
        ops: u64,
        /// Duration in nanoseconds.
        duration: u64,
    },

    /// Classification rule cannot be used.
    #[error("Invalid classification rule {pattern:?}: {reason}")]
    InvalidRule {
        /// The rejected pattern.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Chart backend failed to draw or save.
    #[error("Failed to render {}: {reason}", .path.display())]
    Render {
        /// Target image path.
        path: PathBuf,
        /// Backend error message.
        reason: String,
    },

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error when writing derived tables.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ReportError {
    /// Build a [`ReportError::DataFormat`] for the given path.
    pub fn data_format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DataFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error should abort the whole dataset rather than one chart.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DataFormat { .. } | Self::Config(_) | Self::InvalidRule { .. })
    }
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        ReportError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Serialization(err.to_string())
    }
}

/// Result type for reporting operations.
pub type Result<T> = std::result::Result<T, ReportError>;
