// Copyright 2025 Benchplot Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark record types.
//!
//! [`BenchmarkRecord`] is the typed row produced by the loader;
//! [`DerivedRecord`] adds the throughput and latency columns computed from it.

use serde::{Deserialize, Serialize};

/// Nanoseconds per second.
pub const NANOS_PER_SEC: f64 = 1e9;

/// Nanoseconds per millisecond.
pub const NANOS_PER_MILLI: f64 = 1e6;

/// One row of benchmark output as written by the upstream harness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Benchmark variant name. Empty for single-series datasets.
    #[serde(default)]
    pub name: String,
    /// Number of operations completed.
    pub ops: u64,
    /// Wall-clock duration in nanoseconds.
    pub duration: u64,
}

impl BenchmarkRecord {
    /// Create a new record.
    pub fn new(name: impl Into<String>, ops: u64, duration: u64) -> Self {
        Self {
            name: name.into(),
            ops,
            duration,
        }
    }

    /// Duration in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.duration as f64 / NANOS_PER_MILLI
    }
}

/// A benchmark record together with its derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedRecord {
    /// Benchmark variant name.
    pub name: String,
    /// Number of operations completed.
    pub ops: u64,
    /// Wall-clock duration in nanoseconds.
    pub duration: u64,
    /// Operations per second.
    pub throughput: f64,
    /// Nanoseconds per operation.
    pub latency: f64,
}

impl DerivedRecord {
    /// Duration in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.duration as f64 / NANOS_PER_MILLI
    }
}
