// Copyright 2025 Benchplot Contributors
// SPDX-License-Identifier: Apache-2.0

//! Reduction of derived records to plotted statistics.
//!
//! Two modes are supported:
//!
//! - **Cross-run averaging** for repeated trials of one configuration:
//!   [`mean_throughput`] and [`per_run`].
//! - **Cross-family comparison** for multi-series data: [`comparisons`]
//!   picks one representative record per series for each workload size.

use crate::classify::{Partition, Series};
use crate::record::DerivedRecord;
use serde::Serialize;

/// Statistics for one run of a repeated-trial benchmark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStats {
    /// 1-based run number.
    pub run: usize,
    /// Duration in milliseconds.
    pub duration_ms: f64,
    /// Nanoseconds per operation.
    pub latency_ns: f64,
    /// Operations per second.
    pub throughput: f64,
}

/// Arithmetic mean of per-record throughput.
///
/// This is the mean of ratios, not total ops over total duration.
/// Returns `None` for an empty slice.
pub fn mean_throughput(records: &[DerivedRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let sum: f64 = records.iter().map(|r| r.throughput).sum();
    Some(sum / records.len() as f64)
}

/// Per-run statistics for `(run, record)` pairs.
///
/// Runs keep the number they were given, so a skipped input row leaves a
/// gap instead of shifting later runs.
pub fn per_run<'a>(runs: impl IntoIterator<Item = (usize, &'a DerivedRecord)>) -> Vec<RunStats> {
    runs.into_iter()
        .map(|(run, r)| RunStats {
            run,
            duration_ms: r.duration_ms(),
            latency_ns: r.latency,
            throughput: r.throughput,
        })
        .collect()
}

/// Distinct op counts across `series`, ascending.
pub fn distinct_ops<'a>(series: impl IntoIterator<Item = &'a Series>) -> Vec<u64> {
    let mut ops: Vec<u64> = series
        .into_iter()
        .flat_map(|s| s.records.iter().map(|r| r.ops))
        .collect();
    ops.sort_unstable();
    ops.dedup();
    ops
}

/// One bar of a cross-family comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Family label.
    pub family: String,
    /// Representative record for this family.
    pub record: DerivedRecord,
}

/// Families of one category compared at one workload size.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Action category.
    pub category: String,
    /// Workload size.
    pub ops: u64,
    /// One bar per family that has a record at `ops`.
    pub bars: Vec<Bar>,
}

/// Pick the first record at `ops` from each series.
///
/// Series without a record at `ops` contribute no bar.
pub fn compare_at<'a>(series: impl IntoIterator<Item = &'a Series>, ops: u64) -> Vec<Bar> {
    series
        .into_iter()
        .filter_map(|s| {
            s.at_ops(ops).map(|record| Bar {
                family: s.family.clone(),
                record: record.clone(),
            })
        })
        .collect()
}

/// One comparison per distinct workload size of `category`, smallest first.
pub fn comparisons(partition: &Partition, category: &str) -> Vec<Comparison> {
    distinct_ops(partition.for_category(category))
        .into_iter()
        .map(|ops| Comparison {
            category: category.to_string(),
            ops,
            bars: compare_at(partition.for_category(category), ops),
        })
        .collect()
}

/// Duration curve of one family: `(ops, duration_ms)` points, ops ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    /// Family label.
    pub family: String,
    /// Plotted points.
    pub points: Vec<(f64, f64)>,
}

/// Duration curves for every family of `category`.
pub fn duration_curves(partition: &Partition, category: &str) -> Vec<Curve> {
    partition
        .for_category(category)
        .map(|s| Curve {
            family: s.family.clone(),
            points: s
                .records
                .iter()
                .map(|r| (r.ops as f64, r.duration_ms()))
                .collect(),
        })
        .collect()
}
