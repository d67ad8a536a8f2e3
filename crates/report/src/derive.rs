// Copyright 2025 Benchplot Contributors
// SPDX-License-Identifier: Apache-2.0

//! Throughput and latency derivation.
//!
//! Records with zero ops or zero duration would produce non-finite ratios.
//! They are skipped and reported back in [`Derivation::skipped`] instead of
//! being plotted as broken points.

use crate::error::{ReportError, Result};
use crate::record::{BenchmarkRecord, DerivedRecord, NANOS_PER_SEC};
use tracing::warn;

/// Outcome of deriving a whole table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Derivation {
    /// Derived records in input order.
    pub records: Vec<DerivedRecord>,
    /// 1-based input row of each entry in `records`.
    pub rows: Vec<usize>,
    /// Input records that were skipped as degenerate.
    pub skipped: Vec<BenchmarkRecord>,
}

impl Derivation {
    /// Derived records paired with their 1-based input row.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &DerivedRecord)> {
        self.rows.iter().copied().zip(self.records.iter())
    }
}

impl TryFrom<&BenchmarkRecord> for DerivedRecord {
    type Error = ReportError;

    fn try_from(record: &BenchmarkRecord) -> Result<Self> {
        if record.ops == 0 || record.duration == 0 {
            return Err(ReportError::DegenerateRecord {
                name: record.name.clone(),
                ops: record.ops,
                duration: record.duration,
            });
        }

        Ok(Self {
            name: record.name.clone(),
            ops: record.ops,
            duration: record.duration,
            throughput: throughput(record.ops, record.duration),
            latency: latency(record.ops, record.duration),
        })
    }
}

/// Operations per second for `ops` completed in `duration_ns`.
pub fn throughput(ops: u64, duration_ns: u64) -> f64 {
    ops as f64 / (duration_ns as f64 / NANOS_PER_SEC)
}

/// Nanoseconds per operation.
pub fn latency(ops: u64, duration_ns: u64) -> f64 {
    duration_ns as f64 / ops as f64
}

/// Derive every record of a table, skipping degenerate ones.
pub fn derive(records: &[BenchmarkRecord]) -> Derivation {
    let mut derivation = Derivation::default();

    for (idx, record) in records.iter().enumerate() {
        match DerivedRecord::try_from(record) {
            Ok(derived) => {
                derivation.records.push(derived);
                derivation.rows.push(idx + 1);
            }
            Err(e) => {
                warn!(error = %e, "Skipping record");
                derivation.skipped.push(record.clone());
            }
        }
    }

    derivation
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = expected.abs() * 1e-9;
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_derived_values() {
        let record = BenchmarkRecord::new("[ArrayDeque - offer]", 1000, 5_000_000);
        let derived = DerivedRecord::try_from(&record).unwrap();

        assert_close(derived.throughput, 200_000.0);
        assert_close(derived.latency, 5_000.0);
        assert_eq!(derived.name, record.name);
    }

    #[test]
    fn test_derived_matches_formula() {
        for (ops, duration) in [(1, 1), (100, 50), (100, 200), (10_000_000, 123_456_789)] {
            let derived = DerivedRecord::try_from(&BenchmarkRecord::new("x", ops, duration)).unwrap();
            assert_close(derived.throughput, ops as f64 / (duration as f64 / 1e9));
            assert_close(derived.latency, duration as f64 / ops as f64);
        }
    }

    #[test]
    fn test_zero_duration_is_degenerate() {
        let err = DerivedRecord::try_from(&BenchmarkRecord::new("x", 10, 0)).unwrap_err();
        assert!(matches!(err, ReportError::DegenerateRecord { duration: 0, .. }));
    }

    #[test]
    fn test_derive_skips_degenerate_records() {
        let records = vec![
            BenchmarkRecord::new("a", 10, 100),
            BenchmarkRecord::new("b", 0, 100),
            BenchmarkRecord::new("c", 10, 0),
            BenchmarkRecord::new("d", 20, 100),
        ];
        let derivation = derive(&records);

        let names: Vec<_> = derivation.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "d"]);
        assert_eq!(derivation.rows, vec![1, 4]);
        assert_eq!(derivation.skipped.len(), 2);
        assert!(derivation.records.iter().all(|r| r.throughput.is_finite()));
    }

    #[test]
    fn test_derive_does_not_mutate_input() {
        let records = vec![BenchmarkRecord::new("a", 10, 100)];
        let before = records.clone();
        let first = derive(&records);
        let second = derive(&records);

        assert_eq!(records, before);
        assert_eq!(first, second);
    }
}
