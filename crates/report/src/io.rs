// Copyright 2025 Benchplot Contributors
// SPDX-License-Identifier: Apache-2.0

//! I/O operations for report outputs.
//!
//! This module writes derived tables, the machine-readable run report and
//! the Markdown summary into the output directory.

use crate::error::Result;
use crate::markdown;
use crate::pipeline::RunReport;
use crate::record::DerivedRecord;
use std::fs;
use std::path::Path;

/// Markdown summary file name.
pub const SUMMARY_FILE: &str = "summary.md";

/// JSON run report file name.
pub const REPORT_FILE: &str = "report.json";

/// Ensure the output directory exists.
pub fn ensure_output_dir(dir: impl AsRef<Path>) -> Result<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Derived table file name for a dataset.
pub fn derived_file_name(dataset: &str) -> String {
    format!("{}_derived.csv", dataset)
}

/// Write derived records as CSV in input order.
pub fn write_derived_csv(records: &[DerivedRecord], path: impl AsRef<Path>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the run report as pretty-printed JSON.
pub fn write_report_json(report: &RunReport, path: impl AsRef<Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}

/// Write the Markdown summary and JSON report into `dir`.
pub fn write_summary(report: &RunReport, dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    ensure_output_dir(dir)?;
    fs::write(dir.join(SUMMARY_FILE), markdown::generate_summary(report))?;
    write_report_json(report, dir.join(REPORT_FILE))?;
    Ok(())
}
