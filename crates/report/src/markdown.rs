// Copyright 2025 Benchplot Contributors
// SPDX-License-Identifier: Apache-2.0

//! Markdown output generation for run reports.

use crate::pipeline::RunReport;
use std::fmt::Write;

/// Generate a markdown summary of a pipeline run.
pub fn generate_summary(report: &RunReport) -> String {
    let mut output = String::new();

    writeln!(output, "# Benchmark Report").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Generated: {}", report.generated_at.to_rfc3339()).unwrap();
    writeln!(output).unwrap();

    if !report.datasets.is_empty() {
        writeln!(output, "## Datasets").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "| Dataset | Input | Records | Skipped | Unclassified | Mean throughput (op/s) |").unwrap();
        writeln!(output, "|---------|-------|---------|---------|--------------|------------------------|").unwrap();

        for dataset in &report.datasets {
            let mean = dataset
                .mean_throughput
                .map(|m| format!("{:.0}", m))
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                output,
                "| {} | {} | {} | {} | {} | {} |",
                dataset.dataset,
                dataset.input.display(),
                dataset.records,
                dataset.skipped,
                dataset.unclassified,
                mean
            )
            .unwrap();
        }
        writeln!(output).unwrap();
    }

    let charts: Vec<_> = report.datasets.iter().flat_map(|d| d.charts.iter()).collect();
    if !charts.is_empty() {
        writeln!(output, "## Charts").unwrap();
        writeln!(output).unwrap();
        for chart in &charts {
            match &chart.error {
                None => writeln!(output, "- `{}`: {}", chart.path.display(), chart.title).unwrap(),
                Some(error) => writeln!(
                    output,
                    "- `{}`: {} (**failed**: {})",
                    chart.path.display(),
                    chart.title,
                    error
                )
                .unwrap(),
            }
        }
        writeln!(output).unwrap();
    }

    if let Some(edges) = &report.edges {
        writeln!(output, "## Edge list").unwrap();
        writeln!(output).unwrap();
        writeln!(
            output,
            "{} edges from `{}` written to `{}`",
            edges.edges,
            edges.input.display(),
            edges.output.display()
        )
        .unwrap();
        writeln!(output).unwrap();
    }

    let failed = charts.iter().filter(|c| c.error.is_some()).count();
    writeln!(output, "---").unwrap();
    writeln!(output, "Total charts: {} ({} failed)", charts.len(), failed).unwrap();

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{DatasetReport, EdgeReport};
    use crate::render::ChartOutcome;
    use chrono::Utc;
    use std::path::PathBuf;

    fn sample_report() -> RunReport {
        RunReport {
            generated_at: Utc::now(),
            datasets: vec![DatasetReport {
                dataset: "runs".to_string(),
                input: PathBuf::from("benchmark.csv"),
                records: 10,
                skipped: 1,
                unclassified: 0,
                mean_throughput: Some(200_000.0),
                derived_table: PathBuf::from("images/runs_derived.csv"),
                charts: vec![
                    ChartOutcome {
                        title: "Time taken across 10 runs".to_string(),
                        path: PathBuf::from("images/benchmark_time_taken.png"),
                        error: None,
                    },
                    ChartOutcome {
                        title: "Throughput across 10 runs".to_string(),
                        path: PathBuf::from("images/benchmark_throughput.png"),
                        error: Some("font unavailable".to_string()),
                    },
                ],
            }],
            edges: Some(EdgeReport {
                input: PathBuf::from("out.links"),
                edges: 92,
                output: PathBuf::from("images/edges.csv"),
            }),
        }
    }

    #[test]
    fn test_summary_contents() {
        let summary = generate_summary(&sample_report());

        assert!(summary.starts_with("# Benchmark Report"));
        assert!(summary.contains("| runs | benchmark.csv | 10 | 1 | 0 | 200000 |"));
        assert!(summary.contains("- `images/benchmark_time_taken.png`: Time taken across 10 runs\n"));
        assert!(summary.contains("(**failed**: font unavailable)"));
        assert!(summary.contains("92 edges from `out.links`"));
        assert!(summary.ends_with("Total charts: 2 (1 failed)\n"));
    }

    #[test]
    fn test_summary_empty_report() {
        let report = RunReport {
            generated_at: Utc::now(),
            datasets: Vec::new(),
            edges: None,
        };
        let summary = generate_summary(&report);

        assert!(!summary.contains("## Datasets"));
        assert!(summary.contains("Total charts: 0 (0 failed)"));
    }
}
