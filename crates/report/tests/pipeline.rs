// Copyright 2025 Benchplot Contributors
// SPDX-License-Identifier: Apache-2.0

//! End-to-end pipeline tests with a recording chart backend.

use benchplot_report::render::{BarSpec, Chart, ChartBackend, ChartKind};
use benchplot_report::{Pipeline, ReportConfig, ReportError, Result};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

type Rendered = Rc<RefCell<Vec<(PathBuf, Chart)>>>;

/// Records every chart instead of drawing it.
#[derive(Default, Clone)]
struct RecordingBackend {
    rendered: Rendered,
}

impl ChartBackend for RecordingBackend {
    fn render(&mut self, chart: &Chart, path: &Path) -> Result<()> {
        self.rendered.borrow_mut().push((path.to_path_buf(), chart.clone()));
        Ok(())
    }
}

fn setup() -> (TempDir, ReportConfig) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ReportConfig::default();
    config.output_dir = dir.path().join("images");
    config.queue.input = dir.path().join("queue.csv");
    config.runs.input = dir.path().join("runs.csv");
    config.edges.input = dir.path().join("edges.txt");
    (dir, config)
}

fn pipeline(config: ReportConfig) -> (Pipeline<RecordingBackend>, Rendered) {
    let backend = RecordingBackend::default();
    let rendered = backend.rendered.clone();
    (Pipeline::with_backend(config, backend).unwrap(), rendered)
}

fn file_names(rendered: &Rendered) -> Vec<String> {
    rendered
        .borrow()
        .iter()
        .map(|(path, _)| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

fn bars(chart: &Chart) -> &[BarSpec] {
    match &chart.kind {
        ChartKind::Bar(bars) => bars,
        ChartKind::Line(_) => panic!("expected bar chart"),
    }
}

#[test]
fn test_runs_dataset_mean_throughput() {
    let (_dir, config) = setup();
    let mut csv = String::from("readDuration,parseDuration,opDuration,count\n");
    for _ in 0..10 {
        csv.push_str("100,200,5000000,1000\n");
    }
    fs::write(&config.runs.input, csv).unwrap();

    let input = config.runs.input.clone();
    let (mut pipeline, rendered) = pipeline(config);
    let report = pipeline.run_runs(&input).unwrap();

    assert_eq!(report.records, 10);
    assert_eq!(report.skipped, 0);
    assert!((report.mean_throughput.unwrap() - 200_000.0).abs() < 1e-6);
    assert_eq!(
        file_names(&rendered),
        vec![
            "benchmark_time_taken.png",
            "benchmark_latency.png",
            "benchmark_throughput.png"
        ]
    );

    let charts = rendered.borrow();
    let throughput = &charts[2].1;
    assert_eq!(throughput.title, "Throughput across 10 runs");
    assert_eq!(bars(throughput).len(), 10);
    assert!(bars(throughput)
        .iter()
        .all(|b| b.annotation.as_deref() == Some("200000")));
    assert_eq!(bars(&charts[0].1)[0].annotation.as_deref(), Some("5.00ms"));
}

#[test]
fn test_queue_dataset_comparison_chart() {
    let (_dir, config) = setup();
    fs::write(
        &config.queue.input,
        "name,ops,duration\n[A - poll],100,50\n[B - poll],100,200\n",
    )
    .unwrap();

    let input = config.queue.input.clone();
    let (mut pipeline, rendered) = pipeline(config);
    let report = pipeline.run_queue(&input).unwrap();

    assert_eq!(report.records, 2);
    assert_eq!(report.unclassified, 0);
    assert_eq!(file_names(&rendered), vec!["benchmark_poll.png", "benchmark_poll_100.png"]);

    let charts = rendered.borrow();
    let comparison = &charts[1].1;
    assert_eq!(comparison.title, "poll - 100 operations");
    let labels: Vec<_> = bars(comparison).iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["A", "B"]);
    assert_ne!(bars(comparison)[0].color, bars(comparison)[1].color);
}

#[test]
fn test_queue_dataset_full_matrix() {
    let (_dir, config) = setup();
    let mut csv = String::from("name,ops,duration\n");
    for family in ["mq.Queue", "LinkedList"] {
        for action in ["offer", "poll"] {
            for ops in [100, 1000, 10000] {
                csv.push_str(&format!("[{} - {}],{},{}\n", family, action, ops, ops * 7));
            }
        }
    }
    csv.push_str("[LinkedList - peek],100,700\n");
    fs::write(&config.queue.input, csv).unwrap();

    let input = config.queue.input.clone();
    let (mut pipeline, rendered) = pipeline(config);
    let report = pipeline.run_queue(&input).unwrap();

    assert_eq!(report.records, 13);
    assert_eq!(report.unclassified, 1);
    assert_eq!(
        file_names(&rendered),
        vec![
            "benchmark_poll.png",
            "benchmark_offer.png",
            "benchmark_poll_100.png",
            "benchmark_poll_1000.png",
            "benchmark_poll_10000.png",
            "benchmark_offer_100.png",
            "benchmark_offer_1000.png",
            "benchmark_offer_10000.png",
        ]
    );

    let charts = rendered.borrow();
    match &charts[0].1.kind {
        ChartKind::Line(lines) => {
            let labels: Vec<_> = lines.iter().map(|l| l.label.as_str()).collect();
            assert_eq!(labels, vec!["mq.Queue", "LinkedList"]);
            assert_eq!(lines[0].points.len(), 3);
        }
        ChartKind::Bar(_) => panic!("expected line chart"),
    }
}

#[test]
fn test_derived_tables_are_idempotent() {
    let (_dir, config) = setup();
    fs::write(
        &config.queue.input,
        "name,ops,duration\n[A - offer],100,333\n[A - poll],100,0\n[B - offer],1000,7777\n",
    )
    .unwrap();

    let input = config.queue.input.clone();
    let (mut first, _) = pipeline(config.clone());
    let report = first.run_queue(&input).unwrap();
    let before = fs::read(&report.derived_table).unwrap();

    let (mut second, _) = pipeline(config);
    let again = second.run_queue(&input).unwrap();
    let after = fs::read(&again.derived_table).unwrap();

    assert_eq!(report.skipped, 1);
    assert_eq!(before, after);
}

#[test]
fn test_run_all_aborts_on_missing_input() {
    let (_dir, config) = setup();
    fs::write(&config.queue.input, "name,ops,duration\n[A - poll],100,50\n").unwrap();
    let runs_input = config.runs.input.clone();
    let output_dir = config.output_dir.clone();
    let (mut pipeline, _) = pipeline(config);

    let err = pipeline.run_all().unwrap_err();

    match err {
        ReportError::DataFormat { path, reason } => {
            assert_eq!(path, runs_input);
            assert_eq!(reason, "input file not found");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!output_dir.join("summary.md").exists());
}

#[test]
fn test_run_all_skips_disabled_datasets() {
    let (_dir, mut config) = setup();
    config.queue.enabled = false;
    config.runs.enabled = false;
    config.edges.enabled = false;
    let output_dir = config.output_dir.clone();
    let (mut pipeline, rendered) = pipeline(config);

    let report = pipeline.run_all().unwrap();

    assert!(report.datasets.is_empty());
    assert!(report.edges.is_none());
    assert!(rendered.borrow().is_empty());
    assert!(output_dir.join("summary.md").is_file());
    assert!(output_dir.join("report.json").is_file());
}

#[test]
fn test_runs_keep_input_numbering_after_skip() {
    let (_dir, config) = setup();
    fs::write(
        &config.runs.input,
        "readDuration,parseDuration,opDuration,count\n1,1,1000000,1000\n1,1,0,1000\n1,1,3000000,1000\n",
    )
    .unwrap();

    let input = config.runs.input.clone();
    let (mut pipeline, rendered) = pipeline(config);
    let report = pipeline.run_runs(&input).unwrap();

    assert_eq!(report.skipped, 1);
    let charts = rendered.borrow();
    let time_taken = &charts[0].1;
    assert_eq!(time_taken.title, "Time taken across 3 runs");
    let labels: Vec<_> = bars(time_taken).iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["1", "3"]);
    assert_eq!(bars(time_taken)[1].annotation.as_deref(), Some("3.00ms"));
}

#[test]
fn test_run_all_aborts_on_malformed_input() {
    let (_dir, config) = setup();
    fs::write(&config.queue.input, "name,ops\n[A - poll],100\n").unwrap();
    let (mut pipeline, rendered) = pipeline(config);

    let err = pipeline.run_all().unwrap_err();

    assert!(matches!(err, ReportError::DataFormat { .. }));
    assert!(rendered.borrow().is_empty());
}

#[test]
fn test_run_all_every_dataset() {
    let (_dir, mut config) = setup();
    config.edges.limit = 2;
    fs::write(&config.queue.input, "name,ops,duration\n[A - offer],100,50\n").unwrap();
    fs::write(
        &config.runs.input,
        "readDuration,parseDuration,opDuration,count\n1,1,1000000,10\n",
    )
    .unwrap();
    fs::write(&config.edges.input, "% a\n% b\n1 2 1 5\n2 3 1 6\n3 4 1 7\n").unwrap();

    let output_dir = config.output_dir.clone();
    let (mut pipeline, _) = pipeline(config);
    let report = pipeline.run_all().unwrap();

    assert_eq!(report.datasets.len(), 2);
    assert_eq!(report.datasets[0].dataset, "queue");
    assert_eq!(report.datasets[1].dataset, "runs");
    assert_eq!(report.failed_charts(), 0);

    let edges = report.edges.unwrap();
    assert_eq!(edges.edges, 2);
    assert_eq!(
        fs::read_to_string(output_dir.join("edges.csv")).unwrap(),
        "from,to\n1,2\n2,3\n"
    );

    let summary = fs::read_to_string(output_dir.join("summary.md")).unwrap();
    assert!(summary.contains("benchmark_offer_100.png"));
    assert!(summary.contains("benchmark_throughput.png"));
}
