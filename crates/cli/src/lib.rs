//! CLI for benchplot.
//!
//! This crate provides the command-line entry point of the reporting
//! pipeline: it parses arguments, loads configuration, installs logging,
//! and runs the requested stages in sequence.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use anyhow::{Context, Result};
use benchplot_report::{io, DatasetReport, Pipeline, ReportConfig, RunReport};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Benchmark report generator.
#[derive(Parser, Debug)]
#[command(name = "benchplot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./benchplot.toml if present).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output directory override.
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per line.
    Json,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report on every enabled dataset.
    ///
    /// Writes charts, derived tables, summary.md and report.json to the
    /// output directory.
    Run,

    /// Chart the multi-series queue benchmark (name,ops,duration).
    Queue {
        /// Input CSV override.
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Chart the repeated-trial benchmark (readDuration,parseDuration,opDuration,count).
    Runs {
        /// Input CSV override.
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Truncate the social-graph edge list for the layout tool.
    Edges {
        /// Input edge list override.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Maximum number of edges to keep.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show effective configuration and output locations.
    Status,
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `info`, or `debug` when verbose.
pub fn init_logging(verbose: bool, format: LogFormat) {
    let default = if verbose {
        "benchplot_report=debug,benchplot_cli=debug"
    } else {
        "benchplot_report=info,benchplot_cli=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
    }
}

/// Load configuration and apply command-line overrides.
pub fn resolve_config(cli: &Cli) -> Result<ReportConfig> {
    let mut config = ReportConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(output) = &cli.output {
        config.output_dir = output.clone();
    }

    match &cli.command {
        Commands::Queue { input: Some(input) } => config.queue.input = input.clone(),
        Commands::Runs { input: Some(input) } => config.runs.input = input.clone(),
        Commands::Edges { input, limit } => {
            if let Some(input) = input {
                config.edges.input = input.clone();
            }
            if let Some(limit) = limit {
                config.edges.limit = *limit;
            }
        }
        _ => {}
    }

    Ok(config)
}

fn print_dataset(dataset: &DatasetReport) {
    let failed = dataset.charts.iter().filter(|c| c.error.is_some()).count();
    println!(
        "{} {}: {} records, {} skipped, {} unclassified, {} charts",
        "✓".green(),
        dataset.dataset.bold(),
        dataset.records,
        dataset.skipped,
        dataset.unclassified,
        dataset.charts.len() - failed
    );
    if let Some(mean) = dataset.mean_throughput {
        println!("  Average throughput: {}", mean.round());
    }
    for chart in dataset.charts.iter().filter(|c| c.error.is_some()) {
        println!("  {} {}", "✗".red(), chart.path.display());
    }
}

fn print_report(report: &RunReport, output_dir: &std::path::Path) {
    for dataset in &report.datasets {
        print_dataset(dataset);
    }
    if let Some(edges) = &report.edges {
        println!(
            "{} edges: {} written to {}",
            "✓".green(),
            edges.edges,
            edges.output.display()
        );
    }
    println!("Results written to {}/", output_dir.display());
}

/// Run the CLI with the given arguments.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if the command fails.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format);
    let config = resolve_config(&cli)?;
    info!(command = ?cli.command, output = %config.output_dir.display(), "Starting benchplot");

    match cli.command {
        Commands::Run => {
            let mut pipeline = Pipeline::new(config)?;
            let report = pipeline.run_all().context("report run failed")?;
            print_report(&report, &pipeline.config().output_dir);
            Ok(())
        }
        Commands::Queue { .. } => {
            let input = config.queue.input.clone();
            let mut pipeline = Pipeline::new(config)?;
            let dataset = pipeline.run_queue(&input).context("queue report failed")?;
            let report = pipeline.finish(vec![dataset], None)?;
            print_report(&report, &pipeline.config().output_dir);
            Ok(())
        }
        Commands::Runs { .. } => {
            let input = config.runs.input.clone();
            let mut pipeline = Pipeline::new(config)?;
            let dataset = pipeline.run_runs(&input).context("runs report failed")?;
            let report = pipeline.finish(vec![dataset], None)?;
            print_report(&report, &pipeline.config().output_dir);
            Ok(())
        }
        Commands::Edges { .. } => {
            let edges = config.edges.clone();
            let mut pipeline = Pipeline::new(config)?;
            let edge_report = pipeline
                .run_edges(&edges.input, edges.skip_rows, edges.limit)
                .context("edge list hand-off failed")?;
            let report = pipeline.finish(Vec::new(), Some(edge_report))?;
            print_report(&report, &pipeline.config().output_dir);
            Ok(())
        }
        Commands::Status => {
            println!("benchplot {}", env!("CARGO_PKG_VERSION"));
            println!("\nInputs:");
            let state = |enabled: bool| if enabled { "" } else { " (disabled)" };
            println!("  - queue: {}{}", config.queue.input.display(), state(config.queue.enabled));
            println!("  - runs:  {}{}", config.runs.input.display(), state(config.runs.enabled));
            println!(
                "  - edges: {} (limit {}){}",
                config.edges.input.display(),
                config.edges.limit,
                state(config.edges.enabled)
            );
            println!("\nClassification rules:");
            for rule in &config.rules {
                println!("  - \"{}\" -> {}", rule.pattern, rule.category);
            }
            println!("\nOutput directory: {}/", config.output_dir.display());
            println!("  - {}", io::SUMMARY_FILE);
            println!("  - {}", io::REPORT_FILE);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "benchplot",
            "queue",
            "--input",
            "data.csv",
            "-o",
            "out",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.output, Some(PathBuf::from("out")));
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(matches!(cli.command, Commands::Queue { input: Some(ref p) } if p == &PathBuf::from("data.csv")));
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["benchplot"]).is_err());
    }

    #[test]
    fn test_resolve_config_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("benchplot.toml");
        fs::write(&path, "output_dir = \"charts\"\n[edges]\nlimit = 10\n").unwrap();
        let config_arg = path.to_string_lossy().into_owned();

        let cli = Cli::try_parse_from([
            "benchplot", "--config", &config_arg, "edges", "--limit", "5",
        ])
        .unwrap();
        let config = resolve_config(&cli).unwrap();

        assert_eq!(config.output_dir, PathBuf::from("charts"));
        assert_eq!(config.edges.limit, 5);
        assert_eq!(config.edges.skip_rows, 2);
    }

    #[test]
    fn test_resolve_config_output_flag_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("benchplot.toml");
        fs::write(&path, "output_dir = \"charts\"\n").unwrap();
        let config_arg = path.to_string_lossy().into_owned();

        let cli = Cli::try_parse_from(["benchplot", "-c", &config_arg, "-o", "elsewhere", "run"]).unwrap();
        let config = resolve_config(&cli).unwrap();

        assert_eq!(config.output_dir, PathBuf::from("elsewhere"));
    }
}
