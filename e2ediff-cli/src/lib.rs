#![warn(missing_docs)]
//! e2ediff CLI Library
//!
//! Command-line driver for comparing two sets of E2E results. The binary in the
//! `e2ediff` crate calls [`run`]; tests drive [`run_with_cli`] directly.
//!
//! ```text
//! old.csv ──► aggregate ─┐
//!                        ├─► compare ──► console report + output file
//! new.csv ──► aggregate ─┘
//! ```

mod config;
mod formatting;
mod input;

pub use config::*;
pub use formatting::{format_comparison_table, format_software_summary};
pub use input::{FILENAME_COLUMN, aggregate_csv, aggregate_csv_file};

use anyhow::Context;
use clap::Parser;
use e2ediff_report::{
    OutputFormat, Report, ReportMeta, generate_csv_report, generate_json_report,
};
use e2ediff_stats::compare;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// e2ediff CLI arguments
#[derive(Parser, Debug)]
#[command(name = "e2ediff")]
#[command(author, version, about = "Compares metrics from two different sets of E2E results")]
pub struct Cli {
    /// Filesystem path to old results CSV file
    #[arg(long = "old-csv", visible_alias = "old_csv", value_name = "PATH")]
    pub old_csv: PathBuf,

    /// Filesystem path to new results CSV file
    #[arg(long = "new-csv", visible_alias = "new_csv", value_name = "PATH")]
    pub new_csv: PathBuf,

    /// Filesystem path where output will be written
    /// Defaults to config or e2e_comparison_results.csv
    #[arg(long = "output-file", visible_alias = "output_file", value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Output format: csv, json
    #[arg(long)]
    pub format: Option<String>,

    /// Handling of rows with a malformed filename
    #[arg(long, value_enum)]
    pub on_malformed: Option<MalformedPolicy>,

    /// Configuration file (default: discover e2ediff.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not print the console report
    #[arg(short, long)]
    pub quiet: bool,
}

/// Run the e2ediff CLI with the process arguments.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the e2ediff CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    // Explicit --config or a discovered e2ediff.toml must load (CLI flags override)
    let config = match &cli.config {
        Some(path) => E2eConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => E2eConfig::discover()?.unwrap_or_default(),
    };

    let format: OutputFormat = cli
        .format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse()
        .map_err(anyhow::Error::msg)?;
    let policy = cli.on_malformed.unwrap_or(config.input.on_malformed);
    let output_path = cli
        .output_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.path));

    let old = aggregate_csv_file(&cli.old_csv, &config.input, policy)?;
    let new = aggregate_csv_file(&cli.new_csv, &config.input, policy)?;

    let rows = compare(&old, &new);

    if config.output.console_report && !cli.quiet {
        let mut stdout = std::io::stdout().lock();
        write!(
            stdout,
            "{}{}{}",
            format_software_summary("# Software used in old CSV (--old-csv)", &old),
            format_software_summary("# Software used in new CSV (--new-csv)", &new),
            format_comparison_table(&rows)
        )?;
    }

    let output = match format {
        OutputFormat::Csv => generate_csv_report(&rows)?,
        OutputFormat::Json => {
            let meta = ReportMeta::new(
                cli.old_csv.display().to_string(),
                cli.new_csv.display().to_string(),
            );
            generate_json_report(&Report::new(meta, &old, &new, &rows))?
        }
    };

    let mut file = std::fs::File::create(&output_path)
        .with_context(|| format!("failed to create {}", output_path.display()))?;
    file.write_all(output.as_bytes())
        .with_context(|| format!("failed to write {}", output_path.display()))?;
    info!(path = %output_path.display(), rows = rows.len(), "comparison written");

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "e2ediff=debug" } else { "e2ediff=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Logs go to stderr; stdout carries the console report.
    // try_init: a subscriber may already be set when run repeatedly in-process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
