#![warn(missing_docs)]
//! # e2ediff
//!
//! Compares averaged metrics between two sets of end-to-end network test
//! results.
//!
//! Each input is a CSV with one row per test run. The run's `filename` column
//! encodes the OS, browser and client under test; every other column (except
//! `error_list`) is a metric. e2ediff:
//! - **Parses** filenames into software identity and timestamp
//! - **Aggregates** each metric per (OS, browser, client) into a mean over valid samples
//! - **Compares** the new set against the old one, reporting a percent change per
//!   metric, with `none`/`error` sentinels where a value is missing or zero
//!
//! ## Library use
//!
//! ```ignore
//! use e2ediff::prelude::*;
//!
//! let old = aggregate_csv_file(old_path, &InputConfig::default(), MalformedPolicy::Abort)?;
//! let new = aggregate_csv_file(new_path, &InputConfig::default(), MalformedPolicy::Abort)?;
//! let csv = generate_csv_report(&compare(&old, &new))?;
//! ```

// Re-export core types
pub use e2ediff_core::{FILENAME_SEGMENTS, FilenameMetadata, FormatError, SoftwareKey, parse_filename};

// Re-export statistics
pub use e2ediff_stats::{
    AggregateError, AggregateResult, ComparisonRow, MetricAggregator, MetricMean, PercentChange,
    SoftwareAggregate, compare, percent_change,
};

// Re-export reporting
pub use e2ediff_report::{
    OutputFormat, Report, ReportError, ReportMeta, generate_csv_report, generate_json_report,
    read_comparison_csv, write_comparison_csv,
};

// Re-export CLI
pub use e2ediff_cli::{
    Cli, E2eConfig, InputConfig, MalformedPolicy, aggregate_csv, aggregate_csv_file, run,
    run_with_cli,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        AggregateResult, ComparisonRow, InputConfig, MalformedPolicy, MetricAggregator,
        MetricMean, PercentChange, aggregate_csv, aggregate_csv_file, compare,
        generate_csv_report, parse_filename,
    };
}
