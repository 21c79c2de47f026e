#![warn(missing_docs)]
//! e2ediff Report - Output Formats
//!
//! Writes comparison results in one of:
//! - CSV (the default; fixed column order, `none`/`error` sentinels)
//! - JSON (machine-readable, with run metadata and software summaries)

mod csv;
mod json;
mod report;

pub use crate::csv::{COLUMNS, generate_csv_report, read_comparison_csv, write_comparison_csv};
pub use json::generate_json_report;
pub use report::{ComparisonEntry, Report, ReportMeta, SoftwareSummary, software_summaries};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Comparison table as CSV
    Csv,
    /// Full report as JSON
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Errors from writing or reading reports
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// CSV encoding or decoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
    /// Writing the output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A comparison CSV record has the wrong width
    #[error("Comparison CSV has {found} columns, expected {expected}")]
    ColumnCount {
        /// Columns in the fixed layout
        expected: usize,
        /// Columns in the record
        found: usize,
    },
    /// A value column holds neither a number nor its sentinel
    #[error("Invalid value '{value}' in column {column}")]
    InvalidValue {
        /// Column name
        column: &'static str,
        /// Raw field content
        value: String,
    },
}
