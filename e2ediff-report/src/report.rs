//! Report Data Structures

use chrono::{DateTime, Utc};
use e2ediff_stats::{
    AggregateResult, ComparisonRow, ERROR_SENTINEL, MetricMean, NO_DATA_SENTINEL, PercentChange,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Complete comparison report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Run metadata
    pub meta: ReportMeta,
    /// Software detected in the old input set
    pub old_software: Vec<SoftwareSummary>,
    /// Software detected in the new input set
    pub new_software: Vec<SoftwareSummary>,
    /// One entry per (software, metric) pair of the new set
    pub comparisons: Vec<ComparisonEntry>,
}

impl Report {
    /// Assemble a report from both aggregate sets and their comparison
    pub fn new(
        meta: ReportMeta,
        old: &AggregateResult,
        new: &AggregateResult,
        rows: &[ComparisonRow],
    ) -> Self {
        Self {
            meta,
            old_software: software_summaries(old),
            new_software: software_summaries(new),
            comparisons: rows.iter().map(ComparisonEntry::from).collect(),
        }
    }
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Tool version that produced the report
    pub version: String,
    /// When the report was generated
    pub timestamp: DateTime<Utc>,
    /// Path of the old input CSV
    pub old_csv: String,
    /// Path of the new input CSV
    pub new_csv: String,
}

impl ReportMeta {
    /// Metadata stamped with the current time
    pub fn new(old_csv: impl Into<String>, new_csv: impl Into<String>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            old_csv: old_csv.into(),
            new_csv: new_csv.into(),
        }
    }
}

/// Software and versions seen in one input set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftwareSummary {
    /// Operating system name
    pub os: String,
    /// Operating system version
    pub os_version: String,
    /// Browser name
    pub browser: String,
    /// Browser version
    pub browser_version: String,
    /// Client name
    pub client: String,
}

/// Summaries for every software key, in sorted order
pub fn software_summaries(result: &AggregateResult) -> Vec<SoftwareSummary> {
    result
        .iter()
        .map(|(key, aggregate)| SoftwareSummary {
            os: key.os.clone(),
            os_version: aggregate.os_version.clone(),
            browser: key.browser.clone(),
            browser_version: aggregate.browser_version.clone(),
            client: key.client.clone(),
        })
        .collect()
}

/// JSON form of a comparison row; unavailable values stay as sentinel strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    /// Operating system name
    pub os: String,
    /// Browser name
    pub browser: String,
    /// Client name
    pub client: String,
    /// Metric column name
    pub metric: String,
    /// Old mean, or `"none"`
    pub old_avg: Value,
    /// New mean, or `"none"`
    pub new_avg: Value,
    /// Percent change, or `"error"`
    #[serde(rename = "%change")]
    pub percent_change: Value,
}

impl From<&ComparisonRow> for ComparisonEntry {
    fn from(row: &ComparisonRow) -> Self {
        Self {
            os: row.os.clone(),
            browser: row.browser.clone(),
            client: row.client.clone(),
            metric: row.metric.clone(),
            old_avg: mean_value(row.old_avg),
            new_avg: mean_value(row.new_avg),
            percent_change: match row.percent_change {
                PercentChange::Percent(v) => Value::from(v),
                PercentChange::Error => Value::from(ERROR_SENTINEL),
            },
        }
    }
}

fn mean_value(mean: MetricMean) -> Value {
    match mean {
        MetricMean::Mean(v) => Value::from(v),
        MetricMean::NoData => Value::from(NO_DATA_SENTINEL),
    }
}
