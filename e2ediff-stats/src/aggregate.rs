//! Metric Aggregation
//!
//! Groups raw row values by software identity and reduces each metric series to
//! its mean. Aggregation is one-way: rows are ingested into a
//! [`MetricAggregator`], then [`MetricAggregator::finalize`] consumes it and
//! yields a read-only [`AggregateResult`].
//!
//! Empty values mark runs that produced no measurement (usually because the run
//! errored). They are excluded from both the sum and the sample count, so a mean
//! is taken over valid samples only.

use crate::{NO_DATA_SENTINEL, ROUND_DECIMALS, format_number, round_to};
use e2ediff_core::{FilenameMetadata, SoftwareKey};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Row fields that identify or annotate a run rather than measure it
pub const DEFAULT_IGNORED_FIELDS: &[&str] = &["filename", "error_list"];

/// Mean of one metric for one software key
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricMean {
    /// Mean of the valid samples, rounded to 2 decimals
    Mean(f64),
    /// Every sample was empty
    NoData,
}

impl MetricMean {
    /// Numeric value, if any
    pub fn value(self) -> Option<f64> {
        match self {
            MetricMean::Mean(v) => Some(v),
            MetricMean::NoData => None,
        }
    }
}

impl fmt::Display for MetricMean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricMean::Mean(v) => f.write_str(&format_number(*v)),
            MetricMean::NoData => f.write_str(NO_DATA_SENTINEL),
        }
    }
}

impl std::str::FromStr for MetricMean {
    type Err = std::num::ParseFloatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == NO_DATA_SENTINEL {
            Ok(MetricMean::NoData)
        } else {
            s.parse().map(MetricMean::Mean)
        }
    }
}

/// Averaged metrics for one software key
#[derive(Debug, Clone, PartialEq)]
pub struct SoftwareAggregate {
    /// OS version seen on the most recent row for this key
    pub os_version: String,
    /// Browser version seen on the most recent row for this key
    pub browser_version: String,
    /// Metric means in first-seen order
    pub metrics: Vec<(String, MetricMean)>,
}

impl SoftwareAggregate {
    /// Look up a metric's mean by name
    pub fn metric(&self, name: &str) -> Option<MetricMean> {
        self.metrics
            .iter()
            .find(|(metric, _)| metric == name)
            .map(|(_, mean)| *mean)
    }
}

/// Per-software averages for one input set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateResult {
    software: BTreeMap<SoftwareKey, SoftwareAggregate>,
}

impl AggregateResult {
    /// Aggregate for a software key, `None` if the key never appeared
    pub fn get(&self, key: &SoftwareKey) -> Option<&SoftwareAggregate> {
        self.software.get(key)
    }

    /// Mean for a software key and metric, `None` if either is absent
    pub fn mean(&self, key: &SoftwareKey, metric: &str) -> Option<MetricMean> {
        self.get(key).and_then(|aggregate| aggregate.metric(metric))
    }

    /// Iterate software keys in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&SoftwareKey, &SoftwareAggregate)> {
        self.software.iter()
    }

    /// Whether the key is present
    pub fn contains(&self, key: &SoftwareKey) -> bool {
        self.software.contains_key(key)
    }

    /// Number of software keys
    pub fn len(&self) -> usize {
        self.software.len()
    }

    /// Whether no rows were aggregated
    pub fn is_empty(&self) -> bool {
        self.software.is_empty()
    }
}

impl FromIterator<(SoftwareKey, SoftwareAggregate)> for AggregateResult {
    fn from_iter<I: IntoIterator<Item = (SoftwareKey, SoftwareAggregate)>>(iter: I) -> Self {
        Self {
            software: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct SoftwareSeries {
    os_version: String,
    browser_version: String,
    // metric -> (timestamp -> raw value), kept in first-seen order
    metrics: Vec<(String, BTreeMap<String, String>)>,
}

impl SoftwareSeries {
    fn metric_mut(&mut self, name: &str) -> &mut BTreeMap<String, String> {
        let idx = match self.metrics.iter().position(|(metric, _)| metric == name) {
            Some(idx) => idx,
            None => {
                self.metrics.push((name.to_string(), BTreeMap::new()));
                self.metrics.len() - 1
            }
        };
        &mut self.metrics[idx].1
    }
}

/// Accumulates raw metric values for a single input set
#[derive(Debug, Clone)]
pub struct MetricAggregator {
    ignored: Vec<String>,
    series: BTreeMap<SoftwareKey, SoftwareSeries>,
    rows: usize,
}

impl Default for MetricAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricAggregator {
    /// Aggregator that skips [`DEFAULT_IGNORED_FIELDS`]
    pub fn new() -> Self {
        Self::with_ignored_fields(DEFAULT_IGNORED_FIELDS.iter().copied())
    }

    /// Aggregator that skips the given fields instead of the defaults
    pub fn with_ignored_fields<S: Into<String>>(fields: impl IntoIterator<Item = S>) -> Self {
        Self {
            ignored: fields.into_iter().map(Into::into).collect(),
            series: BTreeMap::new(),
            rows: 0,
        }
    }

    /// Number of rows ingested so far
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Record one row's values under the software and timestamp from its filename.
    ///
    /// Every field not in the ignored set is treated as a metric. A repeated
    /// timestamp for the same software and metric replaces the earlier value.
    pub fn ingest<K, V>(&mut self, metadata: &FilenameMetadata, row: impl IntoIterator<Item = (K, V)>)
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let series = self.series.entry(metadata.software()).or_default();
        series.os_version.clone_from(&metadata.os_version);
        series.browser_version.clone_from(&metadata.browser_version);

        for (field, value) in row {
            let field = field.as_ref();
            if self.ignored.iter().any(|ignored| ignored == field) {
                continue;
            }
            series
                .metric_mut(field)
                .insert(metadata.timestamp.clone(), value.as_ref().to_string());
        }

        self.rows += 1;
    }

    /// Reduce every series to its rounded mean.
    ///
    /// Fails if a non-empty value is not a number.
    pub fn finalize(self) -> Result<AggregateResult, AggregateError> {
        let mut software = BTreeMap::new();

        for (key, series) in self.series {
            let mut metrics = Vec::with_capacity(series.metrics.len());
            for (metric, samples) in series.metrics {
                let mean = mean_of_samples(&key, &metric, &samples)?;
                metrics.push((metric, mean));
            }
            software.insert(
                key,
                SoftwareAggregate {
                    os_version: series.os_version,
                    browser_version: series.browser_version,
                    metrics,
                },
            );
        }

        debug!(rows = self.rows, software = software.len(), "aggregated result set");
        Ok(AggregateResult { software })
    }
}

fn mean_of_samples(
    key: &SoftwareKey,
    metric: &str,
    samples: &BTreeMap<String, String>,
) -> Result<MetricMean, AggregateError> {
    let mut sum = 0.0;
    let mut count = 0usize;

    for (timestamp, raw) in samples {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let value: f64 = raw.parse().map_err(|_| AggregateError::InvalidValue {
            software: key.to_string(),
            metric: metric.to_string(),
            timestamp: timestamp.clone(),
            value: raw.to_string(),
        })?;
        sum += value;
        count += 1;
    }

    if count == 0 {
        debug!(software = %key, metric, "no valid samples");
        return Ok(MetricMean::NoData);
    }
    Ok(MetricMean::Mean(round_to(sum / count as f64, ROUND_DECIMALS)))
}

/// Errors from aggregation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregateError {
    /// A non-empty metric value is not a number
    #[error("Invalid value '{value}' for metric {metric} of {software} at {timestamp}")]
    InvalidValue {
        /// Software key in `os-browser-client` form
        software: String,
        /// Metric column name
        metric: String,
        /// Timestamp of the offending run
        timestamp: String,
        /// Raw field content
        value: String,
    },
}
