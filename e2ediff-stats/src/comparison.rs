//! Old/New Comparison
//!
//! Joins two aggregate sets on (software, metric). The new set drives the join:
//! pairs that only exist in the old set are never reported.

use crate::aggregate::{AggregateResult, MetricMean};
use crate::{ERROR_SENTINEL, ROUND_DECIMALS, format_number, round_to};
use e2ediff_core::SoftwareKey;
use std::fmt;
use tracing::debug;

/// Relative change of a metric between the old and new set
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PercentChange {
    /// `round((new - old) / new, 2) * 100`
    Percent(f64),
    /// Change is undefined (missing old value or a zero operand)
    Error,
}

impl fmt::Display for PercentChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PercentChange::Percent(v) => f.write_str(&format_number(*v)),
            PercentChange::Error => f.write_str(ERROR_SENTINEL),
        }
    }
}

impl std::str::FromStr for PercentChange {
    type Err = std::num::ParseFloatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == ERROR_SENTINEL {
            Ok(PercentChange::Error)
        } else {
            s.parse().map(PercentChange::Percent)
        }
    }
}

/// One (software, metric) line of the comparison
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    /// Operating system name
    pub os: String,
    /// Browser name
    pub browser: String,
    /// Client name
    pub client: String,
    /// Metric column name
    pub metric: String,
    /// Mean in the old set, `NoData` when the pair is absent there
    pub old_avg: MetricMean,
    /// Mean in the new set
    pub new_avg: MetricMean,
    /// Change relative to the new mean, written as `%change`
    pub percent_change: PercentChange,
}

impl ComparisonRow {
    /// Software key this row belongs to
    pub fn software(&self) -> SoftwareKey {
        SoftwareKey::new(&self.os, &self.browser, &self.client)
    }
}

/// Compute the percent change between two means.
///
/// The denominator is the *new* mean. Any missing value or zero operand yields
/// [`PercentChange::Error`].
pub fn percent_change(old: MetricMean, new: MetricMean) -> PercentChange {
    match (old, new) {
        (MetricMean::Mean(old), MetricMean::Mean(new)) if old != 0.0 && new != 0.0 => {
            PercentChange::Percent(round_to((new - old) / new, ROUND_DECIMALS) * 100.0)
        }
        _ => PercentChange::Error,
    }
}

/// Compare every (software, metric) pair of `new` against `old`.
///
/// Software keys are visited in sorted order; metrics keep the order in which
/// they were first seen during aggregation.
pub fn compare(old: &AggregateResult, new: &AggregateResult) -> Vec<ComparisonRow> {
    let mut rows = Vec::new();

    for (software, aggregate) in new.iter() {
        if !old.contains(software) {
            debug!(software = %software, "software has no old results");
        }
        for (metric, new_avg) in &aggregate.metrics {
            let old_avg = old.mean(software, metric).unwrap_or(MetricMean::NoData);
            rows.push(ComparisonRow {
                os: software.os.clone(),
                browser: software.browser.clone(),
                client: software.client.clone(),
                metric: metric.clone(),
                old_avg,
                new_avg: *new_avg,
                percent_change: percent_change(old_avg, *new_avg),
            });
        }
    }

    for (software, _) in old.iter().filter(|(software, _)| !new.contains(software)) {
        debug!(software = %software, "software only present in old results; not reported");
    }

    rows
}
