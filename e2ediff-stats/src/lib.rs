#![warn(missing_docs)]
//! e2ediff Statistics
//!
//! Turns parsed E2E result rows into comparable numbers:
//! - Per-software metric series built incrementally from rows
//! - Arithmetic mean over valid (non-empty) samples, rounded to 2 decimals
//! - Old/new join with percent change and in-band sentinels for missing data

mod aggregate;
mod comparison;

pub use aggregate::{
    AggregateError, AggregateResult, DEFAULT_IGNORED_FIELDS, MetricAggregator, MetricMean,
    SoftwareAggregate,
};
pub use comparison::{ComparisonRow, PercentChange, compare, percent_change};

/// Decimal places kept for means and percent changes
pub const ROUND_DECIMALS: i32 = 2;

/// Sentinel written where an average is unavailable
pub const NO_DATA_SENTINEL: &str = "none";

/// Sentinel written where a percent change cannot be computed
pub const ERROR_SENTINEL: &str = "error";

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Format a number in shortest round-trip form, always with a fractional part
/// (`43.0`, `27.7`, `-0.0`).
pub fn format_number(value: f64) -> String {
    format!("{:?}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(27.700000000000003, ROUND_DECIMALS), 27.7);
        assert_eq!(round_to(94.05, ROUND_DECIMALS), 94.05);
        assert_eq!(round_to(1.005, 0), 1.0);
        assert!(round_to(-0.0036, ROUND_DECIMALS).is_sign_negative());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(43.0), "43.0");
        assert_eq!(format_number(27.7), "27.7");
        assert_eq!(format_number(-0.0), "-0.0");
        assert_eq!(format_number(-300.0), "-300.0");
    }
}
