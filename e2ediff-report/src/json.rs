//! JSON Output

use crate::report::Report;

/// Generate a prettified JSON report.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportMeta;
    use e2ediff_stats::AggregateResult;

    #[test]
    fn test_json_round_trip_of_empty_report() {
        let empty = AggregateResult::default();
        let report = Report::new(ReportMeta::new("a.csv", "b.csv"), &empty, &empty, &[]);

        let json = generate_json_report(&report).unwrap();
        let parsed: Report = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.meta.old_csv, "a.csv");
        assert_eq!(parsed.meta.new_csv, "b.csv");
        assert!(parsed.comparisons.is_empty());
        assert!(json.contains("\"old_software\": []"));
    }
}
