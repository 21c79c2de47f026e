//! Output Formatting
//!
//! Human-readable console output: which software each input set covered,
//! followed by the comparison table.

use e2ediff_report::software_summaries;
use e2ediff_stats::{AggregateResult, ComparisonRow};

/// List the software and versions seen in one result set under `label`
pub fn format_software_summary(label: &str, result: &AggregateResult) -> String {
    let mut output = String::new();

    output.push_str(label);
    output.push('\n');
    for summary in software_summaries(result) {
        output.push_str(&format!(
            "    {}: {}, {}: {}, client: {}\n",
            summary.os, summary.os_version, summary.browser, summary.browser_version, summary.client
        ));
    }
    output.push('\n');

    output
}

/// Format comparison rows as an aligned table
pub fn format_comparison_table(rows: &[ComparisonRow]) -> String {
    let mut output = String::new();

    output.push_str("# E2E comparison results\n");
    for row in rows {
        output.push_str(&format!(
            "{:10},{:10},{:10},{:15},{:>7},{:>7},{:>7}\n",
            row.os,
            row.browser,
            row.client,
            row.metric,
            row.old_avg.to_string(),
            row.new_avg.to_string(),
            row.percent_change.to_string()
        ));
    }

    output
}
