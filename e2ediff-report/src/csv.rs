//! CSV Output
//!
//! One row per (software, metric) comparison, header first, CRLF terminated.

use crate::ReportError;
use e2ediff_stats::{ComparisonRow, MetricMean, PercentChange};
use std::io;

/// Output column order
pub const COLUMNS: [&str; 7] = [
    "os", "browser", "client", "metric", "old_avg", "new_avg", "%change",
];

/// Write comparison rows as CSV, header included.
pub fn write_comparison_csv<W: io::Write>(writer: W, rows: &[ComparisonRow]) -> Result<(), ReportError> {
    let mut wtr = ::csv::WriterBuilder::new()
        .terminator(::csv::Terminator::CRLF)
        .from_writer(writer);

    wtr.write_record(COLUMNS)?;
    for row in rows {
        let old_avg = row.old_avg.to_string();
        let new_avg = row.new_avg.to_string();
        let percent_change = row.percent_change.to_string();
        wtr.write_record([
            row.os.as_str(),
            row.browser.as_str(),
            row.client.as_str(),
            row.metric.as_str(),
            old_avg.as_str(),
            new_avg.as_str(),
            percent_change.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Generate the CSV report as a string
pub fn generate_csv_report(rows: &[ComparisonRow]) -> Result<String, ReportError> {
    let mut buf = Vec::new();
    write_comparison_csv(&mut buf, rows)?;
    String::from_utf8(buf)
        .map_err(|e| ReportError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Read comparison rows back from CSV written by [`write_comparison_csv`].
pub fn read_comparison_csv<R: io::Read>(reader: R) -> Result<Vec<ComparisonRow>, ReportError> {
    let mut rdr = ::csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if record.len() != COLUMNS.len() {
            return Err(ReportError::ColumnCount {
                expected: COLUMNS.len(),
                found: record.len(),
            });
        }

        rows.push(ComparisonRow {
            os: record[0].to_string(),
            browser: record[1].to_string(),
            client: record[2].to_string(),
            metric: record[3].to_string(),
            old_avg: parse_mean(&record[4], "old_avg")?,
            new_avg: parse_mean(&record[5], "new_avg")?,
            percent_change: record[6].parse::<PercentChange>().map_err(|_| {
                ReportError::InvalidValue {
                    column: "%change",
                    value: record[6].to_string(),
                }
            })?,
        });
    }
    Ok(rows)
}

fn parse_mean(raw: &str, column: &'static str) -> Result<MetricMean, ReportError> {
    raw.parse().map_err(|_| ReportError::InvalidValue {
        column,
        value: raw.to_string(),
    })
}
