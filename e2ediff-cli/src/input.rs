//! Result CSV Loading
//!
//! Reads an E2E results CSV, resolves each row's filename into software
//! metadata and feeds the row to a [`MetricAggregator`].

use crate::config::{InputConfig, MalformedPolicy};
use anyhow::Context;
use e2ediff_core::parse_filename;
use e2ediff_stats::{AggregateResult, MetricAggregator};
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

/// Column holding the result filename
pub const FILENAME_COLUMN: &str = "filename";

/// Open `path` and aggregate its rows.
pub fn aggregate_csv_file(
    path: &Path,
    input: &InputConfig,
    policy: MalformedPolicy,
) -> anyhow::Result<AggregateResult> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let result = aggregate_csv(file, input, policy)
        .with_context(|| format!("failed to load results from {}", path.display()))?;
    info!(path = %path.display(), software = result.len(), "loaded result set");
    Ok(result)
}

/// Aggregate rows from any CSV reader.
///
/// The first record is treated as a header when one of its fields is
/// `filename`; otherwise `input.default_columns` names the fields and the first
/// record is data.
pub fn aggregate_csv<R: io::Read>(
    reader: R,
    input: &InputConfig,
    policy: MalformedPolicy,
) -> anyhow::Result<AggregateResult> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = rdr.into_records();

    let Some(first) = records.next().transpose()? else {
        warn!("input contains no rows");
        return Ok(AggregateResult::default());
    };

    let (columns, first_row) = if first.iter().any(|field| field.trim() == FILENAME_COLUMN) {
        let columns: Vec<String> = first.iter().map(|field| field.trim().to_string()).collect();
        (columns, None)
    } else {
        debug!("no header row, using default columns");
        (input.default_columns.clone(), Some(first))
    };

    let filename_idx = columns
        .iter()
        .position(|column| column == FILENAME_COLUMN)
        .with_context(|| format!("no '{}' column in input", FILENAME_COLUMN))?;

    let mut aggregator = MetricAggregator::with_ignored_fields(input.ignored_columns.iter().cloned());
    let mut skipped = 0usize;

    for record in first_row.into_iter().map(Ok).chain(records) {
        let record = record?;
        let line = record.position().map_or(0, |pos| pos.line());
        let filename = record.get(filename_idx).unwrap_or_default();

        match parse_filename(filename) {
            Ok(metadata) => {
                // Missing trailing fields count as empty samples
                let fields = record.iter().chain(std::iter::repeat(""));
                aggregator.ingest(&metadata, columns.iter().zip(fields));
            }
            Err(e) => match policy {
                MalformedPolicy::Abort => {
                    return Err(anyhow::Error::new(e).context(format!("malformed filename on line {}", line)));
                }
                MalformedPolicy::Skip => {
                    warn!(line, error = %e, "skipping row with malformed filename");
                    skipped += 1;
                }
            },
        }
    }

    if skipped > 0 {
        warn!(skipped, "rows skipped because of malformed filenames");
    }
    debug!(rows = aggregator.row_count(), "ingested rows");

    Ok(aggregator.finalize()?)
}
