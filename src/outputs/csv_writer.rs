//! CSV serialization of a record set.
//!
//! The header row goes out first. Each record is then formatted by its own
//! spawned task and the rows are written as those tasks complete, so data
//! row order is arrival order and differs between runs. Consumers must not
//! rely on it.
//!
//! Only the task calling [`write_records`] touches the sink; formatting tasks
//! hand their row back through their join handle. [`write_file`] encodes into
//! memory and persists the bytes with `tokio::fs`, so no blocking file I/O
//! runs on the async workers.

use crate::error::ScrapeError;
use crate::models::{CSV_HEADER, OutputRow, RecordSet};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tokio::task::JoinSet;
use tracing::{debug, error, instrument};

/// Write the header and one row per record to `sink`, then flush.
///
/// # Arguments
///
/// * `records` - The merged record set; consumed by the formatting tasks
/// * `link_prefix` - Prefix of the `Link` column, the record id is appended
/// * `sink` - Destination of the CSV bytes, written only by this task
///
/// # Returns
///
/// The number of data rows written. Any write failure aborts the remaining
/// formatting tasks and is returned as [`ScrapeError::Sink`]; no
/// partial-success mode exists.
#[instrument(level = "info", skip_all, fields(records = records.len()))]
pub async fn write_records<W: Write>(
    records: RecordSet,
    link_prefix: &str,
    sink: &mut W,
) -> Result<usize, ScrapeError> {
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(CSV_HEADER)?;

    let expected = records.len();
    let link_prefix: Arc<str> = Arc::from(link_prefix);
    let mut formatters = JoinSet::new();
    for record in records {
        let link_prefix = Arc::clone(&link_prefix);
        formatters.spawn(async move { OutputRow::from_record(record, &link_prefix) });
    }

    let mut written = 0usize;
    while let Some(joined) = formatters.join_next().await {
        let row = joined?;
        writer.write_record(row.fields())?;
        written += 1;
    }
    writer.flush()?;

    debug!(expected, written, "Wrote CSV rows");
    Ok(written)
}

/// Encode the record set and write it to `path`.
///
/// On failure the partially written file is removed so that no
/// complete-looking artifact is left behind.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_file(
    path: &Path,
    records: RecordSet,
    link_prefix: &str,
) -> Result<usize, ScrapeError> {
    let mut buffer = Vec::new();
    let written = write_records(records, link_prefix, &mut buffer).await?;

    match fs::write(path, &buffer).await {
        Ok(()) => {
            debug!(bytes = buffer.len(), "Persisted CSV");
            Ok(written)
        }
        Err(e) => {
            error!(error = %e, "Writing CSV failed; removing partial output");
            if let Err(rm) = fs::remove_file(path).await {
                if rm.kind() != std::io::ErrorKind::NotFound {
                    error!(error = %rm, "Failed to remove partial output");
                }
            }
            Err(e.into())
        }
    }
}
