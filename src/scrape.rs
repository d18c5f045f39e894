//! Orchestration of a full scrape run.
//!
//! A run moves through probing, fetching, merging and writing. [`run`] covers
//! the first three and returns the merged [`RecordSet`]; [`scrape`] adds the
//! CSV artifact on disk and is the entry point for callers such as a request
//! handler.
//!
//! # Failure
//!
//! The first error from any page worker wins. The remaining workers are
//! aborted, which in turn drops and aborts their card extractors, and the
//! error is returned. A failed run never produces an output file.

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::models::RecordSet;
use crate::outputs::csv_writer::write_file;
use crate::scrapers::fetch::{Fetch, HttpFetcher};
use crate::scrapers::indeed::{fetch_page, probe_page_count};
use crate::utils::{normalize_term, output_file_name};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{error, info, instrument};

/// Probe the page count, fetch every page concurrently and merge the batches.
///
/// The term is whitespace-normalized and lowercased first. One worker is
/// spawned per page index in `0..page_count`, and exactly that many batches
/// are collected.
///
/// # Arguments
///
/// * `fetcher` - Transport shared by the prober and every page worker
/// * `config` - Base URL and page size
/// * `term` - Free-text search term as supplied by the caller
///
/// # Returns
///
/// Every record of every page, in no particular order. A page count of 0
/// yields an empty set without spawning anything. The first transport or
/// status error aborts all in-flight workers and is returned.
#[instrument(level = "info", skip(fetcher, config))]
pub async fn run<F: Fetch>(
    fetcher: Arc<F>,
    config: &ScrapeConfig,
    term: &str,
) -> Result<RecordSet, ScrapeError> {
    let term = normalize_term(term);
    let search_url = config.search_url(&term)?;

    let page_count = probe_page_count(fetcher.as_ref(), &search_url).await?;
    if page_count == 0 {
        info!(%term, "No pagination found; nothing to fetch");
        return Ok(RecordSet::new());
    }

    let page_size = config.page_size;
    let mut workers = JoinSet::new();
    for page in 0..page_count {
        let fetcher = Arc::clone(&fetcher);
        let search_url = search_url.clone();
        workers.spawn(async move { fetch_page(fetcher.as_ref(), &search_url, page, page_size).await });
    }
    info!(pages = page_count, "Spawned page workers");

    let mut records = RecordSet::new();
    let mut received = 0usize;
    while let Some(joined) = workers.join_next().await {
        match joined.map_err(ScrapeError::from).and_then(|batch| batch) {
            Ok(batch) => {
                received += 1;
                records.extend(batch.records);
            }
            Err(e) => {
                error!(error = %e, received, pages = page_count, "Page worker failed; aborting run");
                workers.abort_all();
                return Err(e);
            }
        }
    }

    info!(pages = received, records = records.len(), "Merged page batches");
    Ok(records)
}

/// Scrape `term` over HTTP and write the results to a new CSV file.
///
/// Returns the path of the completed artifact inside `config.output_dir`.
/// Disposing of the file is up to the caller.
pub async fn scrape(term: &str, config: &ScrapeConfig) -> Result<PathBuf, ScrapeError> {
    config.validate()?;
    let fetcher = Arc::new(HttpFetcher::new(config)?);
    scrape_with(fetcher, term, config).await
}

/// [`scrape`] over any [`Fetch`] implementation.
///
/// # Arguments
///
/// * `fetcher` - Transport used for every request of the run
/// * `term` - Free-text search term
/// * `config` - Base URL, page size and output directory
///
/// # Returns
///
/// The path of a fully written CSV file. On error no file is left behind.
#[instrument(level = "info", skip(fetcher, config), fields(output_dir = %config.output_dir.display()))]
pub async fn scrape_with<F: Fetch>(
    fetcher: Arc<F>,
    term: &str,
    config: &ScrapeConfig,
) -> Result<PathBuf, ScrapeError> {
    let t0 = Instant::now();
    let link_prefix = config.view_link_prefix()?;

    let records = run(fetcher, config, term).await?;

    tokio::fs::create_dir_all(&config.output_dir).await?;
    let path = config
        .output_dir
        .join(output_file_name(&normalize_term(term), Utc::now()));
    let written = write_file(&path, records, &link_prefix).await?;

    let elapsed = t0.elapsed();
    info!(
        path = %path.display(),
        records = written,
        elapsed_ms = elapsed.as_millis() as u64,
        "Done, extracted"
    );
    Ok(path)
}
