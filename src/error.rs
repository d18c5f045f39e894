//! Error type shared by every stage of the scrape pipeline.
//!
//! All variants are fatal to a run. Nothing here is retried; the first error
//! raised by any task wins and the remaining tasks are cancelled. Missing
//! fields inside a successfully fetched page are not errors and never reach
//! this type.

use thiserror::Error;

/// Boxed error used as the source of transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that abort a scrape run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The source could not be reached, or the body could not be read.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The source answered with anything other than 200 OK.
    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    /// Opening, writing or removing the output file failed.
    #[error("output error: {0}")]
    Sink(#[from] std::io::Error),

    /// The CSV encoder rejected a row. I/O failures underneath the encoder
    /// are reported as [`ScrapeError::Sink`] instead.
    #[error("CSV error: {0}")]
    Csv(#[source] csv::Error),

    /// A spawned task panicked or was cancelled.
    #[error("task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ScrapeError {
    pub fn transport(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        ScrapeError::Transport {
            url: url.into(),
            source: source.into(),
        }
    }
}

impl From<csv::Error> for ScrapeError {
    fn from(e: csv::Error) -> Self {
        if !e.is_io_error() {
            return ScrapeError::Csv(e);
        }
        match e.into_kind() {
            csv::ErrorKind::Io(io) => ScrapeError::Sink(io),
            _ => unreachable!("is_io_error implies ErrorKind::Io"),
        }
    }
}
