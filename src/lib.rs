//! # Job Scrape
//!
//! Scrapes paginated job-listing search results and writes them to a CSV
//! file.
//!
//! ## Usage
//!
//! ```no_run
//! # async fn demo() -> Result<(), job_scrape::error::ScrapeError> {
//! let config = job_scrape::config::ScrapeConfig::default();
//! let path = job_scrape::scrape("rust developer", &config).await?;
//! println!("wrote {}", path.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! 1. **Probing**: fetch the first result page and count pagination links
//! 2. **Fetching**: one task per page; each page spawns one task per card
//! 3. **Merging**: page batches are concatenated as they arrive
//! 4. **Writing**: one formatting task per record; rows are written by a
//!    single task in arrival order
//!
//! Any fetch, status or write error aborts the whole run.

pub mod config;
pub mod error;
pub mod models;
pub mod outputs;
pub mod scrape;
pub mod scrapers;
pub mod utils;

pub use error::ScrapeError;
pub use scrape::{run, scrape, scrape_with};
