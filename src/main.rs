//! # Job Scrape
//!
//! Command-line front for the scrape pipeline: resolves configuration,
//! runs one scrape for the given term and prints the path of the CSV file.
//!
//! ```sh
//! RUST_LOG=job_scrape=debug job_scrape "rust developer" -o ./out
//! ```

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("job_scrape starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = args.resolve_config().await.inspect_err(|e| {
        error!(error = %e, "Invalid configuration");
    })?;

    match job_scrape::scrape(&args.term, &config).await {
        Ok(path) => {
            let elapsed = start_time.elapsed();
            info!(
                path = %path.display(),
                ?elapsed,
                secs = elapsed.as_secs(),
                millis = elapsed.subsec_millis(),
                "Execution complete"
            );
            println!("{}", path.display());
            Ok(())
        }
        Err(e) => {
            error!(term = %args.term, error = %e, "Scrape failed");
            Err(e.into())
        }
    }
}
