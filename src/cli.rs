//! Command-line interface definitions for Job Scrape.
//!
//! Flags override values from the optional YAML config file, which in turn
//! override the built-in defaults.

use clap::Parser;
use job_scrape::config::ScrapeConfig;
use job_scrape::error::ScrapeError;
use std::path::PathBuf;

/// Command-line arguments for the Job Scrape application.
///
/// # Examples
///
/// ```sh
/// # Scrape into the current directory
/// job_scrape "rust developer"
///
/// # Custom output directory and config file
/// job_scrape python -o ./out -c ./job_scrape.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Search term; lowercased and whitespace-normalized before use
    pub term: String,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory for the CSV output
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Scheme and host of the listing site
    #[arg(long, env = "JOB_SCRAPE_BASE_URL")]
    pub base_url: Option<String>,

    /// Listings per result page, used to compute page offsets
    #[arg(long)]
    pub page_size: Option<usize>,
}

impl Cli {
    /// Resolve the effective configuration for this invocation.
    pub async fn resolve_config(&self) -> Result<ScrapeConfig, ScrapeError> {
        let base = match &self.config {
            Some(path) => ScrapeConfig::load(path).await?,
            None => ScrapeConfig::default(),
        };
        let config = self.apply(base);
        config.validate()?;
        Ok(config)
    }

    fn apply(&self, mut config: ScrapeConfig) -> ScrapeConfig {
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["job_scrape", "rust developer", "--output-dir", "./out"]);
        assert_eq!(cli.term, "rust developer");
        assert_eq!(cli.output_dir, Some(PathBuf::from("./out")));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["job_scrape", "python", "-o", "/tmp/jobs", "-c", "/tmp/c.yaml"]);
        assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp/jobs")));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.yaml")));
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "job_scrape",
            "go",
            "--base-url",
            "http://localhost:9000",
            "--page-size",
            "20",
        ]);
        let config = cli.apply(ScrapeConfig::default());
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[tokio::test]
    async fn test_resolve_config_rejects_zero_page_size() {
        let cli = Cli::parse_from(["job_scrape", "go", "--page-size", "0"]);
        assert!(matches!(cli.resolve_config().await, Err(ScrapeError::Config(_))));
    }
}
