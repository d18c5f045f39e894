//! Runtime configuration for a scrape run.
//!
//! Values come from three layers, later ones winning: built-in defaults, an
//! optional YAML file ([`ScrapeConfig::load`]), then command-line flags.
//!
//! ```yaml
//! base_url: https://kr.indeed.com
//! page_size: 10
//! output_dir: ./out
//! request_timeout_secs: 30
//! ```

use crate::error::ScrapeError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://kr.indeed.com";
/// Listings per result page; page offsets are `page * page_size`.
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("job_scrape/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Scheme and host of the listing site, e.g. `https://kr.indeed.com`.
    /// Paths, queries and fragments are rejected by [`ScrapeConfig::validate`].
    pub base_url: String,
    pub page_size: usize,
    /// Directory receiving the CSV artifacts.
    pub output_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            output_dir: PathBuf::from("."),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ScrapeConfig {
    /// Read a YAML config file. Missing keys keep their defaults.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ScrapeError> {
        let text = fs::read_to_string(path.as_ref()).await?;
        let config = Self::from_yaml(&text)?;
        info!(base_url = %config.base_url, page_size = config.page_size, "Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ScrapeError> {
        let config: Self =
            serde_yaml::from_str(text).map_err(|e| ScrapeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScrapeError> {
        if self.page_size == 0 {
            return Err(ScrapeError::Config("page_size must be at least 1".to_string()));
        }
        let base = Url::parse(&self.base_url)?;
        if base.cannot_be_a_base()
            || base.path() != "/"
            || base.query().is_some()
            || base.fragment().is_some()
        {
            return Err(ScrapeError::Config(format!(
                "base_url {} must be a scheme and host only",
                self.base_url
            )));
        }
        Ok(())
    }

    /// `<base_url>/jobs?q=<term>`. The term is percent-encoded.
    pub fn search_url(&self, term: &str) -> Result<Url, ScrapeError> {
        let mut url = Url::parse(&self.base_url)?.join("/jobs")?;
        url.query_pairs_mut().append_pair("q", term);
        Ok(url)
    }

    /// Prefix of every `Link` column value; the listing id is appended to it.
    pub fn view_link_prefix(&self) -> Result<String, ScrapeError> {
        let url = Url::parse(&self.base_url)?.join("/viewjob")?;
        Ok(format!("{url}?jk="))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScrapeConfig::default();
        assert_eq!(config.base_url, "https://kr.indeed.com");
        assert_eq!(config.page_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_partial_keeps_defaults() {
        let config = ScrapeConfig::from_yaml("page_size: 25\noutput_dir: /tmp/jobs\n").unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/jobs"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_from_yaml_rejects_zero_page_size() {
        let err = ScrapeConfig::from_yaml("page_size: 0\n").unwrap_err();
        assert!(matches!(err, ScrapeError::Config(_)));
    }

    #[test]
    fn test_from_yaml_rejects_bad_base_url() {
        let err = ScrapeConfig::from_yaml("base_url: not a url\n").unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidUrl(_)));
    }

    #[test]
    fn test_validate_rejects_base_url_with_path() {
        for base_url in ["https://host/kr/", "https://host/kr", "https://host/?a=1", "mailto:jobs@host"] {
            let config = ScrapeConfig {
                base_url: base_url.to_string(),
                ..ScrapeConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(ScrapeError::Config(_))),
                "{base_url} should be rejected"
            );
        }

        let config = ScrapeConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..ScrapeConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_search_url() {
        let config = ScrapeConfig::default();
        let url = config.search_url("rust developer").unwrap();
        assert_eq!(url.as_str(), "https://kr.indeed.com/jobs?q=rust+developer");
    }

    #[test]
    fn test_view_link_prefix() {
        let config = ScrapeConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..ScrapeConfig::default()
        };
        assert_eq!(
            config.view_link_prefix().unwrap(),
            "http://localhost:8080/viewjob?jk="
        );
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "base_url: http://127.0.0.1:9000\n").unwrap();
        let config = ScrapeConfig::load(&path).await.unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
    }
}
