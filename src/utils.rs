//! String helpers shared by extraction, URL building and output naming.

use chrono::{DateTime, Utc};
use itertools::Itertools;

/// Collapse every run of whitespace to one space and trim both ends.
///
/// Idempotent: normalizing an already normalized string returns it unchanged.
///
/// # Examples
///
/// ```
/// use job_scrape::utils::normalize_whitespace;
/// assert_eq!(normalize_whitespace("  hello   9    f "), "hello 9 f");
/// ```
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().join(" ")
}

/// Normalize a free-text search term: whitespace-collapsed and lowercased.
pub fn normalize_term(term: &str) -> String {
    normalize_whitespace(term).to_lowercase()
}

/// Convert a term to a filesystem-friendly slug.
///
/// Lowercases, drops anything that is not alphanumeric, a space or a hyphen,
/// and replaces spaces with hyphens.
pub fn slugify(term: &str) -> String {
    term.to_lowercase()
        .replace(|c: char| !c.is_alphanumeric() && c != ' ' && c != '-', "")
        .replace(' ', "-")
}

/// File name for a run's CSV artifact, unique per term and second.
pub fn output_file_name(term: &str, at: DateTime<Utc>) -> String {
    let slug = slugify(term);
    let slug = if slug.is_empty() { "all".to_string() } else { slug };
    format!("jobs-{}-{}.csv", slug, at.format("%Y%m%dT%H%M%S%.3fZ"))
}
