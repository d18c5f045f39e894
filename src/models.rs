//! Data models for scraped job listings and their CSV rendering.
//!
//! - [`JobRecord`]: one listing extracted from a card fragment
//! - [`PageBatch`]: the records of one result page, in no particular order
//! - [`RecordSet`]: every page batch concatenated by the orchestrator
//! - [`OutputRow`]: the five CSV columns derived from a record

/// Header row written before any data row.
pub const CSV_HEADER: [&str; 5] = ["Link", "Title", "Location", "Salary", "Summary"];

/// A single job listing as extracted from one card.
///
/// Fields are whitespace-normalized at extraction time and may be empty when
/// the card lacks the corresponding element. Records are never mutated once
/// built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobRecord {
    /// Opaque listing id taken from the card's `data-jk` attribute.
    pub id: String,
    pub title: String,
    pub location: String,
    /// Often empty; many listings do not disclose a salary.
    pub salary: String,
    pub summary: String,
}

/// Records produced by one page worker.
#[derive(Debug, Default)]
pub struct PageBatch {
    /// Zero-based page index this batch came from.
    pub page: usize,
    pub records: Vec<JobRecord>,
}

/// All records of a run. Order across pages depends on task timing and
/// carries no meaning.
pub type RecordSet = Vec<JobRecord>;

/// One CSV data row: the constructed link followed by four record fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub link: String,
    pub title: String,
    pub location: String,
    pub salary: String,
    pub summary: String,
}

impl OutputRow {
    /// Build a row from a record. The link is `link_prefix` followed by the
    /// record id; an empty id leaves the bare prefix.
    pub fn from_record(record: JobRecord, link_prefix: &str) -> Self {
        let JobRecord {
            id,
            title,
            location,
            salary,
            summary,
        } = record;
        OutputRow {
            link: format!("{link_prefix}{id}"),
            title,
            location,
            salary,
            summary,
        }
    }

    pub fn fields(&self) -> [&str; 5] {
        [
            &self.link,
            &self.title,
            &self.location,
            &self.salary,
            &self.summary,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> JobRecord {
        JobRecord {
            id: id.to_string(),
            title: "Backend Engineer".to_string(),
            location: "Seoul".to_string(),
            salary: String::new(),
            summary: "Build services in Rust".to_string(),
        }
    }

    #[test]
    fn test_output_row_link_uses_prefix_and_id() {
        let row = OutputRow::from_record(record("abc123"), "https://kr.indeed.com/viewjob?jk=");
        assert_eq!(row.link, "https://kr.indeed.com/viewjob?jk=abc123");
        assert_eq!(row.title, "Backend Engineer");
        assert_eq!(row.salary, "");
    }

    #[test]
    fn test_output_row_empty_id_is_bare_prefix() {
        let row = OutputRow::from_record(record(""), "https://kr.indeed.com/viewjob?jk=");
        assert_eq!(row.link, "https://kr.indeed.com/viewjob?jk=");
    }

    #[test]
    fn test_output_row_fields_match_header_width() {
        let row = OutputRow::from_record(record("x"), "p?jk=");
        assert_eq!(row.fields().len(), CSV_HEADER.len());
        assert_eq!(row.fields()[3], "");
    }
}
