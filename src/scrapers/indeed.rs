//! Indeed search-result scraper.
//!
//! Result pages list one `.jobsearch-SerpJobCard` element per listing, and a
//! `.pagination` block whose links give the number of pages to visit.
//!
//! # Concurrency
//!
//! [`fetch_page`] spawns one extractor task per card and waits for exactly as
//! many results as cards were found. A parsed [`Html`] document is not
//! `Send`, so every extractor gets the page body as a shared `Arc<str>` plus
//! the index of its card, and parses the whole document again. Cards are
//! never cut out of their surrounding markup, so table rows and list items
//! keep their attributes and children.

use crate::error::ScrapeError;
use crate::models::{JobRecord, PageBatch};
use crate::scrapers::fetch::Fetch;
use crate::utils::normalize_whitespace;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument};
use url::Url;

/// Attribute holding the listing id on each card.
pub const ID_ATTR: &str = "data-jk";

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {css:?}: {e}"))
}

static PAGINATION: Lazy<Selector> = Lazy::new(|| selector(".pagination"));
static PAGE_LINK: Lazy<Selector> = Lazy::new(|| selector("a"));
static CARD: Lazy<Selector> = Lazy::new(|| selector(".jobsearch-SerpJobCard"));
static TITLE: Lazy<Selector> = Lazy::new(|| selector(".title>a"));
static LOCATION: Lazy<Selector> = Lazy::new(|| selector(".sjcl"));
static SALARY: Lazy<Selector> = Lazy::new(|| selector(".salaryText"));
static SUMMARY: Lazy<Selector> = Lazy::new(|| selector(".summary"));

/// Delay applied inside an extractor task before it parses its card.
pub type ExtractDelay = fn(usize) -> Duration;

fn no_delay(_: usize) -> Duration {
    Duration::ZERO
}

/// Fetch the first result page once and count its pagination links.
///
/// # Arguments
///
/// * `fetcher` - Transport used for the single request
/// * `search_url` - Base query URL, `<host>/jobs?q=<term>`
///
/// # Returns
///
/// The number of pagination links, or 0 when the page has no pagination
/// block. The count is trusted as is; predicted pages are not checked for
/// existence. Transport and status failures are returned as errors.
#[instrument(level = "info", skip(fetcher, search_url), fields(url = %search_url))]
pub async fn probe_page_count<F: Fetch>(fetcher: &F, search_url: &Url) -> Result<usize, ScrapeError> {
    let body = fetcher.fetch(search_url.as_str()).await?;
    let pages = count_pagination_links(&body);
    info!(pages, "Probed page count");
    Ok(pages)
}

/// Number of links in the pagination block. With several blocks, the last
/// one counts.
pub fn count_pagination_links(html: &str) -> usize {
    let document = Html::parse_document(html);
    document
        .select(&PAGINATION)
        .last()
        .map(|region| region.select(&PAGE_LINK).count())
        .unwrap_or(0)
}

/// URL of result page `page`: the search URL plus `start=page * page_size`.
pub fn page_url(search_url: &Url, page: usize, page_size: usize) -> Url {
    let mut url = search_url.clone();
    url.query_pairs_mut()
        .append_pair("start", &(page * page_size).to_string());
    url
}

/// Fetch one result page and extract every card on it.
///
/// # Arguments
///
/// * `fetcher` - Transport used for the page request
/// * `search_url` - Base query URL the page offset is appended to
/// * `page` - Zero-based page index
/// * `page_size` - Listings per page; the offset is `page * page_size`
///
/// # Returns
///
/// A [`PageBatch`] holding exactly one record per card found, in completion
/// order. The first failing extractor task aborts the rest.
#[instrument(level = "info", skip(fetcher, search_url))]
pub async fn fetch_page<F: Fetch>(
    fetcher: &F,
    search_url: &Url,
    page: usize,
    page_size: usize,
) -> Result<PageBatch, ScrapeError> {
    let url = page_url(search_url, page, page_size);
    let body: Arc<str> = Arc::from(fetcher.fetch(url.as_str()).await?);
    let cards = count_cards(&body);
    debug!(%url, cards, "Discovered cards");

    let records = extract_cards(body, cards, no_delay).await?;

    info!(page, records = records.len(), "Extracted page");
    Ok(PageBatch { page, records })
}

/// Spawn one extractor per card index in `0..cards` and collect exactly
/// `cards` records. `delay` is awaited inside each task before extraction.
pub async fn extract_cards(
    body: Arc<str>,
    cards: usize,
    delay: ExtractDelay,
) -> Result<Vec<JobRecord>, ScrapeError> {
    let mut extractors = JoinSet::new();
    for index in 0..cards {
        let body = Arc::clone(&body);
        extractors.spawn(async move {
            let pause = delay(index);
            if !pause.is_zero() {
                tokio::time::sleep(pause).await;
            }
            extract_nth_card(&body, index)
        });
    }

    let mut records = Vec::with_capacity(cards);
    while let Some(joined) = extractors.join_next().await {
        records.push(joined?);
    }
    debug_assert_eq!(records.len(), cards);
    Ok(records)
}

/// Number of cards on a result page.
pub fn count_cards(html: &str) -> usize {
    Html::parse_document(html).select(&CARD).count()
}

/// Parse a result page and extract the record of card number `index`.
///
/// An index past the last card yields an empty record.
pub fn extract_nth_card(html: &str, index: usize) -> JobRecord {
    let document = Html::parse_document(html);
    document
        .select(&CARD)
        .nth(index)
        .map(extract_card)
        .unwrap_or_default()
}

/// Build a record from a card element.
///
/// Never fails: a missing id or sub-element yields an empty field.
pub fn extract_card(card: ElementRef<'_>) -> JobRecord {
    JobRecord {
        id: card.value().attr(ID_ATTR).unwrap_or_default().to_string(),
        title: text_of(card, &TITLE),
        location: text_of(card, &LOCATION),
        salary: text_of(card, &SALARY),
        summary: text_of(card, &SUMMARY),
    }
}

/// Concatenated text of every match under `card`, whitespace-normalized.
fn text_of(card: ElementRef<'_>, selector: &Selector) -> String {
    let text: String = card.select(selector).flat_map(|el| el.text()).collect();
    normalize_whitespace(&text)
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! HTML builders shaped like real result pages.

    pub fn card(id: Option<&str>, title: &str, location: &str, salary: Option<&str>) -> String {
        let id_attr = id.map(|id| format!(r#" data-jk="{id}""#)).unwrap_or_default();
        let salary = salary
            .map(|s| format!(r#"<span class="salaryText">{s}</span>"#))
            .unwrap_or_default();
        format!(
            r#"<div class="jobsearch-SerpJobCard unifiedRow row result"{id_attr}>
                 <h2 class="title">
                   <a href="/rc/clk?jk=x">  {title}  </a>
                 </h2>
                 <div class="sjcl"><span class="company">Acme</span>
                   <span class="location">{location}</span></div>
                 {salary}
                 <div class="summary"><ul><li>Write   Rust
                   services</li></ul></div>
               </div>"#
        )
    }

    pub fn result_page(cards: &[String], page_links: usize) -> String {
        let links: String = (0..page_links)
            .map(|i| format!(r#"<a href="/jobs?q=x&start={}">{}</a>"#, i * 10, i + 2))
            .collect();
        let pagination = if page_links > 0 {
            format!(r#"<div class="pagination">{links}</div>"#)
        } else {
            String::new()
        };
        format!(
            "<!DOCTYPE html><html><head><title>jobs</title></head><body>\
             <div id=\"resultsCol\">{}</div>{pagination}</body></html>",
            cards.concat()
        )
    }

    pub fn numbered_cards(page: usize, count: usize) -> Vec<String> {
        (0..count)
            .map(|i| {
                card(
                    Some(&format!("p{page}c{i}")),
                    &format!("Job {page}-{i}"),
                    "Seoul",
                    None,
                )
            })
            .collect()
    }
}
