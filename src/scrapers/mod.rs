//! Listing-site scrapers.
//!
//! - [`fetch`]: the [`fetch::Fetch`] seam and its HTTP implementation
//! - [`indeed`]: pagination probing, page workers and card extraction for
//!   Indeed result pages
//!
//! Fetch failures are fatal and propagate as [`crate::error::ScrapeError`].
//! Missing elements inside a fetched page are not failures: they leave empty
//! fields in the extracted record.

pub mod fetch;
pub mod indeed;
