//! Sequential collection over several news sources.
//!
//! Sources are scraped one after another with the same [`NewsScraper`].
//! A failing source contributes its error text and no articles; the run
//! always continues with the next source.

use crate::config::NewsSource;
use crate::models::SourceReport;
use crate::tool::{NewsScraper, render};
use futures::stream::{self, StreamExt};
use std::fmt::Write;
use tracing::{info, instrument, warn};

/// A scraped source: structured report plus the tool's text for it.
#[derive(Debug)]
pub struct SourceListing {
    pub report: SourceReport,
    pub text: String,
}

/// Scrape a single source.
#[instrument(level = "info", skip(scraper, source), fields(source = %source.name, url = %source.url))]
pub async fn collect_source(
    scraper: &NewsScraper,
    source: &NewsSource,
    max_articles: usize,
) -> SourceListing {
    let outcome = scraper.scrape(&source.url, max_articles).await;
    let text = render(&outcome);
    let report = match outcome {
        Ok(articles) => {
            info!(count = articles.len(), "Collected source");
            SourceReport {
                name: source.name.clone(),
                url: source.url.clone(),
                articles,
                error: None,
            }
        }
        Err(e) => {
            warn!(error = %e, "Source yielded no articles");
            SourceReport {
                name: source.name.clone(),
                url: source.url.clone(),
                articles: Vec::new(),
                error: Some(e.to_string()),
            }
        }
    };
    SourceListing { report, text }
}

/// Scrape every source in order, one at a time.
///
/// # Arguments
///
/// * `scraper` - Shared scraper (one HTTP client for the whole run)
/// * `sources` - Sources in the order they should be visited
/// * `max_articles` - Per-source cap
///
/// # Returns
///
/// One [`SourceListing`] per source, in input order. Failed sources carry
/// their error text and an empty article list.
#[instrument(level = "info", skip(scraper, sources), fields(sources = sources.len()))]
pub async fn collect_sources(
    scraper: &NewsScraper,
    sources: &[NewsSource],
    max_articles: usize,
) -> Vec<SourceListing> {
    let listings: Vec<SourceListing> = stream::iter(sources)
        .then(|source| collect_source(scraper, source, max_articles))
        .collect()
        .await;

    let total: usize = listings.iter().map(|l| l.report.articles.len()).sum();
    info!(total, "Finished collecting sources");
    listings
}

/// Combined text for a whole run, one block per source.
///
/// ```text
/// SOURCE: <name>
/// ---
/// <tool output>
///
/// Total articles collected: N
/// ```
pub fn listings_to_text(listings: &[SourceListing]) -> String {
    let mut out = String::new();
    for listing in listings {
        writeln!(out, "SOURCE: {}", listing.report.name).unwrap();
        writeln!(out, "---").unwrap();
        out.push_str(&listing.text);
        if !listing.text.ends_with('\n') {
            out.push('\n');
        }
        out.push('\n');
    }
    let total: usize = listings.iter().map(|l| l.report.articles.len()).sum();
    writeln!(out, "Total articles collected: {}", total).unwrap();
    out
}
