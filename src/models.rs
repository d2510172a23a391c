//! Data models for scraped articles and collection runs.
//!
//! This module defines the core data structures used throughout the application:
//! - [`ArticleRecord`]: One news item pulled out of a listing page
//! - [`SourceReport`]: Everything scraped from a single source
//! - [`Collection`]: All sources scraped in one run of the binary

use serde::{Deserialize, Serialize};

/// One news item extracted from a listing page.
///
/// Records are created by the extractor and never mutated afterwards. The
/// `title` is always non-empty; records without one are discarded before
/// they reach this type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleRecord {
    /// The headline text.
    pub title: String,
    /// Absolute link to the article, when the container had a usable anchor.
    pub url: Option<String>,
    /// Teaser or first paragraph, at most 300 characters.
    pub description: Option<String>,
    /// Date text as found on the page, or the run date in `YYYY-MM-DD` form.
    pub date: String,
}

/// The outcome of scraping one source during a collection run.
///
/// A failed source keeps its rendered error message in `error` and has no
/// articles; the run carries on with the remaining sources.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceReport {
    /// Human-readable source name, e.g. "Ars Technica - AI".
    pub name: String,
    /// The listing page that was fetched.
    pub url: String,
    /// Articles extracted from the page, in document order.
    pub articles: Vec<ArticleRecord>,
    /// Rendered error or "no articles" message when nothing was extracted.
    pub error: Option<String>,
}

impl SourceReport {
    /// The `example` part of `https://www.example.com/ai/`.
    pub fn source_tag(&self) -> Option<String> {
        let parsed = url::Url::parse(&self.url).ok()?;
        let host = parsed.host_str()?;
        let parts: Vec<&str> = host.split('.').collect();
        if parts.len() >= 2 {
            Some(parts[parts.len() - 2].to_string())
        } else {
            None
        }
    }
}

/// All sources scraped in one run.
///
/// # Edition Naming
///
/// The `time_of_day` field categorizes runs as:
/// - `"morning"`: 00:00 - 08:00
/// - `"afternoon"`: 08:00 - 16:00
/// - `"evening"`: 16:00 - 24:00
#[derive(Debug, Deserialize, Serialize)]
pub struct Collection {
    /// The run date in `YYYY-MM-DD` format.
    pub local_date: String,
    /// The time of day category: "morning", "afternoon", or "evening".
    pub time_of_day: String,
    /// The exact local time the run started.
    pub local_time: String,
    /// One report per scraped source, in scrape order.
    pub sources: Vec<SourceReport>,
}

impl Collection {
    /// Total number of articles across all sources.
    pub fn article_count(&self) -> usize {
        self.sources.iter().map(|s| s.articles.len()).sum()
    }
}
