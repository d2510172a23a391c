//! Best-effort article extraction from news listing pages.
//!
//! News sites share no markup conventions, so extraction is a cascade of
//! [`ExtractionStrategy`]s tried in order; the first one that claims the
//! document decides the result, even if it produced no usable records.
//!
//! 1. [`SelectorCascade`]: known container selectors (`article`, `.post`, ...),
//!    each container mined for title, link, description and date.
//! 2. [`HeadlineFallback`]: linked `h1`-`h3` headlines, used only when no
//!    container selector matched anything at all.
//!
//! # Example
//!
//! ```ignore
//! let extractor = Extractor::new();
//! let records = extractor.extract_page(&html, "https://example.com/ai/", 10)?;
//! ```

pub mod fields;
pub mod pattern;
pub mod strategy;

use crate::error::ScrapeError;
use crate::models::ArticleRecord;
use chrono::Local;
use scraper::Html;
use tracing::{debug, instrument};
use url::Url;

pub use strategy::{
    DEFAULT_CONTAINER_SELECTORS, ExtractionContext, ExtractionStrategy, HeadlineFallback,
    SelectorCascade, StrategyOutcome,
};

/// Default cap on records per page.
pub const DEFAULT_MAX_ARTICLES: usize = 10;

/// Ordered list of strategies plus the date used when a page shows none.
#[derive(Debug)]
pub struct Extractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
    today: String,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    /// Default container selectors followed by the headline fallback.
    pub fn new() -> Self {
        let strategies: Vec<Box<dyn ExtractionStrategy>> = vec![
            Box::new(SelectorCascade::default()),
            Box::new(HeadlineFallback),
        ];
        Self::from_strategies(strategies)
    }

    /// Like [`Extractor::new`] with a custom container selector list.
    pub fn with_selectors<S: AsRef<str>>(selectors: &[S]) -> Result<Self, ScrapeError> {
        let strategies: Vec<Box<dyn ExtractionStrategy>> = vec![
            Box::new(SelectorCascade::new(selectors)?),
            Box::new(HeadlineFallback),
        ];
        Ok(Self::from_strategies(strategies))
    }

    pub fn from_strategies(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self {
            strategies,
            today: Local::now().format("%Y-%m-%d").to_string(),
        }
    }

    /// Override the substitute date (defaults to today, local time).
    pub fn with_today(mut self, today: impl Into<String>) -> Self {
        self.today = today.into();
        self
    }

    /// Run the strategies over `document`; the first one that matches wins.
    ///
    /// Never returns more than `max_articles` records.
    pub fn extract(&self, document: &Html, base_url: &Url, max_articles: usize) -> Vec<ArticleRecord> {
        let ctx = ExtractionContext {
            base_url,
            max_articles,
            today: &self.today,
        };

        for strategy in &self.strategies {
            match strategy.extract(document, &ctx) {
                StrategyOutcome::Matched(mut records) => {
                    records.truncate(max_articles);
                    debug!(strategy = strategy.name(), count = records.len(), "Strategy matched");
                    return records;
                }
                StrategyOutcome::NoMatch => {
                    debug!(strategy = strategy.name(), "Strategy did not match");
                }
            }
        }
        Vec::new()
    }

    /// Parse `html` fetched from `url` and extract its articles.
    ///
    /// # Arguments
    ///
    /// * `html` - Raw page body
    /// * `url` - Page URL, the base for relative links
    /// * `max_articles` - Upper bound on returned records
    ///
    /// # Returns
    ///
    /// Between one and `max_articles` records.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::NoArticles`] when no strategy produced a record, and
    /// [`ScrapeError::Unexpected`] when `url` is not an absolute URL.
    #[instrument(level = "debug", skip(self, html), fields(bytes = html.len()))]
    pub fn extract_page(
        &self,
        html: &str,
        url: &str,
        max_articles: usize,
    ) -> Result<Vec<ArticleRecord>, ScrapeError> {
        let base_url =
            Url::parse(url).map_err(|e| ScrapeError::Unexpected(format!("invalid base URL {url}: {e}")))?;
        let document = Html::parse_document(html);
        let records = self.extract(&document, &base_url, max_articles);
        if records.is_empty() {
            return Err(ScrapeError::NoArticles {
                url: url.to_string(),
            });
        }
        Ok(records)
    }
}
