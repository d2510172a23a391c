//! Error type for a single scrape.
//!
//! Every way a scrape can come back without articles is a [`ScrapeError`]
//! variant. The display strings are the exact messages handed to whoever
//! consumes the tool's text output, so callers can render any outcome with
//! `to_string()` and keep going.

use thiserror::Error;

/// Boxed source error carried by transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The page could not be retrieved: invalid URL, connection failure,
    /// timeout, or a non-2xx status.
    #[error("Error scraping {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    /// Anything else that went wrong while preparing or parsing the page.
    #[error("Unexpected error: {0}")]
    Unexpected(String),

    /// The page was fetched but neither extraction strategy produced a record.
    #[error("No articles found at {url}")]
    NoArticles { url: String },
}

impl ScrapeError {
    pub fn transport(url: &str, source: impl Into<BoxError>) -> Self {
        ScrapeError::Transport {
            url: url.to_string(),
            source: source.into(),
        }
    }

    /// `true` for the "page fetched, nothing recognisable on it" outcome.
    pub fn is_no_articles(&self) -> bool {
        matches!(self, ScrapeError::NoArticles { .. })
    }
}
