//! The news scraping tool: fetch one listing page and describe its articles.
//!
//! [`NewsScraper::scrape`] returns structured records or a [`ScrapeError`];
//! [`NewsScraper::run`] renders either into the plain-text block the
//! downstream summarization pipeline reads. A failed page never aborts the
//! caller: it becomes a descriptive string in place of the listing.

use crate::error::ScrapeError;
use crate::extractor::{DEFAULT_CONTAINER_SELECTORS, Extractor};
use crate::models::ArticleRecord;
use crate::utils::truncate_for_log;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Sent with every request; several news sites refuse unknown agents.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Per-request timeout for page retrieval.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct NewsScraper {
    client: Client,
    container_selectors: Vec<String>,
}

impl NewsScraper {
    pub fn new() -> Result<Self, ScrapeError> {
        let selectors: Vec<String> = DEFAULT_CONTAINER_SELECTORS
            .iter()
            .map(|s| s.to_string())
            .collect();
        Self::with_selectors(selectors)
    }

    /// Scraper whose extractor scans `container_selectors` before falling
    /// back to headlines. The selectors are compiled on every scrape, so an
    /// invalid one shows up as an `Unexpected error` outcome.
    pub fn with_selectors(container_selectors: Vec<String>) -> Result<Self, ScrapeError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| ScrapeError::Unexpected(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            container_selectors,
        })
    }

    /// Fetch `url` and extract up to `max_articles` records.
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL of the listing page; relative links resolve against it
    /// * `max_articles` - Upper bound on returned records
    ///
    /// # Returns
    ///
    /// Records in page order, never empty.
    ///
    /// # Errors
    ///
    /// * [`ScrapeError::Transport`] - invalid URL, connection failure, timeout or non-2xx status
    /// * [`ScrapeError::Unexpected`] - an invalid container selector
    /// * [`ScrapeError::NoArticles`] - the page was fetched but nothing was recognised
    #[instrument(level = "info", skip(self))]
    pub async fn scrape(
        &self,
        url: &str,
        max_articles: usize,
    ) -> Result<Vec<ArticleRecord>, ScrapeError> {
        let html = self.fetch(url).await?;
        let extractor = Extractor::with_selectors(self.container_selectors.as_slice())?;
        let records = extractor
            .extract_page(&html, url, max_articles)
            .inspect_err(|e| {
                if e.is_no_articles() {
                    debug!(preview = %truncate_for_log(&html, 300), "No recognisable articles");
                }
            })?;
        info!(count = records.len(), "Extracted articles");
        Ok(records)
    }

    /// Like [`NewsScraper::scrape`], rendered as text. Never fails.
    pub async fn run(&self, url: &str, max_articles: usize) -> String {
        render(&self.scrape(url, max_articles).await)
    }

    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let parsed = url::Url::parse(url).map_err(|e| ScrapeError::transport(url, e))?;
        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ScrapeError::transport(url, e))?;
        let body = response
            .text()
            .await
            .map_err(|e| ScrapeError::transport(url, e))?;
        info!(bytes = body.len(), "Fetched page");
        Ok(body)
    }
}

/// Render a scrape outcome the way the tool reports it.
pub fn render(outcome: &Result<Vec<ArticleRecord>, ScrapeError>) -> String {
    match outcome {
        Ok(records) => format_articles(records),
        Err(e) => {
            warn!(error = %e, "Scrape produced no listing");
            e.to_string()
        }
    }
}

/// Numbered listing with a leading count line.
///
/// ```text
/// Found 1 articles:
///
/// --- Article 1 ---
/// Title: ...
/// URL: ...
/// Description: ...
/// Date: ...
///
/// ```
pub fn format_articles(records: &[ArticleRecord]) -> String {
    let mut lines = vec![format!("Found {} articles:\n", records.len())];
    for (i, record) in records.iter().enumerate() {
        lines.push(format!("--- Article {} ---", i + 1));
        lines.push(format!("Title: {}", record.title));
        lines.push(format!("URL: {}", record.url.as_deref().unwrap_or("N/A")));
        if let Some(description) = record.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(format!("Description: {}", description));
        }
        lines.push(format!("Date: {}", record.date));
        lines.push(String::new());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;

    const LISTING: &str = r#"<html><body>
        <article><h2>First story</h2><a href="/n/1">x</a><p>One.</p><time>May 1</time></article>
        <article><h2>Second story</h2><a href="/n/2">x</a></article>
    </body></html>"#;

    fn record(title: &str, url: Option<&str>, description: Option<&str>) -> ArticleRecord {
        ArticleRecord {
            title: title.to_string(),
            url: url.map(String::from),
            description: description.map(String::from),
            date: "2025-05-06".to_string(),
        }
    }

    #[test]
    fn test_format_articles() {
        let text = format_articles(&[
            record("One", Some("https://x.com/1"), Some("Teaser")),
            record("Two", None, None),
        ]);
        assert_eq!(
            text,
            "Found 2 articles:\n\n\
             --- Article 1 ---\n\
             Title: One\n\
             URL: https://x.com/1\n\
             Description: Teaser\n\
             Date: 2025-05-06\n\n\
             --- Article 2 ---\n\
             Title: Two\n\
             URL: N/A\n\
             Date: 2025-05-06\n"
        );
    }

    #[tokio::test]
    async fn test_scrape_resolves_against_page_url() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/ai/")
                    .header("user-agent", BROWSER_USER_AGENT);
                then.status(200)
                    .header("content-type", "text/html; charset=utf-8")
                    .body(LISTING);
            })
            .await;

        let scraper = NewsScraper::new().unwrap();
        let records = scraper.scrape(&server.url("/ai/"), 10).await.unwrap();

        mock.assert_async().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].url.as_deref(), Some(server.url("/n/1").as_str()));
        assert_eq!(records[0].date, "May 1");
        assert_eq!(records[1].description, None);
    }

    #[tokio::test]
    async fn test_run_renders_listing() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200).body(LISTING);
            })
            .await;

        let text = NewsScraper::new().unwrap().run(&server.url("/"), 1).await;
        assert!(text.starts_with("Found 1 articles:\n\n--- Article 1 ---\nTitle: First story\n"));
        assert!(!text.contains("Second story"));
    }

    #[tokio::test]
    async fn test_non_2xx_is_transport_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/gone");
                then.status(404);
            })
            .await;

        let url = server.url("/gone");
        let err = NewsScraper::new().unwrap().scrape(&url, 10).await.unwrap_err();
        assert!(matches!(err, ScrapeError::Transport { .. }));
        assert!(err.to_string().starts_with(&format!("Error scraping {url}: ")));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{addr}/");
        let text = NewsScraper::new().unwrap().run(&url, 10).await;
        assert!(text.starts_with(&format!("Error scraping {url}: ")));
    }

    #[tokio::test]
    async fn test_invalid_url_is_transport_error() {
        let text = NewsScraper::new().unwrap().run("not a url", 10).await;
        assert!(text.starts_with("Error scraping not a url: "));
    }

    #[tokio::test]
    async fn test_empty_page_is_no_articles() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/empty");
                then.status(200).body("<html><body><p>Nothing here</p></body></html>");
            })
            .await;

        let url = server.url("/empty");
        let text = NewsScraper::new().unwrap().run(&url, 10).await;
        assert_eq!(text, format!("No articles found at {url}"));
    }

    #[tokio::test]
    async fn test_invalid_selector_is_unexpected_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200).body(LISTING);
            })
            .await;

        let scraper = NewsScraper::with_selectors(vec!["div[[[".to_string()]).unwrap();
        let text = scraper.run(&server.url("/"), 10).await;
        assert!(text.starts_with("Unexpected error: invalid container selector"));
    }
}
