//! ai_news_scraper - AI news collection with a best-effort article extractor
//!
//! # Architecture
//!
//! - [`extractor`] - Selector-cascade article extraction from listing pages
//! - [`tool`] - Fetch one page, extract, render the text listing
//! - [`collect`] - Sequential scrape over many sources
//! - [`config`] - News sources, categories and extractor tuning
//! - [`backend`] - Startup probe of the language-model backend
//! - [`outputs`] - JSON and Markdown persistence of a run
//! - [`models`] - Article and run data structures
//! - [`error`] - The scrape error type
//!
//! # Example
//!
//! ```no_run
//! use ai_news_scraper::tool::NewsScraper;
//!
//! #[tokio::main]
//! async fn main() {
//!     let scraper = NewsScraper::new().expect("HTTP client");
//!     println!("{}", scraper.run("https://arstechnica.com/ai/", 10).await);
//! }
//! ```

pub mod backend;
pub mod collect;
pub mod config;
pub mod error;
pub mod extractor;
pub mod models;
pub mod outputs;
pub mod tool;
pub mod utils;

pub use error::ScrapeError;
pub use extractor::Extractor;
pub use models::ArticleRecord;
