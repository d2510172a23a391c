//! # AI News Scraper
//!
//! Collects the latest AI news listings from a set of news sites and prints
//! them as a numbered plain-text block, the raw input of a downstream
//! summarization pipeline.
//!
//! ## Usage
//!
//! ```sh
//! ai_news_scraper                                  # configured sources
//! ai_news_scraper https://arstechnica.com/ai/ -n 3 # a single page
//! ai_news_scraper -o ./outputs                     # also write JSON + Markdown
//! ```
//!
//! ## Architecture
//!
//! 1. **Precondition**: probe the language-model backend once
//! 2. **Scraping**: fetch each page in turn and run the article extractor
//! 3. **Output**: print the listing; optionally write JSON and Markdown

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use ai_news_scraper::config::{AppConfig, NewsSource};
use ai_news_scraper::extractor::DEFAULT_MAX_ARTICLES;
use ai_news_scraper::models::Collection;
use ai_news_scraper::outputs::{json, markdown};
use ai_news_scraper::tool::NewsScraper;
use ai_news_scraper::utils::{ensure_writable_dir, time_of_day};
use ai_news_scraper::{backend, collect};
use cli::Cli;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("ai_news_scraper starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = AppConfig::load(args.config.as_deref()).await?;
    if args.show_config {
        print!("{}", config.describe());
        return Ok(());
    }

    // Early check: ensure output dir is writable
    if let Some(dir) = &args.output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir,
                error = %e,
                "Output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    if !args.skip_backend_check {
        let backend_url = args
            .backend_url
            .clone()
            .unwrap_or_else(|| config.backend_url.clone());
        info!(%backend_url, "Checking language-model backend");
        if !backend::check_backend(&backend_url).await {
            error!(
                %backend_url,
                "Cannot connect to the language-model backend. Start it (e.g. `ollama run llama3`) or pass --skip-backend-check"
            );
            return Err(format!("language-model backend unreachable at {backend_url}").into());
        }
    }

    // ---- Decide what to scrape ----
    let (targets, default_max) = if args.urls.is_empty() {
        (config.sources.clone(), config.articles_per_source)
    } else {
        let adhoc: Vec<NewsSource> = args
            .urls
            .iter()
            .map(|url| NewsSource {
                name: url.clone(),
                url: url.clone(),
                kind: "adhoc".to_string(),
            })
            .collect();
        (adhoc, DEFAULT_MAX_ARTICLES)
    };
    let max_articles = match args.max_articles {
        Some(n) => usize::try_from(n)
            .map_err(|_| format!("--max-articles {n} is too large for this platform"))?,
        None => default_max,
    };
    info!(sources = targets.len(), max_articles, "Starting collection");

    let scraper = NewsScraper::with_selectors(config.container_selectors.clone())?;
    let mut collection = Collection {
        local_date: Local::now().date_naive().to_string(),
        time_of_day: time_of_day(),
        local_time: Local::now().time().format("%H:%M:%S").to_string(),
        sources: Vec::new(),
    };

    let listings = collect::collect_sources(&scraper, &targets, max_articles).await;
    print!("{}", collect::listings_to_text(&listings));
    collection.sources = listings.into_iter().map(|l| l.report).collect();

    // ---- Optional file outputs ----
    if let Some(dir) = &args.output_dir {
        if let Err(e) = json::write_collection(&collection, dir).await {
            error!(error = %e, "Failed to write JSON collection");
        }
        if let Err(e) = markdown::write_markdown(&collection, dir).await {
            error!(error = %e, "Failed to write Markdown collection");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        articles = collection.article_count(),
        sources = collection.sources.len(),
        "Execution complete"
    );

    Ok(())
}
