//! Command-line interface definitions.
//!
//! All arguments can be provided via command-line flags; the backend URL and
//! config path can also come from environment variables.

use clap::Parser;

/// Collect AI news listings from news sites.
///
/// # Examples
///
/// ```sh
/// # Scrape the configured sources (5 articles each)
/// ai_news_scraper
///
/// # Scrape one page, keep 3 articles, and save JSON/Markdown
/// ai_news_scraper https://arstechnica.com/ai/ -n 3 -o ./outputs
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Pages to scrape instead of the configured sources
    pub urls: Vec<String>,

    /// Maximum articles per page (default: 10 for URLs, `articles_per_source` for sources)
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_articles: Option<u64>,

    /// Optional path to a YAML config file
    #[arg(short, long, env = "AI_NEWS_CONFIG")]
    pub config: Option<String>,

    /// Directory for JSON and Markdown output; nothing is written when absent
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Language-model backend to probe before scraping (overrides config)
    #[arg(long, env = "OLLAMA_BASE_URL")]
    pub backend_url: Option<String>,

    /// Do not require the language-model backend to be reachable
    #[arg(long)]
    pub skip_backend_check: bool,

    /// Print the configured sources and categories, then exit
    #[arg(long)]
    pub show_config: bool,
}
