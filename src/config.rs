//! Run configuration: news sources, category taxonomy and extractor tuning.
//!
//! Every field has a built-in default, so the binary runs without a config
//! file. A YAML file passed with `--config` only needs the keys it wants to
//! change:
//!
//! ```yaml
//! articles_per_source: 3
//! sources:
//!   - name: Ars Technica - AI
//!     url: https://arstechnica.com/ai/
//!     kind: tech_news
//! ```

use crate::extractor::DEFAULT_CONTAINER_SELECTORS;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;
use tracing::{info, instrument};

/// Ollama's default listen address.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:11434";

/// A news listing page to collect from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsSource {
    pub name: String,
    pub url: String,
    #[serde(default = "default_kind")]
    pub kind: String,
}

fn default_kind() -> String {
    "tech_news".to_string()
}

impl NewsSource {
    fn new(name: &str, url: &str, kind: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            kind: kind.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub sources: Vec<NewsSource>,
    /// Labels the downstream categorizer may assign.
    pub categories: Vec<String>,
    pub articles_per_source: usize,
    /// Container selectors for the extractor, highest priority first.
    pub container_selectors: Vec<String>,
    /// Base URL of the language-model backend checked at startup.
    pub backend_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            categories: default_categories(),
            articles_per_source: 5,
            container_selectors: DEFAULT_CONTAINER_SELECTORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            backend_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

pub fn default_sources() -> Vec<NewsSource> {
    vec![
        NewsSource::new(
            "MIT Technology Review - AI",
            "https://www.technologyreview.com/topic/artificial-intelligence/",
            "tech_review",
        ),
        NewsSource::new(
            "VentureBeat AI",
            "https://venturebeat.com/category/ai/",
            "tech_news",
        ),
        NewsSource::new(
            "The Verge - AI",
            "https://www.theverge.com/ai-artificial-intelligence",
            "tech_news",
        ),
        NewsSource::new("Ars Technica - AI", "https://arstechnica.com/ai/", "tech_news"),
        NewsSource::new(
            "TechCrunch - AI",
            "https://techcrunch.com/category/artificial-intelligence/",
            "tech_news",
        ),
    ]
}

pub fn default_categories() -> Vec<String> {
    [
        "Large Language Models (LLM)",
        "Computer Vision",
        "Natural Language Processing (NLP)",
        "Reinforcement Learning",
        "Robotics & Automation",
        "AI Ethics & Safety",
        "AI Business & Industry",
        "AI Research & Papers",
        "Generative AI",
        "Machine Learning",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl AppConfig {
    /// Parse a YAML document; missing keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load from `path`, or the defaults when no path is given.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&str>) -> Result<Self, Box<dyn Error>> {
        let Some(path) = path else {
            info!("No config file given; using built-in sources");
            return Ok(Self::default());
        };

        let raw = tokio::fs::read_to_string(Path::new(path)).await?;
        let config = Self::from_yaml(&raw)?;
        config.validate()?;
        info!(
            path,
            sources = config.sources.len(),
            categories = config.categories.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Reject values the extractor cannot do anything useful with.
    ///
    /// # Errors
    ///
    /// Returns an error when `articles_per_source` is zero.
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.articles_per_source == 0 {
            return Err("articles_per_source must be at least 1".into());
        }
        Ok(())
    }

    /// Human-readable listing of sources and categories.
    pub fn describe(&self) -> String {
        let mut out = String::from("News sources:\n");
        for source in &self.sources {
            out.push_str(&format!("- {}: {}\n", source.name, source.url));
        }
        out.push_str("\nCategories:\n");
        for category in &self.categories {
            out.push_str(&format!("- {}\n", category));
        }
        out
    }
}
