//! Extraction strategies.
//!
//! A strategy either claims a document (`Matched`, possibly with zero
//! usable records) or declines it (`NoMatch`) so the next one gets a turn.
//!
//! | Strategy | Claims the page when |
//! |----------|----------------------|
//! | [`SelectorCascade`] | any container selector matches at least one element |
//! | [`HeadlineFallback`] | at least one `h1`-`h3` headline has a link and a long enough title |

use crate::error::ScrapeError;
use crate::extractor::fields::{self, element_text};
use crate::models::ArticleRecord;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::fmt;
use tracing::debug;
use url::Url;

/// Container selectors in priority order. Generic `article` first, then
/// common news-template class names, then two site-specific card classes.
pub const DEFAULT_CONTAINER_SELECTORS: &[&str] = &[
    "article",
    ".post",
    ".article",
    ".news-item",
    ".story",
    ".entry",
    "[class*=\"article\"]",
    "[class*=\"post\"]",
    ".c-entry-box--compact",
    ".river-item",
];

/// Headline titles must be longer than this many characters.
pub const MIN_HEADLINE_CHARS: usize = 10;

static HEADLINES: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1, h2, h3").expect("Invalid CSS selector: h1, h2, h3"));

/// Per-call inputs shared by every strategy.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionContext<'a> {
    pub base_url: &'a Url,
    pub max_articles: usize,
    /// Date substituted when the page shows none, `YYYY-MM-DD`.
    pub today: &'a str,
}

#[derive(Debug, PartialEq, Eq)]
pub enum StrategyOutcome {
    Matched(Vec<ArticleRecord>),
    NoMatch,
}

pub trait ExtractionStrategy: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn extract(&self, document: &Html, ctx: &ExtractionContext<'_>) -> StrategyOutcome;
}

/// Scan article containers with the first selector that matches anything.
#[derive(Clone)]
pub struct SelectorCascade {
    selectors: Vec<(String, Selector)>,
}

impl SelectorCascade {
    /// Compile `selectors`; an invalid one is reported as an unexpected failure.
    pub fn new<S: AsRef<str>>(selectors: &[S]) -> Result<Self, ScrapeError> {
        let selectors = selectors
            .iter()
            .map(|raw| {
                let raw = raw.as_ref();
                Selector::parse(raw)
                    .map(|compiled| (raw.to_string(), compiled))
                    .map_err(|e| {
                        ScrapeError::Unexpected(format!("invalid container selector {raw:?}: {e}"))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { selectors })
    }
}

impl Default for SelectorCascade {
    fn default() -> Self {
        static DEFAULT: Lazy<SelectorCascade> = Lazy::new(|| {
            SelectorCascade::new(DEFAULT_CONTAINER_SELECTORS)
                .expect("default container selectors are valid CSS")
        });
        DEFAULT.clone()
    }
}

impl fmt::Debug for SelectorCascade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectorCascade")
            .field(
                "selectors",
                &self.selectors.iter().map(|(raw, _)| raw).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl ExtractionStrategy for SelectorCascade {
    fn name(&self) -> &str {
        "selector_cascade"
    }

    fn extract(&self, document: &Html, ctx: &ExtractionContext<'_>) -> StrategyOutcome {
        for (raw, selector) in &self.selectors {
            let mut matches = document.select(selector).peekable();
            if matches.peek().is_none() {
                continue;
            }

            let mut records = Vec::new();
            for container in matches.take(ctx.max_articles) {
                if let Some(record) = fields::parse_container(container, ctx.base_url, ctx.today) {
                    records.push(record);
                    if records.len() >= ctx.max_articles {
                        break;
                    }
                }
            }
            debug!(selector = %raw, count = records.len(), "Container selector matched");
            return StrategyOutcome::Matched(records);
        }
        StrategyOutcome::NoMatch
    }
}

/// Linked `h1`-`h3` headlines, for pages without recognisable containers.
#[derive(Debug, Clone, Default)]
pub struct HeadlineFallback;

impl ExtractionStrategy for HeadlineFallback {
    fn name(&self) -> &str {
        "headline_fallback"
    }

    fn extract(&self, document: &Html, ctx: &ExtractionContext<'_>) -> StrategyOutcome {
        let mut records = Vec::new();
        if ctx.max_articles == 0 {
            return StrategyOutcome::NoMatch;
        }

        let scan_limit = ctx.max_articles.saturating_mul(2);
        for heading in document.select(&HEADLINES).take(scan_limit) {
            let Some(href) = fields::headline_anchor(heading)
                .and_then(|anchor| anchor.value().attr("href"))
                .filter(|href| !href.is_empty())
            else {
                continue;
            };

            let title = element_text(heading);
            if title.chars().count() <= MIN_HEADLINE_CHARS {
                continue;
            }

            records.push(ArticleRecord {
                title,
                url: fields::resolve_url(ctx.base_url, href),
                description: None,
                date: ctx.today.to_string(),
            });
            if records.len() >= ctx.max_articles {
                break;
            }
        }

        debug!(count = records.len(), "Headline fallback scanned");
        if records.is_empty() {
            StrategyOutcome::NoMatch
        } else {
            StrategyOutcome::Matched(records)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TODAY: &str = "2025-05-06";

    fn run(strategy: &dyn ExtractionStrategy, html: &str, max_articles: usize) -> StrategyOutcome {
        let base = Url::parse("https://news.example/ai/").unwrap();
        let doc = Html::parse_document(html);
        let ctx = ExtractionContext {
            base_url: &base,
            max_articles,
            today: TODAY,
        };
        strategy.extract(&doc, &ctx)
    }

    fn titles(outcome: StrategyOutcome) -> Vec<String> {
        match outcome {
            StrategyOutcome::Matched(records) => records.into_iter().map(|r| r.title).collect(),
            StrategyOutcome::NoMatch => panic!("expected a match"),
        }
    }

    #[test]
    fn cascade_uses_first_matching_selector_only() {
        let html = r#"<body>
            <div class="post"><h2>From post</h2></div>
            <div class="story"><h2>From story</h2></div>
        </body>"#;
        assert_eq!(titles(run(&SelectorCascade::default(), html, 10)), vec!["From post"]);
    }

    #[test]
    fn cascade_priority_prefers_article_tag() {
        let html = r#"<body>
            <div class="post"><h2>From post</h2></div>
            <article><h2>From article</h2></article>
        </body>"#;
        assert_eq!(titles(run(&SelectorCascade::default(), html, 10)), vec!["From article"]);
    }

    #[test]
    fn cascade_matches_class_substring() {
        let html = r#"<body><li class="c-latest-articles__card"><h3>Card</h3></li></body>"#;
        assert_eq!(titles(run(&SelectorCascade::default(), html, 10)), vec!["Card"]);
    }

    #[test]
    fn cascade_site_specific_card() {
        let html = r#"<body><div class="river-item"><h3>River</h3></div></body>"#;
        assert_eq!(titles(run(&SelectorCascade::default(), html, 10)), vec!["River"]);
    }

    #[test]
    fn cascade_claims_page_even_without_valid_records() {
        let html = r#"<body><article><p>no title here</p></article></body>"#;
        assert_eq!(
            run(&SelectorCascade::default(), html, 10),
            StrategyOutcome::Matched(vec![])
        );
    }

    #[test]
    fn cascade_considers_at_most_max_containers() {
        let html = r#"<body>
            <article><p>untitled</p></article>
            <article><h2>Second</h2></article>
            <article><h2>Third</h2></article>
        </body>"#;
        assert_eq!(titles(run(&SelectorCascade::default(), html, 2)), vec!["Second"]);
    }

    #[test]
    fn cascade_declines_when_nothing_matches() {
        let html = r#"<body><div><h2>Plain</h2></div></body>"#;
        assert_eq!(run(&SelectorCascade::default(), html, 10), StrategyOutcome::NoMatch);
    }

    #[test]
    fn cascade_rejects_invalid_selector() {
        let err = SelectorCascade::new(&["article", "div[[["]).unwrap_err();
        assert!(err.to_string().starts_with("Unexpected error:"));
    }

    #[test]
    fn custom_selectors_are_used() {
        let cascade = SelectorCascade::new(&[".tile"]).unwrap();
        let html = r#"<body><article><h2>Ignored</h2></article><div class="tile"><h4>Tile</h4></div></body>"#;
        assert_eq!(titles(run(&cascade, html, 10)), vec!["Tile"]);
    }

    #[test]
    fn fallback_accepts_linked_long_headlines() {
        let html = r#"<body>
            <h1>Site name</h1>
            <h2><a href="/ai/one">A fairly long headline</a></h2>
            <a href="https://other.example/two"><h3>Another long headline</h3></a>
            <h2><a href="/short">Too short</a></h2>
            <h2><a>Long headline without href</a></h2>
        </body>"#;
        match run(&HeadlineFallback, html, 10) {
            StrategyOutcome::Matched(records) => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[0].title, "A fairly long headline");
                assert_eq!(records[0].url.as_deref(), Some("https://news.example/ai/one"));
                assert_eq!(records[0].description, None);
                assert_eq!(records[0].date, TODAY);
                assert_eq!(records[1].url.as_deref(), Some("https://other.example/two"));
            }
            StrategyOutcome::NoMatch => panic!("expected headlines"),
        }
    }

    #[test]
    fn fallback_scans_at_most_twice_max_headlines() {
        let html = r#"<body>
            <h2>unlinked one</h2>
            <h2>unlinked two</h2>
            <h2><a href="/late">A late but valid headline</a></h2>
        </body>"#;
        assert_eq!(run(&HeadlineFallback, html, 1), StrategyOutcome::NoMatch);
        assert_eq!(titles(run(&HeadlineFallback, html, 2)), vec!["A late but valid headline"]);
    }

    #[test]
    fn fallback_stops_at_max() {
        let html = r#"<body>
            <h2><a href="/1">First long headline</a></h2>
            <h2><a href="/2">Second long headline</a></h2>
            <h2><a href="/3">Third long headline</a></h2>
        </body>"#;
        assert_eq!(titles(run(&HeadlineFallback, html, 2)).len(), 2);
    }

    #[test]
    fn fallback_handles_unbounded_max() {
        let html = r#"<body><h2><a href="/x">A long enough headline</a></h2></body>"#;
        assert_eq!(titles(run(&HeadlineFallback, html, usize::MAX)), vec!["A long enough headline"]);
    }
}
