//! Per-container field heuristics.
//!
//! Given one candidate container (an `<article>`, a `.post` card, ...) these
//! functions pull out the title, link, description and date. Every lookup
//! is "first match inside the container, in document order".

use crate::extractor::pattern;
use crate::models::ArticleRecord;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use url::Url;

/// Descriptions are cut to this many characters.
pub const MAX_DESCRIPTION_CHARS: usize = 300;

macro_rules! parse_selector {
    ($s:expr) => {
        Lazy::new(|| Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s)))
    };
}

static HEADING: Lazy<Selector> = parse_selector!("h1, h2, h3, h4");
static ANCHOR: Lazy<Selector> = parse_selector!("a");
static PARAGRAPH: Lazy<Selector> = parse_selector!("p");
static TIME: Lazy<Selector> = parse_selector!("time");

/// Text content of an element with whitespace runs collapsed and ends trimmed.
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keep at most `max` characters (not bytes).
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Resolve a relative `href` against `base`.
///
/// Hrefs that already carry an `http`/`https` scheme are returned exactly as
/// the page wrote them, even when the URL parser would reject them. A
/// relative href that cannot be joined yields `None`.
pub fn resolve_url(base: &Url, href: &str) -> Option<String> {
    if has_http_scheme(href) {
        return Some(href.to_string());
    }
    base.join(href).ok().map(String::from)
}

fn has_http_scheme(href: &str) -> bool {
    let lower = href.get(..8).unwrap_or(href).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}

/// First `h1`-`h4`, else the first descendant with a title-like class.
///
/// When a heading exists but is empty the class fallback is not consulted.
pub fn extract_title(container: ElementRef<'_>) -> Option<String> {
    let title = container
        .select(&HEADING)
        .next()
        .or_else(|| pattern::TITLE.first_descendant(container))?;
    non_empty(element_text(title))
}

/// `href` of the first anchor, resolved against `base`.
pub fn extract_link(container: ElementRef<'_>, base: &Url) -> Option<String> {
    let anchor = container.select(&ANCHOR).next()?;
    let href = anchor.value().attr("href").filter(|h| !h.is_empty())?;
    resolve_url(base, href)
}

/// Teaser-class descendant, else the first paragraph.
pub fn extract_description(container: ElementRef<'_>) -> Option<String> {
    let source = pattern::DESCRIPTION
        .first_descendant(container)
        .or_else(|| container.select(&PARAGRAPH).next())?;
    non_empty(truncate_chars(
        &element_text(source),
        MAX_DESCRIPTION_CHARS,
    ))
}

/// `<time>` element, else a date-like class; text is kept verbatim.
pub fn extract_date(container: ElementRef<'_>) -> Option<String> {
    let date = container
        .select(&TIME)
        .next()
        .or_else(|| pattern::DATE.first_descendant(container))?;
    non_empty(element_text(date))
}

/// Build a record from one container, or `None` when it has no title.
pub fn parse_container(container: ElementRef<'_>, base: &Url, today: &str) -> Option<ArticleRecord> {
    let title = extract_title(container)?;
    Some(ArticleRecord {
        title,
        url: extract_link(container, base),
        description: extract_description(container),
        date: extract_date(container).unwrap_or_else(|| today.to_string()),
    })
}

/// The anchor belonging to a headline: nested inside it, else an ancestor.
pub fn headline_anchor(heading: ElementRef<'_>) -> Option<ElementRef<'_>> {
    heading.select(&ANCHOR).next().or_else(|| {
        heading
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().name() == "a")
    })
}
