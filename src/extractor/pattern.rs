//! Declarative class-name predicates.
//!
//! News templates label their teaser, headline and date nodes with class
//! names like `card__headline` or `post-excerpt`. A [`ClassPattern`] matches
//! an element when any one of its classes contains the pattern,
//! case-insensitively.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use scraper::ElementRef;

/// Case-insensitive regex tested against each class of an element.
#[derive(Debug, Clone)]
pub struct ClassPattern {
    regex: Regex,
}

impl ClassPattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { regex })
    }

    /// Elements without a `class` attribute never match.
    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        element
            .value()
            .classes()
            .any(|class| self.regex.is_match(class))
    }

    /// First descendant of `scope` (in document order, excluding `scope`
    /// itself) whose class matches.
    pub fn first_descendant<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        scope
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|element| self.matches(element))
    }
}

macro_rules! class_pattern {
    ($s:expr) => {
        Lazy::new(|| ClassPattern::new($s).expect(concat!("Invalid class pattern: ", $s)))
    };
}

pub static TITLE: Lazy<ClassPattern> = class_pattern!("title|headline");
pub static DESCRIPTION: Lazy<ClassPattern> = class_pattern!("desc|summary|excerpt|teaser");
pub static DATE: Lazy<ClassPattern> = class_pattern!("date|time|published");

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn root(doc: &Html) -> ElementRef<'_> {
        let sel = Selector::parse("#root").unwrap();
        doc.select(&sel).next().unwrap()
    }

    #[test]
    fn matches_any_class_case_insensitively() {
        let doc = Html::parse_fragment(
            r#"<div id="root"><span class="meta Card__HeadLine big">x</span></div>"#,
        );
        let span = TITLE.first_descendant(root(&doc)).unwrap();
        assert_eq!(span.value().name(), "span");
        assert!(TITLE.matches(&span));
        assert!(!DATE.matches(&span));
    }

    #[test]
    fn elements_without_class_do_not_match() {
        let doc = Html::parse_fragment(r#"<div id="root"><p>summary</p></div>"#);
        assert!(DESCRIPTION.first_descendant(root(&doc)).is_none());
    }

    #[test]
    fn scope_itself_is_not_a_candidate() {
        let doc = Html::parse_fragment(
            r#"<div id="root" class="post-summary"><p class="body">x</p></div>"#,
        );
        assert!(DESCRIPTION.first_descendant(root(&doc)).is_none());
    }

    #[test]
    fn first_match_is_in_document_order() {
        let doc = Html::parse_fragment(
            r#"<div id="root">
                <div><span class="pub-date">outer</span></div>
                <time class="timestamp">second</time>
            </div>"#,
        );
        let found = DATE.first_descendant(root(&doc)).unwrap();
        assert_eq!(found.text().collect::<String>(), "outer");
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(ClassPattern::new("(unclosed").is_err());
    }
}
