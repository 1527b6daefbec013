use crate::config::compile_selector;
use crate::{ConfigError, ElementNotFound, Lookup};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A compiled CSS selector that remembers its source text
#[derive(Debug, Clone)]
pub struct NamedSelector {
    source: String,
    selector: Selector,
}

impl NamedSelector {
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            source: source.to_string(),
            selector: compile_selector(source)?,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// First match below `scope`
    pub fn first_in<'a>(&self, scope: ElementRef<'a>) -> Lookup<ElementRef<'a>> {
        scope
            .select(&self.selector)
            .next()
            .ok_or_else(|| self.miss())
    }

    /// All matches below `scope`, in document order
    pub fn all_in<'a>(&'a self, scope: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        scope.select(&self.selector)
    }

    pub fn miss(&self) -> ElementNotFound {
        ElementNotFound::new(self.source.clone())
    }
}

/// A parsed page together with the address it was loaded from
pub struct Document {
    url: Url,
    html: Html,
}

impl Document {
    pub fn parse(url: &Url, body: &str) -> Self {
        Self {
            url: url.clone(),
            html: Html::parse_document(body),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    /// First element matching the selector, or a miss naming the selector
    pub fn first(&self, selector: &NamedSelector) -> Lookup<ElementRef<'_>> {
        self.html
            .select(selector.selector())
            .next()
            .ok_or_else(|| selector.miss())
    }

    /// Every element matching the selector, in document order
    pub fn all<'a>(&'a self, selector: &'a NamedSelector) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.html.select(selector.selector())
    }

    /// Resolves an attribute value (href, src) against the page address
    pub fn resolve(&self, reference: &str) -> Option<Url> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }
        self.url.join(reference).ok()
    }
}

/// Visible text of an element with runs of whitespace collapsed
pub fn element_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(body: &str) -> Document {
        Document::parse(&Url::parse("https://en.wikipedia.org/wiki/Page").unwrap(), body)
    }

    #[test]
    fn test_first_reports_selector_on_miss() {
        let doc = document("<html><body><p>text</p></body></html>");
        let selector = NamedSelector::parse("#firstHeading").unwrap();

        let miss = doc.first(&selector).unwrap_err();
        assert_eq!(miss.selector, "#firstHeading");
    }

    #[test]
    fn test_all_in_document_order() {
        let doc = document("<ul><li>one</li><li>two</li><li>three</li></ul>");
        let selector = NamedSelector::parse("li").unwrap();

        let texts: Vec<_> = doc.all(&selector).map(element_text).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_element_text_collapses_whitespace() {
        let doc = document("<p>  Rust \n is <b>a</b>\tlanguage </p>");
        let selector = NamedSelector::parse("p").unwrap();

        assert_eq!(element_text(doc.first(&selector).unwrap()), "Rust is a language");
    }

    #[test]
    fn test_element_text_keeps_inline_words_whole() {
        let doc = document("<p>Wiki<b>pedia</b> article</p>");
        let selector = NamedSelector::parse("p").unwrap();

        assert_eq!(element_text(doc.first(&selector).unwrap()), "Wikipedia article");
    }

    #[test]
    fn test_resolve_relative_and_protocol_relative() {
        let doc = document("");
        assert_eq!(
            doc.resolve("/wiki/Other").unwrap().as_str(),
            "https://en.wikipedia.org/wiki/Other"
        );
        assert_eq!(
            doc.resolve("//upload.wikimedia.org/a.png").unwrap().as_str(),
            "https://upload.wikimedia.org/a.png"
        );
        assert!(doc.resolve("   ").is_none());
    }

    #[test]
    fn test_scoped_lookup() {
        let doc = document(r#"<div id="zone"><a href="/wiki/A">A</a></div><a href="/wiki/B">B</a>"#);
        let zone = NamedSelector::parse("#zone").unwrap();
        let anchor = NamedSelector::parse("a").unwrap();

        let scope = doc.first(&zone).unwrap();
        let links: Vec<_> = anchor.all_in(scope).map(element_text).collect();
        assert_eq!(links, vec!["A"]);
        assert_eq!(element_text(anchor.first_in(scope).unwrap()), "A");
    }
}
