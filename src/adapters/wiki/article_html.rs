//! Reduce rendered MediaWiki markup to clean prose.
//!
//! Extraction policy: only `<p>` elements that are direct children of the
//! content container count, and each must carry at least `MIN_PARAGRAPH_CHARS`
//! characters after whitespace collapsing. Stub and disambiguation pages
//! fall below that bar and are rejected.

use crate::domain::{ExtractedArticle, ExtractionError};
use reqwest::Url;
use scraper::{ElementRef, Html, Node, Selector};

/// Shorter paragraphs are dropped (captions, "Coordinates:" lines, stubs).
pub const MIN_PARAGRAPH_CHARS: usize = 30;

/// Hard cutoff on the joined content, counted in chars.
pub const MAX_CONTENT_CHARS: usize = 4000;

pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Title used when the page has no `h1#firstHeading`.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

const TITLE_SELECTOR: &str = "h1#firstHeading";

/// Content containers, most specific first.
const CONTENT_SELECTORS: [&str; 2] = [
    "div.mw-content-ltr.mw-parser-output",
    "div.mw-parser-output",
];

/// Elements whose text never reaches the output.
const STRIPPED_TAGS: [&str; 5] = ["script", "style", "sup", "table", "img"];

/// Check that `url` points at a Wikipedia article. Pure; no I/O.
pub fn validate_article_url(url: &str) -> Result<Url, ExtractionError> {
    let parsed = Url::parse(url.trim())
        .map_err(|e| ExtractionError::InvalidUrl(format!("{}: {}", url, e)))?;

    let host_ok = parsed
        .host_str()
        .is_some_and(|h| h.to_ascii_lowercase().contains("wikipedia.org"));
    if !host_ok {
        return Err(ExtractionError::InvalidUrl(format!(
            "{}: host is not wikipedia.org",
            url
        )));
    }

    let Some(name) = parsed.path().strip_prefix("/wiki/") else {
        return Err(ExtractionError::InvalidUrl(format!(
            "{}: path is not a /wiki/ article",
            url
        )));
    };
    if name.trim_matches('/').is_empty() {
        return Err(ExtractionError::InvalidUrl(format!(
            "{}: no article name after /wiki/",
            url
        )));
    }

    Ok(parsed)
}

/// Parse a fetched article page into title and prose content.
pub fn parse_article(url: &str, html: &str) -> Result<ExtractedArticle, ExtractionError> {
    let document = Html::parse_document(html);

    let title_selector = selector(TITLE_SELECTOR)?;
    let title = document
        .select(&title_selector)
        .next()
        .map(|h1| collapse_whitespace(&h1.text().collect::<String>()))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string());

    let container = find_content_container(&document)?.ok_or_else(|| {
        ExtractionError::NoContentFound(format!("{}: no article body in page", url))
    })?;

    let paragraphs: Vec<String> = container
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "p")
        .map(|p| collapse_whitespace(&visible_text(p)))
        .filter(|text| text.chars().count() >= MIN_PARAGRAPH_CHARS)
        .collect();

    if paragraphs.is_empty() {
        return Err(ExtractionError::InsufficientContent(format!(
            "{}: no paragraph with at least {} characters",
            url, MIN_PARAGRAPH_CHARS
        )));
    }

    let content = truncate_chars(&paragraphs.join(PARAGRAPH_SEPARATOR), MAX_CONTENT_CHARS);

    Ok(ExtractedArticle {
        url: url.to_string(),
        title,
        content,
    })
}

fn selector(css: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(css)
        .map_err(|e| ExtractionError::NoContentFound(format!("bad selector {}: {:?}", css, e)))
}

fn find_content_container(document: &Html) -> Result<Option<ElementRef<'_>>, ExtractionError> {
    for css in CONTENT_SELECTORS {
        let sel = selector(css)?;
        if let Some(el) = document.select(&sel).next() {
            return Ok(Some(el));
        }
    }
    Ok(None)
}

/// Text of `element` and its descendants, skipping `STRIPPED_TAGS` subtrees.
fn visible_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_text(element, &mut out);
    out
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if STRIPPED_TAGS.contains(&el.name()) => {}
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
