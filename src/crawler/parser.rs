//! HTML parser for extracting readable text and anchors
//!
//! This module handles parsing HTML content to extract:
//! - Visible plain text (scripts, styles and noscript blocks removed)
//! - Anchor links with their text or `title` attribute

use scraper::{Html, Selector};
use url::Url;

/// Elements whose text content is never part of the readable page
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript"];

/// A link found in an anchor element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLink {
    /// The href resolved against the page URL
    pub url: Url,

    /// Anchor text, or the `title` attribute when the text is empty
    pub text: Option<String>,
}

/// Extracts the readable text of an HTML document
///
/// Text inside `<script>`, `<style>` and `<noscript>` is dropped and all runs
/// of whitespace collapse to a single space.
///
/// # Example
///
/// ```
/// use sitesweep::crawler::extract_text;
///
/// let html = "<html><head><style>p { color: red }</style></head><body><p>Hello\n  world</p></body></html>";
/// assert_eq!(extract_text(html), "Hello world");
/// ```
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let pieces: Vec<&str> = document
        .root_element()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .map_or(false, |el| HIDDEN_ELEMENTS.contains(&el.name()))
            });
            (!hidden).then_some(&**text)
        })
        .collect();

    collapse_whitespace(&pieces.join(" "))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts all followable anchors from an HTML document
///
/// # Link Extraction Rules
///
/// **Skipped hrefs:**
/// - empty
/// - `javascript:` and `mailto:` links
/// - fragment-only links (`#section`)
/// - hrefs that cannot be resolved against `base_url`
///
/// Anchor text is whitespace-collapsed; when empty, the `title` attribute is
/// used instead. `text` is `None` when both are empty.
///
/// # Example
///
/// ```
/// use sitesweep::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<a href="/about">About</a><a href="mailto:a@x.edu">Mail</a>"#;
/// let base = Url::parse("https://x.edu/").unwrap();
/// let links = extract_links(html, &base);
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].url.as_str(), "https://x.edu/about");
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<RawLink> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(url) = resolve_href(href, base_url) else {
            continue;
        };

        let text = Some(collapse_whitespace(&element.text().collect::<String>()))
            .filter(|t| !t.is_empty())
            .or_else(|| {
                element
                    .value()
                    .attr("title")
                    .map(collapse_whitespace)
                    .filter(|t| !t.is_empty())
            });

        links.push(RawLink { url, text });
    }

    links
}

/// Resolves an href against the page URL
///
/// Returns None for hrefs that should not be followed.
fn resolve_href(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
    {
        return None;
    }

    base_url.join(href).ok()
}
