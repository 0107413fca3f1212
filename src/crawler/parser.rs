//! HTML parser for extracting links
//!
//! Link handling is split in two steps: [`extract_hrefs`] collects the raw
//! `href` values of every anchor, and [`resolve_link`] turns one of them
//! into an absolute URL or explains why it was dropped.

use scraper::{Html, Selector};
use std::fmt;
use url::Url;

/// Reason a discovered href was not followed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkSkip {
    Empty,
    Fragment,
    Mailto,
    Tel,
    Unresolvable,
}

impl fmt::Display for LinkSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Empty => "empty href",
            Self::Fragment => "fragment-only href",
            Self::Mailto => "mailto link",
            Self::Tel => "tel link",
            Self::Unresolvable => "unresolvable href",
        };
        f.write_str(reason)
    }
}

/// Returns the `href` value of every `<a>` element, in document order
///
/// # Example
///
/// ```
/// use sitemap_ripple::crawler::extract_hrefs;
///
/// let html = r#"<html><body><a href="/page">Link</a><a>No href</a></body></html>"#;
/// assert_eq!(extract_hrefs(html), vec!["/page".to_string()]);
/// ```
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Resolves an href against the page it was found on
///
/// Empty, fragment-only (`#...`), `mailto:` and `tel:` hrefs are skipped.
/// Other hrefs are joined onto `base_url`; failures are reported as
/// [`LinkSkip::Unresolvable`]. Origin filtering is left to the caller.
pub fn resolve_link(href: &str, base_url: &Url) -> Result<Url, LinkSkip> {
    let href = href.trim();

    if href.is_empty() {
        return Err(LinkSkip::Empty);
    }
    if href.starts_with('#') {
        return Err(LinkSkip::Fragment);
    }
    if href.starts_with("mailto:") {
        return Err(LinkSkip::Mailto);
    }
    if href.starts_with("tel:") {
        return Err(LinkSkip::Tel);
    }

    base_url.join(href).map_err(|_| LinkSkip::Unresolvable)
}
