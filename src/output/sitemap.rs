//! Sitemap XML generation
//!
//! Renders crawled pages into a document following the sitemaps.org 0.9
//! protocol.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Namespace declared on the `<urlset>` root
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const HOMEPAGE_PRIORITY: &str = "0.8";
const PAGE_PRIORITY: &str = "0.6";
const CHANGE_FREQ: &str = "weekly";

/// A page that made it into the sitemap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawledPage {
    /// Normalized page URL
    pub url: String,

    /// Raw `Last-Modified` value reported by the server
    pub last_mod: Option<String>,

    /// True for the page whose normalized URL matches the seed
    pub is_homepage: bool,
}

/// Generates the sitemap XML document for the given pages
///
/// Pages are emitted in input order. Each `<url>` block carries the escaped
/// location, a `<lastmod>` date when the recorded timestamp can be parsed,
/// a fixed weekly change frequency and a priority of 0.8 for the homepage
/// or 0.6 for every other page.
///
/// # Example
///
/// ```
/// use sitemap_ripple::output::{generate_sitemap_xml, CrawledPage};
///
/// let xml = generate_sitemap_xml(&[CrawledPage {
///     url: "https://a.com".to_string(),
///     last_mod: None,
///     is_homepage: true,
/// }]);
/// assert!(xml.contains("<loc>https://a.com</loc>"));
/// assert!(xml.contains("<priority>0.8</priority>"));
/// ```
pub fn generate_sitemap_xml(pages: &[CrawledPage]) -> String {
    let urls: String = pages.iter().map(render_url_block).collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"{}\">{}\n</urlset>",
        SITEMAP_NAMESPACE, urls
    )
}

fn render_url_block(page: &CrawledPage) -> String {
    let lastmod_tag = page
        .last_mod
        .as_deref()
        .and_then(format_lastmod)
        .map(|date| format!("\n    <lastmod>{}</lastmod>", date))
        .unwrap_or_default();

    let priority = if page.is_homepage {
        HOMEPAGE_PRIORITY
    } else {
        PAGE_PRIORITY
    };

    format!(
        "\n  <url>\n    <loc>{}</loc>{}\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>",
        escape_xml(&page.url),
        lastmod_tag,
        CHANGE_FREQ,
        priority
    )
}

/// Escapes the five XML special characters and nothing else
pub fn escape_xml(unsafe_text: &str) -> String {
    let mut escaped = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Converts a recorded timestamp into a `YYYY-MM-DD` UTC date
///
/// Accepts HTTP dates (RFC 2822 style and asctime), RFC 3339 timestamps and
/// plain ISO dates. Returns None when nothing matches.
pub fn format_lastmod(raw: &str) -> Option<String> {
    let raw = raw.trim();

    let parsed: Option<DateTime<Utc>> = DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%a %b %e %H:%M:%S %Y")
                .ok()
                .map(|naive| naive.and_utc())
        });

    if let Some(dt) = parsed {
        return Some(dt.format("%Y-%m-%d").to_string());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.format("%Y-%m-%d").to_string())
}
