use url::Url;

/// Normalizes a URL into the canonical form used for deduplication
///
/// # Normalization Steps
///
/// 1. Parse the URL; malformed input falls through to step 4
/// 2. Keep scheme, host and non-default port (the serialized origin)
/// 3. Append the path, dropping query string and fragment
/// 4. Remove a single trailing slash
///
/// The root path therefore disappears entirely: `https://example.com/`
/// normalizes to `https://example.com`. URLs without a tuple origin
/// (`data:`, `mailto:`, ...) are handled like malformed input.
///
/// This function never fails.
///
/// # Examples
///
/// ```
/// use sitemap_ripple::url::normalize_url;
///
/// assert_eq!(normalize_url("https://example.com/docs/?page=2#top"), "https://example.com/docs");
/// assert_eq!(normalize_url("not a url/"), "not a url");
/// ```
pub fn normalize_url(url_str: &str) -> String {
    match Url::parse(url_str) {
        Ok(url) if url.origin().is_tuple() => {
            let origin = url.origin().ascii_serialization();
            format!("{}{}", origin, strip_trailing_slash(url.path()))
        }
        _ => strip_trailing_slash(url_str).to_string(),
    }
}

fn strip_trailing_slash(s: &str) -> &str {
    s.strip_suffix('/').unwrap_or(s)
}
