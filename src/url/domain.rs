use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host, it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitemap_ripple::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the serialized origin (`scheme://host[:port]`) of a URL
///
/// Returns None for URLs with an opaque origin such as `mailto:` or `data:`.
pub fn origin_of(url: &Url) -> Option<String> {
    let origin = url.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}

/// Checks whether two URLs share scheme, host and port
///
/// Opaque origins are never considered equal, not even to themselves.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitemap_ripple::url::is_same_origin;
///
/// let seed = Url::parse("https://example.com/").unwrap();
/// let page = Url::parse("https://example.com:443/about").unwrap();
/// let other = Url::parse("http://example.com/about").unwrap();
/// assert!(is_same_origin(&seed, &page));
/// assert!(!is_same_origin(&seed, &other));
/// ```
pub fn is_same_origin(a: &Url, b: &Url) -> bool {
    let origin = a.origin();
    origin.is_tuple() && origin == b.origin()
}
