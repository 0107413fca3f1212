use crate::{UrlError, UrlResult};
use url::Url;

/// Coerces user input into an absolute seed URL
///
/// Input without a scheme is assumed to be a bare host and gets `https://`
/// prepended. Input that names a scheme keeps it, and anything other than
/// `http` or `https` is rejected.
///
/// # Examples
///
/// ```
/// use sitemap_ripple::url::coerce_seed;
///
/// let seed = coerce_seed("example.com/blog").unwrap();
/// assert_eq!(seed.as_str(), "https://example.com/blog");
///
/// assert!(coerce_seed("").is_err());
/// assert!(coerce_seed("ftp://files.example.com/").is_err());
/// ```
pub fn coerce_seed(input: &str) -> UrlResult<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let candidate = if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&candidate).map_err(|e| UrlError::Parse {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    Ok(url)
}

/// Returns true if `s` starts with an explicit scheme
///
/// `name://` always counts. `name:rest` counts too unless the name holds a
/// dot or the rest starts with a digit, so `example.com:8080` and
/// `localhost:3000` stay bare hosts.
fn has_scheme(s: &str) -> bool {
    let Some((name, rest)) = s.split_once(':') else {
        return false;
    };

    let mut chars = name.chars();
    let valid_name = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid_name {
        return false;
    }

    rest.starts_with("//")
        || (!name.contains('.') && !rest.starts_with(|c: char| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_explicit_scheme() {
        let url = coerce_seed("http://example.com/").unwrap();
        assert_eq!(url.as_str(), "http://example.com/");
    }

    #[test]
    fn test_prefixes_https() {
        let url = coerce_seed("example.com").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_uppercase_scheme_accepted() {
        let url = coerce_seed("HTTPS://Example.com/a").unwrap();
        assert_eq!(url.as_str(), "https://example.com/a");
    }

    #[test]
    fn test_trims_whitespace() {
        let url = coerce_seed("  example.com/path  ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/path");
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(coerce_seed(""), Err(UrlError::Empty)));
        assert!(matches!(coerce_seed("   "), Err(UrlError::Empty)));
    }

    #[test]
    fn test_other_scheme_rejected() {
        assert!(matches!(
            coerce_seed("ftp://files.example.com/"),
            Err(UrlError::InvalidScheme(scheme)) if scheme == "ftp"
        ));
        assert!(matches!(
            coerce_seed("mailto:me@example.com"),
            Err(UrlError::InvalidScheme(scheme)) if scheme == "mailto"
        ));
        assert!(matches!(
            coerce_seed("javascript:alert(1)"),
            Err(UrlError::InvalidScheme(_))
        ));
    }

    #[test]
    fn test_host_with_port_is_not_a_scheme() {
        let url = coerce_seed("localhost:3000/docs").unwrap();
        assert_eq!(url.as_str(), "https://localhost:3000/docs");

        let url = coerce_seed("example.com:8080").unwrap();
        assert_eq!(url.as_str(), "https://example.com:8080/");
    }

    #[test]
    fn test_unparsable_rejected() {
        assert!(matches!(
            coerce_seed("exa mple.com"),
            Err(UrlError::Parse { .. })
        ));
        assert!(coerce_seed("https://").is_err());
    }
}
