//! robots.txt rendering
//!
//! Produces a single `User-agent: *` group from an ordered rule list and,
//! when a base URL is known, a `Sitemap:` line pointing at the site root.

use crate::url::{coerce_seed, origin_of};
use crate::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Whether a rule allows or disallows a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum RuleKind {
    Allow,
    Disallow,
}

impl RuleKind {
    /// Returns the directive name as written in robots.txt
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "Allow",
            Self::Disallow => "Disallow",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "disallow" => Ok(Self::Disallow),
            other => Err(ConfigError::InvalidRule(format!(
                "rule type must be 'Allow' or 'Disallow', got '{}'",
                other
            ))),
        }
    }
}

impl TryFrom<String> for RuleKind {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A single robots.txt directive
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RobotsRule {
    #[serde(rename = "type")]
    pub kind: RuleKind,
    pub path: String,
}

impl RobotsRule {
    pub fn allow(path: impl Into<String>) -> Self {
        Self {
            kind: RuleKind::Allow,
            path: path.into(),
        }
    }

    pub fn disallow(path: impl Into<String>) -> Self {
        Self {
            kind: RuleKind::Disallow,
            path: path.into(),
        }
    }
}

/// Rules used when the caller supplies none
pub fn default_rules() -> Vec<RobotsRule> {
    vec![
        RobotsRule::disallow("/admin/"),
        RobotsRule::disallow("/login/"),
    ]
}

/// Renders robots.txt content
///
/// Rules are emitted in the given order. The `Sitemap:` line is added only
/// when `base_url` can be coerced into an absolute URL; it always points at
/// `/sitemap.xml` on the base URL's origin, whatever path the base URL has.
///
/// # Example
///
/// ```
/// use sitemap_ripple::robots::{generate_robots_txt, RobotsRule};
///
/// let rules = vec![RobotsRule::disallow("/admin/")];
/// let text = generate_robots_txt(&rules, Some("example.com/blog"));
/// assert_eq!(
///     text,
///     "User-agent: *\nDisallow: /admin/\n\nSitemap: https://example.com/sitemap.xml"
/// );
/// ```
pub fn generate_robots_txt(rules: &[RobotsRule], base_url: Option<&str>) -> String {
    let mut content = String::from("User-agent: *\n");

    for rule in rules {
        content.push_str(&format!("{}: {}\n", rule.kind, rule.path));
    }

    if let Some(origin) = base_url
        .and_then(|base| coerce_seed(base).ok())
        .and_then(|url| origin_of(&url))
    {
        content.push_str(&format!("\nSitemap: {}/sitemap.xml", origin));
    }

    content
}
