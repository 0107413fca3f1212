//! Sitemap-Ripple: a same-origin sitemap generator
//!
//! This crate crawls a single website breadth-first up to a bounded depth,
//! collects page URLs and their `Last-Modified` metadata, and renders a
//! sitemap XML document together with a companion robots.txt.

pub mod config;
pub mod crawler;
pub mod output;
pub mod robots;
pub mod state;
pub mod url;

use thiserror::Error;

/// Message surfaced when a crawl finishes without recording a single page
pub const EMPTY_CRAWL_HINT: &str = "Could not crawl the website. This is likely due to CORS policy \
     restrictions or network errors blocking every request.";

/// Main error type for Sitemap-Ripple operations
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] UrlError),

    #[error("Invalid crawl depth {depth}: must be between 0 and {limit}")]
    InvalidDepth { depth: u32, limit: u32 },

    #[error("{}", EMPTY_CRAWL_HINT)]
    EmptyCrawl,

    #[error("Crawl session {generation} was superseded by a newer run")]
    Superseded { generation: u64 },

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlStatus,
        to: state::CrawlStatus,
    },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid robots.txt rule: {0}")]
    InvalidRule(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("URL is empty")]
    Empty,

    #[error("Failed to parse URL '{url}': {reason}")]
    Parse { url: String, reason: String },

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for Sitemap-Ripple operations
pub type Result<T> = std::result::Result<T, SitemapError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlEvent, CrawlOutcome, Crawler, HttpFetcher, PageFetcher};
pub use output::{generate_sitemap_xml, CrawledPage};
pub use robots::{generate_robots_txt, RobotsRule, RuleKind};
pub use state::CrawlStatus;
pub use crate::url::{coerce_seed, is_same_origin, normalize_url};
