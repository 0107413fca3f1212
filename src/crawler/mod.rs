//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageFetcher` capability
//! - HTML parsing and link extraction
//! - Per-run session state (visited set, FIFO frontier, results)
//! - Overall crawl coordination and progress events

mod coordinator;
mod events;
mod fetcher;
mod parser;
mod session;

pub use coordinator::{CrawlOutcome, Crawler};
pub use events::{CrawlEvent, EventSink};
pub use fetcher::{
    build_http_client, is_html_content_type, FetchError, FetchedPage, HttpFetcher, PageFetcher,
};
pub use parser::{extract_hrefs, resolve_link, LinkSkip};
pub use session::{CrawlSession, CrawlStats, CrawlTask, PageResult};

use crate::config::Config;

/// Runs a complete crawl over HTTP
///
/// This is the main entry point for callers that do not need progress
/// events. It will:
/// 1. Build the HTTP client from the configuration
/// 2. Crawl breadth-first from the seed
/// 3. Render the sitemap of every recorded page
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seed` - Start URL
/// * `max_depth` - Link hops to follow from the seed
pub async fn crawl(config: &Config, seed: &str, max_depth: u32) -> crate::Result<CrawlOutcome> {
    Crawler::from_config(config)?.run(seed, max_depth).await
}
