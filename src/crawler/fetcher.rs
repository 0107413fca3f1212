//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the configured user agent and timeouts
//! - GET requests with redirect following
//! - Reading the body only when the crawler will extract links from it
//! - Error classification
//!
//! The crawler talks to the network through the [`PageFetcher`] trait so
//! that traversal logic can be exercised against in-memory sites.

use crate::config::Config;
use async_trait::async_trait;
use reqwest::header::{HeaderName, CONTENT_TYPE, LAST_MODIFIED};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;
use url::Url;

const MAX_REDIRECTS: usize = 10;

/// What the crawler needs to know about a fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedPage {
    /// HTTP status code of the final response
    pub status: u16,

    /// Content-Type header value
    pub content_type: Option<String>,

    /// Last-Modified header value
    pub last_modified: Option<String>,

    /// Page body, present only when requested and the page is HTML
    pub body: Option<String>,
}

impl FetchedPage {
    /// Returns true for 2xx responses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true if the Content-Type announces HTML
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .map(is_html_content_type)
            .unwrap_or(false)
    }
}

/// Per-page fetch failure
///
/// These never abort a crawl; the page is skipped and traversal continues.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("Too many redirects from {url}")]
    RedirectLimit { url: String },

    #[error("Request failed for {url}: {message}")]
    Request { url: String, message: String },
}

impl FetchError {
    fn from_reqwest(url: &Url, e: reqwest::Error) -> Self {
        let url = url.to_string();
        if e.is_timeout() {
            FetchError::Timeout { url }
        } else if e.is_connect() {
            FetchError::Connect {
                url,
                message: e.to_string(),
            }
        } else if e.is_redirect() {
            FetchError::RedirectLimit { url }
        } else {
            FetchError::Request {
                url,
                message: e.to_string(),
            }
        }
    }
}

/// Network capability used by the crawler
///
/// Implementations follow redirects and report the final response's
/// status and headers. `read_body` tells the fetcher whether the crawler
/// will look for links on the page; when false the body can be skipped.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url, read_body: bool) -> Result<FetchedPage, FetchError>;
}

/// Returns true if a Content-Type value indicates an HTML document
pub fn is_html_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("text/html")
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use sitemap_ripple::config::Config;
/// use sitemap_ripple::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(Duration::from_secs(config.crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`PageFetcher`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the fetcher and its client from configuration
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url, read_body: bool) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        if response.url() != url {
            tracing::debug!("{} redirected to {}", url, response.url());
        }

        let mut page = {
            let header = |name: HeaderName| {
                response
                    .headers()
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            };

            FetchedPage {
                status: response.status().as_u16(),
                content_type: header(CONTENT_TYPE),
                last_modified: header(LAST_MODIFIED),
                body: None,
            }
        };

        if read_body && page.is_success() && page.is_html() {
            // A body that cannot be read still counts as a fetched page
            match response.text().await {
                Ok(body) => page.body = Some(body),
                Err(e) => tracing::warn!("Failed to read body of {}: {}", url, e),
            }
        }

        Ok(page)
    }
}
