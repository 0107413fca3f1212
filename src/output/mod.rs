//! Output module for rendering crawl results
//!
//! This module handles:
//! - Rendering the sitemap XML document
//! - Packaging sitemap.xml and robots.txt as artifacts
//! - Writing artifacts to disk

mod artifact;
mod sitemap;

pub use artifact::{
    write_artifact, Artifact, ROBOTS_FILE_NAME, ROBOTS_MIME_TYPE, SITEMAP_FILE_NAME,
    SITEMAP_MIME_TYPE,
};
pub use sitemap::{
    escape_xml, format_lastmod, generate_sitemap_xml, CrawledPage, SITEMAP_NAMESPACE,
};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
