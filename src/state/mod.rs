//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlStatus`: The lifecycle of a single crawl session
//!   (idle, crawling, generating, done, error)

mod crawl_status;

// Re-export main types
pub use crawl_status::CrawlStatus;
