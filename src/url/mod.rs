//! URL handling module for Sitemap-Ripple
//!
//! This module provides seed coercion, URL normalization for deduplication,
//! and the same-origin boundary used by the crawler.

mod domain;
mod normalize;
mod seed;

// Re-export main functions
pub use domain::{extract_domain, is_same_origin, origin_of};
pub use normalize::normalize_url;
pub use seed::coerce_seed;
