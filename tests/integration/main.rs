//! Integration tests for Sitemap-Ripple
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! full crawl-to-artifact cycle end-to-end.

mod crawl_tests;
mod output_tests;
