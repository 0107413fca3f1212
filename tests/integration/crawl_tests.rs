//! Crawl tests against mock HTTP servers

use sitemap_ripple::config::{Config, CrawlerConfig, UserAgentConfig};
use sitemap_ripple::crawler::{crawl, CrawlEvent, Crawler};
use sitemap_ripple::{CrawlStatus, SitemapError};
use tokio::sync::mpsc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with a short timeout and a known user agent
fn create_test_config() -> Config {
    Config {
        crawler: CrawlerConfig {
            max_depth: 2,
            max_depth_limit: 5,
            request_timeout_secs: 5,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: None,
        },
        ..Default::default()
    }
}

fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into(), "text/html")
}

async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_three_pages() {
    let server = MockServer::start().await;
    let external = MockServer::start().await;
    let base_url = server.uri();

    // The external site must never be contacted
    Mock::given(method("GET"))
        .respond_with(html("<p>external</p>"))
        .expect(0)
        .mount(&external)
        .await;

    mount_page(
        &server,
        "/",
        html(format!(
            r#"<html><head><title>Home</title></head><body>
            <a href="/about">About</a>
            <a href="{}/blog/">Blog</a>
            <a href="{}/elsewhere">External</a>
            <a href="mailto:owner@example.com">Mail</a>
            </body></html>"#,
            base_url,
            external.uri()
        )),
    )
    .await;
    mount_page(
        &server,
        "/about",
        html(r#"<html><body><a href="/">Home</a><a href="blog">Blog</a></body></html>"#),
    )
    .await;
    mount_page(
        &server,
        "/blog/",
        html(r#"<html><body><a href="../about#team">Team</a></body></html>"#),
    )
    .await;

    let outcome = crawl(&create_test_config(), &base_url, 2)
        .await
        .expect("Crawl failed");

    let urls: Vec<&str> = outcome.pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            base_url.clone(),
            format!("{}/about", base_url),
            format!("{}/blog", base_url),
        ]
    );

    let homepages: Vec<_> = outcome.pages.iter().filter(|p| p.is_homepage).collect();
    assert_eq!(homepages.len(), 1);
    assert_eq!(homepages[0].url, base_url);

    assert!(outcome.sitemap_xml.contains("<priority>0.8</priority>"));
    assert_eq!(outcome.sitemap_xml.matches("<priority>0.6</priority>").count(), 2);
    assert!(!outcome.sitemap_xml.contains("mailto:"));
    assert!(!outcome.sitemap_xml.contains("/elsewhere"));
}

#[tokio::test]
async fn test_shared_page_fetched_once() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        html(r#"<a href="/a">A</a><a href="/b">B</a><a href="/shared">S</a>"#),
    )
    .await;
    mount_page(&server, "/a", html(r#"<a href="/shared/">S</a>"#)).await;
    mount_page(&server, "/b", html(r#"<a href="/shared?from=b">S</a>"#)).await;

    Mock::given(method("GET"))
        .and(path("/shared"))
        .respond_with(html("<p>shared</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = crawl(&create_test_config(), &server.uri(), 3)
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.pages.len(), 4);
}

#[tokio::test]
async fn test_non_html_excluded() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        html(r#"<a href="/report.pdf">Report</a><a href="/page">Page</a>"#),
    )
    .await;
    mount_page(
        &server,
        "/report.pdf",
        ResponseTemplate::new(200).set_body_raw(b"%PDF-1.4".to_vec(), "application/pdf"),
    )
    .await;
    mount_page(&server, "/page", html("<p>page</p>")).await;

    let outcome = crawl(&create_test_config(), &server.uri(), 1)
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.pages.len(), 2);
    assert!(!outcome.sitemap_xml.contains("report.pdf"));
    assert_eq!(outcome.stats.skipped_content_type, 1);
}

#[tokio::test]
async fn test_last_modified_becomes_lastmod() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        html("<p>home</p>").insert_header("last-modified", "Wed, 21 Oct 2015 07:28:00 GMT"),
    )
    .await;

    let outcome = crawl(&create_test_config(), &server.uri(), 0)
        .await
        .expect("Crawl failed");

    assert_eq!(
        outcome.pages[0].last_mod.as_deref(),
        Some("Wed, 21 Oct 2015 07:28:00 GMT")
    );
    assert!(outcome.sitemap_xml.contains("<lastmod>2015-10-21</lastmod>"));
}

#[tokio::test]
async fn test_redirect_recorded_under_requested_url() {
    let server = MockServer::start().await;

    mount_page(&server, "/", html(r#"<a href="/old">Old</a>"#)).await;
    mount_page(
        &server,
        "/old",
        ResponseTemplate::new(301).insert_header("location", "/new"),
    )
    .await;
    mount_page(&server, "/new", html("<p>moved</p>")).await;

    let outcome = crawl(&create_test_config(), &server.uri(), 1)
        .await
        .expect("Crawl failed");

    let urls: Vec<&str> = outcome.pages.iter().map(|p| p.url.as_str()).collect();
    let old = format!("{}/old", server.uri());
    let new = format!("{}/new", server.uri());
    assert!(urls.contains(&old.as_str()));
    assert!(!urls.contains(&new.as_str()));
}

#[tokio::test]
async fn test_user_agent_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "TestBot/1.0"))
        .respond_with(html("<p>home</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = crawl(&create_test_config(), &server.uri(), 0).await;
    assert!(outcome.is_ok());
}

#[tokio::test]
async fn test_unreachable_seed_reports_empty_crawl() {
    // No mocks mounted: every request gets a 404
    let server = MockServer::start().await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let crawler = Crawler::from_config(&create_test_config())
        .expect("Failed to build crawler")
        .with_events(tx);

    let result = crawler.run(&server.uri(), 2).await;
    drop(crawler);

    assert!(matches!(result, Err(SitemapError::EmptyCrawl)));

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }

    assert!(events.contains(&CrawlEvent::Status(CrawlStatus::Error)));
    assert!(!events.contains(&CrawlEvent::Status(CrawlStatus::Done)));
    assert!(events
        .iter()
        .any(|e| matches!(e, CrawlEvent::Failed { message } if message.contains("CORS"))));
    assert!(!events
        .iter()
        .any(|e| matches!(e, CrawlEvent::Finished { .. })));
}

#[tokio::test]
async fn test_depth_limit_enforced() {
    let result = crawl(&create_test_config(), "https://example.com/", 6).await;
    assert!(matches!(
        result,
        Err(SitemapError::InvalidDepth { depth: 6, limit: 5 })
    ));
}
