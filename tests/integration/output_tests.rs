//! Artifact tests: rendered files as a consumer would read them

use robotstxt::DefaultMatcher;
use sitemap_ripple::output::{generate_sitemap_xml, write_artifact, Artifact, CrawledPage};
use sitemap_ripple::robots::{default_rules, generate_robots_txt, RobotsRule};
use tempfile::TempDir;

fn allowed(robots: &str, url: &str) -> bool {
    let mut matcher = DefaultMatcher::default();
    matcher.one_agent_allowed_by_robots(robots, "SomeBot", url)
}

#[test]
fn test_default_rules_block_admin_and_login() {
    let robots = generate_robots_txt(&default_rules(), Some("example.com"));

    assert!(!allowed(&robots, "https://example.com/admin/users"));
    assert!(!allowed(&robots, "https://example.com/login/"));
    assert!(allowed(&robots, "https://example.com/blog/post"));
    assert!(robots.ends_with("Sitemap: https://example.com/sitemap.xml"));
}

#[test]
fn test_allow_overrides_broader_disallow() {
    let rules = vec![
        RobotsRule::disallow("/private/"),
        RobotsRule::allow("/private/press-kit"),
    ];
    let robots = generate_robots_txt(&rules, None);

    assert!(!allowed(&robots, "https://example.com/private/notes"));
    assert!(allowed(&robots, "https://example.com/private/press-kit"));
}

#[test]
fn test_escaped_loc_has_no_raw_specials() {
    let xml = generate_sitemap_xml(&[CrawledPage {
        url: r#"https://a.com/search?q="rust"&page=2"#.to_string(),
        last_mod: None,
        is_homepage: false,
    }]);

    let start = xml.find("<loc>").unwrap() + "<loc>".len();
    let end = xml.find("</loc>").unwrap();
    let loc = &xml[start..end];

    assert_eq!(loc, "https://a.com/search?q=&quot;rust&quot;&amp;page=2");
    assert!(!loc.contains('"'));
    assert_eq!(
        loc.matches('&').count(),
        loc.matches("&amp;").count() + loc.matches("&quot;").count()
    );
}

#[test]
fn test_write_both_artifacts() {
    let tmp = TempDir::new().unwrap();

    let sitemap = Artifact::sitemap(generate_sitemap_xml(&[CrawledPage {
        url: "https://a.com".to_string(),
        last_mod: None,
        is_homepage: true,
    }]));
    let robots = Artifact::robots(generate_robots_txt(&default_rules(), Some("https://a.com")));

    let sitemap_path = write_artifact(tmp.path(), &sitemap).unwrap();
    let robots_path = write_artifact(tmp.path(), &robots).unwrap();

    assert_eq!(sitemap_path.file_name().unwrap(), "sitemap.xml");
    assert_eq!(robots_path.file_name().unwrap(), "robots.txt");

    let written = std::fs::read_to_string(sitemap_path).unwrap();
    assert!(written.contains("<loc>https://a.com</loc>"));
    assert!(std::fs::read_to_string(robots_path)
        .unwrap()
        .starts_with("User-agent: *\n"));
}
