//! Sitemap-Ripple main entry point
//!
//! This is the command-line interface for the Sitemap-Ripple sitemap generator.

use clap::Parser;
use sitemap_ripple::config::{load_config_with_hash, validate_rule_path, Config};
use sitemap_ripple::crawler::{CrawlEvent, Crawler};
use sitemap_ripple::output::{write_artifact, Artifact};
use sitemap_ripple::robots::{default_rules, generate_robots_txt, RobotsRule};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Sitemap-Ripple: a same-origin sitemap generator
///
/// Crawls a website breadth-first from a seed URL, staying on the seed's
/// origin, and writes sitemap.xml and robots.txt for it.
#[derive(Parser, Debug)]
#[command(name = "sitemap-ripple")]
#[command(version)]
#[command(about = "A same-origin sitemap generator", long_about = None)]
struct Cli {
    /// Website to crawl (https:// is assumed when no scheme is given)
    #[arg(value_name = "URL")]
    url: String,

    /// Link hops to follow from the seed (defaults to the configured max-depth)
    #[arg(short, long)]
    depth: Option<u32>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory receiving sitemap.xml and robots.txt
    #[arg(short, long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Add an `Allow:` rule to robots.txt
    #[arg(long, value_name = "PATH")]
    allow: Vec<String>,

    /// Add a `Disallow:` rule to robots.txt
    #[arg(long, value_name = "PATH")]
    disallow: Vec<String>,

    /// Do not write robots.txt
    #[arg(long)]
    no_robots: bool,

    /// Show the resolved settings and robots.txt without crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    let depth = cli.depth.unwrap_or(config.crawler.max_depth);
    let out_dir = cli
        .out_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.directory));
    let rules = collect_rules(&cli, &config)?;

    if cli.dry_run {
        handle_dry_run(&cli, &config, depth, &out_dir, &rules);
        return Ok(());
    }

    handle_crawl(&cli, &config, depth, &out_dir, &rules).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemap_ripple=info,warn"),
            1 => EnvFilter::new("sitemap_ripple=debug,info"),
            2 => EnvFilter::new("sitemap_ripple=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Merges configured rules with command-line rules
///
/// Falls back to the default rule list when neither source has any.
fn collect_rules(cli: &Cli, config: &Config) -> Result<Vec<RobotsRule>, Box<dyn std::error::Error>> {
    let mut rules = config.robots.rules.clone();

    for path in &cli.allow {
        validate_rule_path(path)?;
        rules.push(RobotsRule::allow(path.as_str()));
    }
    for path in &cli.disallow {
        validate_rule_path(path)?;
        rules.push(RobotsRule::disallow(path.as_str()));
    }

    if rules.is_empty() {
        rules = default_rules();
    }

    Ok(rules)
}

/// Handles the --dry-run mode: shows what would be crawled and written
fn handle_dry_run(cli: &Cli, config: &Config, depth: u32, out_dir: &Path, rules: &[RobotsRule]) {
    println!("=== Sitemap-Ripple Dry Run ===\n");

    println!("Seed: {}", cli.url);
    println!("Max depth: {} (limit {})", depth, config.crawler.max_depth_limit);
    println!("Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("User agent: {}", config.user_agent.header_value());
    println!("Output directory: {}", out_dir.display());

    if cli.no_robots {
        println!("\nrobots.txt: disabled");
    } else {
        println!("\nrobots.txt:\n{}", generate_robots_txt(rules, Some(&cli.url)));
    }
}

/// Handles the main crawl operation
async fn handle_crawl(
    cli: &Cli,
    config: &Config,
    depth: u32,
    out_dir: &Path,
    rules: &[RobotsRule],
) -> Result<(), Box<dyn std::error::Error>> {
    let (tx, rx) = mpsc::unbounded_channel();
    let reporter = tokio::spawn(report_progress(rx));

    let crawler = Crawler::from_config(config)?.with_events(tx);
    let result = crawler.run(&cli.url, depth).await;

    // Closing the channel lets the reporter finish
    drop(crawler);
    if let Err(e) = reporter.await {
        tracing::warn!("Progress reporter stopped abnormally: {}", e);
    }

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let sitemap_path = write_artifact(out_dir, &outcome.sitemap_artifact())?;
    println!(
        "✓ Sitemap with {} pages written to: {}",
        outcome.pages.len(),
        sitemap_path.display()
    );

    if !cli.no_robots {
        let robots = Artifact::robots(generate_robots_txt(rules, Some(outcome.seed.as_str())));
        let robots_path = write_artifact(out_dir, &robots)?;
        println!("✓ robots.txt written to: {}", robots_path.display());
    }

    Ok(())
}

/// Presentation layer: turns crawl events into log lines
async fn report_progress(mut rx: mpsc::UnboundedReceiver<CrawlEvent>) {
    while let Some(event) = rx.recv().await {
        match event {
            CrawlEvent::Status(status) if status.is_terminal() => {
                tracing::info!("Crawl ended with status: {}", status)
            }
            CrawlEvent::Status(status) => tracing::info!("Status: {}", status),
            CrawlEvent::Fetching { url } => tracing::info!("Crawling {}", url),
            CrawlEvent::PageCount { count } => tracing::debug!("{} pages found", count),
            CrawlEvent::Failed { message } => tracing::error!("{}", message),
            CrawlEvent::Finished { pages } => {
                tracing::info!("Found {} pages", pages.len());
                for page in pages.iter().filter(|p| p.is_homepage) {
                    tracing::debug!("Homepage: {}", page.url);
                }
            }
        }
    }
}
