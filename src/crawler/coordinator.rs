//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the breadth-first crawl loop. For each task taken
//! off the frontier it:
//! - Deduplicates and depth-checks the URL
//! - Fetches the page through the configured [`PageFetcher`]
//! - Skips failed, non-2xx and non-HTML responses
//! - Records the page and follows same-origin links one level deeper
//!
//! Per-page and per-link failures are logged and counted, never propagated.
//! Only invalid input and a crawl that records nothing end a run in error.

use crate::config::{Config, CrawlerConfig};
use crate::crawler::events::{CrawlEvent, EventSink};
use crate::crawler::fetcher::{FetchedPage, HttpFetcher, PageFetcher};
use crate::crawler::parser::{extract_hrefs, resolve_link};
use crate::crawler::session::{CrawlSession, CrawlStats, CrawlTask};
use crate::output::{generate_sitemap_xml, Artifact, CrawledPage};
use crate::state::CrawlStatus;
use crate::url::{coerce_seed, extract_domain, is_same_origin, normalize_url};
use crate::SitemapError;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc::UnboundedSender;
use url::Url;

/// Everything a successful run produces
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Seed after scheme coercion
    pub seed: Url,

    /// Recorded pages in discovery order
    pub pages: Vec<CrawledPage>,

    /// Rendered sitemap document
    pub sitemap_xml: String,

    pub stats: CrawlStats,
}

impl CrawlOutcome {
    /// Packages the sitemap for saving
    pub fn sitemap_artifact(&self) -> Artifact {
        Artifact::sitemap(self.sitemap_xml.clone())
    }
}

/// Sequential same-origin crawler
///
/// A crawler may be shared (for example behind an `Arc`) and `run` called
/// again while a previous run is still waiting on the network. The newer
/// run supersedes the older one: the older run discards whatever its
/// in-flight fetch returns and ends with [`SitemapError::Superseded`].
pub struct Crawler<F: PageFetcher = HttpFetcher> {
    settings: CrawlerConfig,
    fetcher: F,
    events: EventSink,
    generation: AtomicU64,
}

impl Crawler<HttpFetcher> {
    /// Creates a crawler that fetches over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Crawler with a configured HTTP client
    /// * `Err(SitemapError)` - The HTTP client could not be built
    pub fn from_config(config: &Config) -> Result<Self, SitemapError> {
        let fetcher = HttpFetcher::from_config(config)?;
        Ok(Self::new(config.crawler.clone(), fetcher))
    }
}

impl<F: PageFetcher> Crawler<F> {
    pub fn new(settings: CrawlerConfig, fetcher: F) -> Self {
        Self {
            settings,
            fetcher,
            events: EventSink::disabled(),
            generation: AtomicU64::new(0),
        }
    }

    /// Sends progress events to `sender`
    pub fn with_events(mut self, sender: UnboundedSender<CrawlEvent>) -> Self {
        self.events = EventSink::new(sender);
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Crawls the site behind `seed` and renders its sitemap
    ///
    /// # Arguments
    ///
    /// * `seed` - Start URL; `https://` is assumed when no scheme is given
    /// * `max_depth` - Link hops to follow from the seed, at most
    ///   `max_depth_limit`
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutcome)` - At least one page was recorded
    /// * `Err(SitemapError::InvalidUrl | InvalidDepth)` - Bad input, nothing fetched
    /// * `Err(SitemapError::EmptyCrawl)` - No page could be recorded
    /// * `Err(SitemapError::Superseded)` - A newer run started on this crawler
    pub async fn run(&self, seed: &str, max_depth: u32) -> Result<CrawlOutcome, SitemapError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let seed_url = match self.validate_input(seed, max_depth) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("Rejected crawl input '{}': {}", seed, e);
                self.events.emit(CrawlEvent::Status(CrawlStatus::Error));
                self.events.emit(CrawlEvent::Failed {
                    message: e.to_string(),
                });
                return Err(e);
            }
        };

        let mut session = CrawlSession::new(generation, seed_url, max_depth);
        self.transition(&mut session, CrawlStatus::Crawling)?;

        tracing::info!(
            "Starting crawl {} of {} (domain: {}, max depth: {})",
            generation,
            session.seed(),
            extract_domain(session.seed()).unwrap_or_default(),
            session.max_depth()
        );

        while let Some(task) = session.next_task() {
            self.ensure_current(generation)?;
            self.process_task(&mut session, task).await?;
        }

        self.transition(&mut session, CrawlStatus::Generating)?;
        log_stats(&session);

        if session.results().is_empty() {
            let error = SitemapError::EmptyCrawl;
            tracing::error!("Crawl {} recorded no pages", generation);
            self.transition(&mut session, CrawlStatus::Error)?;
            self.events.emit(CrawlEvent::Failed {
                message: error.to_string(),
            });
            return Err(error);
        }

        let pages = session.crawled_pages();
        let sitemap_xml = generate_sitemap_xml(&pages);

        self.transition(&mut session, CrawlStatus::Done)?;
        self.events.emit(CrawlEvent::Finished {
            pages: pages.clone(),
        });

        tracing::info!("Crawl {} complete: {} pages", generation, pages.len());

        Ok(CrawlOutcome {
            seed: session.seed().clone(),
            pages,
            sitemap_xml,
            stats: session.stats(),
        })
    }

    /// Checks seed and depth before any state is created
    fn validate_input(&self, seed: &str, max_depth: u32) -> Result<Url, SitemapError> {
        let limit = self.settings.max_depth_limit;
        if max_depth > limit {
            return Err(SitemapError::InvalidDepth {
                depth: max_depth,
                limit,
            });
        }

        Ok(coerce_seed(seed)?)
    }

    /// Processes a single frontier task
    ///
    /// This method:
    /// 1. Skips visited URLs and tasks beyond the depth bound
    /// 2. Fetches the page
    /// 3. Records it if the response is a 2xx HTML page
    /// 4. Enqueues same-origin links when the page is shallower than the bound
    async fn process_task(
        &self,
        session: &mut CrawlSession,
        task: CrawlTask,
    ) -> Result<(), SitemapError> {
        let Some(normalized) = session.begin_visit(&task) else {
            tracing::trace!("Discarding {} (visited or too deep)", task.url);
            return Ok(());
        };

        self.events.emit(CrawlEvent::Fetching {
            url: task.url.to_string(),
        });
        tracing::debug!(
            "Fetching {} (depth {}, {} queued)",
            task.url,
            session.current_depth(),
            session.frontier_size()
        );

        let expand = session.should_expand(task.depth);
        session.stats.fetched += 1;
        let fetched = self.fetcher.fetch(&task.url, expand).await;

        // A newer run may have started while we were waiting
        self.ensure_current(session.generation())?;

        let page = match fetched {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Could not fetch {}, skipping: {}", task.url, e);
                session.stats.skipped_fetch_error += 1;
                return Ok(());
            }
        };

        if !page.is_success() {
            tracing::debug!("Skipping {}: HTTP {}", task.url, page.status);
            session.stats.skipped_status += 1;
            return Ok(());
        }

        if !page.is_html() {
            tracing::debug!(
                "Skipping {}: content type {}",
                task.url,
                page.content_type.as_deref().unwrap_or("<missing>")
            );
            session.stats.skipped_content_type += 1;
            return Ok(());
        }

        let count = session.record(normalized, page.last_modified.clone());
        self.events.emit(CrawlEvent::PageCount { count });

        if expand {
            self.enqueue_links(session, &task, &page);
        }

        Ok(())
    }

    /// Follows the links of a recorded page one level deeper
    fn enqueue_links(&self, session: &mut CrawlSession, task: &CrawlTask, page: &FetchedPage) {
        let Some(body) = page.body.as_deref() else {
            tracing::debug!("No body available for {}, not following links", task.url);
            return;
        };

        for href in extract_hrefs(body) {
            match resolve_link(&href, &task.url) {
                Ok(url) if is_same_origin(session.seed(), &url) => {
                    if session.is_visited(&normalize_url(url.as_str())) {
                        tracing::trace!("Already visited {}, not requeueing", url);
                        continue;
                    }
                    session.enqueue(url, task.depth + 1);
                }
                Ok(url) => {
                    tracing::trace!("Dropping cross-origin link {} on {}", url, task.url);
                    session.stats.links_dropped += 1;
                }
                Err(skip) => {
                    tracing::trace!("Dropping '{}' on {}: {}", href, task.url, skip);
                    session.stats.links_dropped += 1;
                }
            }
        }
    }

    fn transition(
        &self,
        session: &mut CrawlSession,
        next: CrawlStatus,
    ) -> Result<(), SitemapError> {
        session.transition(next)?;
        self.events.emit(CrawlEvent::Status(next));
        Ok(())
    }

    fn ensure_current(&self, generation: u64) -> Result<(), SitemapError> {
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::info!("Crawl {} superseded, discarding its results", generation);
            return Err(SitemapError::Superseded { generation });
        }
        Ok(())
    }
}

fn log_stats(session: &CrawlSession) {
    let stats = session.stats();
    tracing::info!(
        "Fetched {} URLs: {} recorded, {} failed, {} non-2xx, {} non-HTML; {} links followed, {} dropped",
        stats.fetched,
        stats.recorded,
        stats.skipped_fetch_error,
        stats.skipped_status,
        stats.skipped_content_type,
        stats.links_enqueued,
        stats.links_dropped
    );
}
