//! Per-run crawl state
//!
//! A [`CrawlSession`] owns everything one traversal mutates: the visited
//! set, the FIFO frontier, recorded pages, status and counters. It is
//! created at the start of a run and dropped when the run returns, so no
//! state leaks between runs.

use crate::output::CrawledPage;
use crate::state::CrawlStatus;
use crate::url::normalize_url;
use crate::SitemapError;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// A URL waiting to be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    /// Absolute URL as discovered
    pub url: Url,

    /// Link hops from the seed
    pub depth: u32,
}

/// A successfully fetched HTML page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub normalized_url: String,
    pub last_modified: Option<String>,
}

/// Counters reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Fetch attempts
    pub fetched: u64,
    /// Pages recorded in the result list
    pub recorded: u64,
    /// Pages skipped because the request failed
    pub skipped_fetch_error: u64,
    /// Pages skipped because of a non-2xx status
    pub skipped_status: u64,
    /// Pages skipped because they were not HTML
    pub skipped_content_type: u64,
    /// Same-origin links pushed onto the frontier
    pub links_enqueued: u64,
    /// Links dropped (malformed, special scheme or cross-origin)
    pub links_dropped: u64,
}

/// State of a single crawl run
#[derive(Debug)]
pub struct CrawlSession {
    generation: u64,
    seed: Url,
    seed_normalized: String,
    max_depth: u32,
    visited: HashSet<String>,
    queue: VecDeque<CrawlTask>,
    results: Vec<PageResult>,
    current_depth: u32,
    status: CrawlStatus,
    pub(crate) stats: CrawlStats,
}

impl CrawlSession {
    /// Creates a session whose frontier holds only the seed at depth 0
    pub fn new(generation: u64, seed: Url, max_depth: u32) -> Self {
        let seed_normalized = normalize_url(seed.as_str());
        let mut queue = VecDeque::new();
        queue.push_back(CrawlTask {
            url: seed.clone(),
            depth: 0,
        });

        Self {
            generation,
            seed,
            seed_normalized,
            max_depth,
            visited: HashSet::new(),
            queue,
            results: Vec::new(),
            current_depth: 0,
            status: CrawlStatus::Idle,
            stats: CrawlStats::default(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn seed(&self) -> &Url {
        &self.seed
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn status(&self) -> CrawlStatus {
        self.status
    }

    /// Depth of the task most recently taken from the frontier
    pub fn current_depth(&self) -> u32 {
        self.current_depth
    }

    pub fn stats(&self) -> CrawlStats {
        self.stats
    }

    pub fn results(&self) -> &[PageResult] {
        &self.results
    }

    pub fn frontier_size(&self) -> usize {
        self.queue.len()
    }

    pub fn is_visited(&self, normalized: &str) -> bool {
        self.visited.contains(normalized)
    }

    /// Moves the session to `next`, rejecting transitions the lifecycle forbids
    pub fn transition(&mut self, next: CrawlStatus) -> Result<(), SitemapError> {
        if !self.status.can_transition_to(next) {
            return Err(SitemapError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Takes the oldest task off the frontier
    pub fn next_task(&mut self) -> Option<CrawlTask> {
        let task = self.queue.pop_front()?;
        self.current_depth = task.depth;
        Some(task)
    }

    /// Marks a task's URL visited if it should be fetched
    ///
    /// Returns the normalized URL when the task is new and within the depth
    /// bound. Returns None for already-visited URLs and for tasks deeper
    /// than `max_depth`; those are discarded without touching the visited set.
    pub fn begin_visit(&mut self, task: &CrawlTask) -> Option<String> {
        if task.depth > self.max_depth {
            return None;
        }

        let normalized = normalize_url(task.url.as_str());
        if !self.visited.insert(normalized.clone()) {
            return None;
        }

        Some(normalized)
    }

    /// Returns true if links found at `depth` should be followed
    pub fn should_expand(&self, depth: u32) -> bool {
        depth < self.max_depth
    }

    /// Records a fetched HTML page and returns the new page count
    pub fn record(&mut self, normalized_url: String, last_modified: Option<String>) -> usize {
        self.results.push(PageResult {
            normalized_url,
            last_modified,
        });
        self.stats.recorded += 1;
        self.results.len()
    }

    /// Appends a discovered link to the back of the frontier
    pub fn enqueue(&mut self, url: Url, depth: u32) {
        self.queue.push_back(CrawlTask { url, depth });
        self.stats.links_enqueued += 1;
    }

    /// Builds the final page list in discovery order
    pub fn crawled_pages(&self) -> Vec<CrawledPage> {
        self.results
            .iter()
            .map(|result| CrawledPage {
                url: result.normalized_url.clone(),
                last_mod: result.last_modified.clone(),
                is_homepage: result.normalized_url == self.seed_normalized,
            })
            .collect()
    }
}
