/// Crawl status definitions for tracking a run
///
/// This module defines every status a crawl session moves through, from
/// receiving its input to producing a sitemap or failing.
use std::fmt;

/// Represents the current status of a crawl session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrawlStatus {
    /// No run has started yet
    #[default]
    Idle,

    /// Breadth-first traversal in progress
    Crawling,

    /// Traversal finished, building page list and sitemap
    Generating,

    // ===== Terminal States =====
    /// Sitemap produced
    Done,

    /// Run failed (bad input or nothing crawled)
    Error,
}

impl CrawlStatus {
    /// Returns true if this is a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }

    /// Returns true if the session may move from this status to `next`
    ///
    /// Allowed transitions:
    ///
    /// | From | To |
    /// |------|----|
    /// | Idle | Crawling, Error |
    /// | Crawling | Generating, Error |
    /// | Generating | Done, Error |
    pub fn can_transition_to(&self, next: CrawlStatus) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Crawling)
                | (Self::Idle, Self::Error)
                | (Self::Crawling, Self::Generating)
                | (Self::Crawling, Self::Error)
                | (Self::Generating, Self::Done)
                | (Self::Generating, Self::Error)
        )
    }

    /// Returns the lowercase name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Crawling => "crawling",
            Self::Generating => "generating",
            Self::Done => "done",
            Self::Error => "error",
        }
    }

    /// Returns all possible statuses
    pub fn all_statuses() -> Vec<Self> {
        vec![
            Self::Idle,
            Self::Crawling,
            Self::Generating,
            Self::Done,
            Self::Error,
        ]
    }
}

impl fmt::Display for CrawlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
