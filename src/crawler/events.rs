//! Progress events emitted while a crawl runs

use crate::output::CrawledPage;
use crate::state::CrawlStatus;
use tokio::sync::mpsc::UnboundedSender;

/// Something an observer may want to display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    /// The session moved to a new status
    Status(CrawlStatus),

    /// A URL is about to be fetched
    Fetching { url: String },

    /// The number of recorded pages changed
    PageCount { count: usize },

    /// The run failed; `message` is meant for humans
    Failed { message: String },

    /// The run produced its final page list
    Finished { pages: Vec<CrawledPage> },
}

/// Optional event channel
///
/// Sending never fails the crawl; a dropped receiver just means nobody is
/// watching anymore.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    sender: Option<UnboundedSender<CrawlEvent>>,
}

impl EventSink {
    pub fn new(sender: UnboundedSender<CrawlEvent>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    pub fn disabled() -> Self {
        Self { sender: None }
    }

    pub fn emit(&self, event: CrawlEvent) {
        if let Some(sender) = &self.sender {
            if sender.send(event).is_err() {
                tracing::trace!("Event receiver dropped");
            }
        }
    }
}
