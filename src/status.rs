use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    Idle,
    SitemapFetching,
    Empty,
    Crawling,
    ArchiveBuilding,
    Ready,
    Warned,
}

/// Terminal outcomes that end a crawl without an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    MissingSitemapUrl,
    NoUrlsFound,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSitemapUrl => f.write_str("Please provide a sitemap URL first."),
            Self::NoUrlsFound => f.write_str("No URLs found in sitemap or an error occurred."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    State(CrawlState),
    SitemapFetchStarted { url: String },
    SitemapFetchFailed { error: String },
    UrlsFound { count: usize },
    CrawlingUrl { index: usize, total: usize, url: String },
    Finished { pages: usize, failed: usize },
    Warned(Warning),
}

impl StatusEvent {
    /// User-facing text; state transitions have none.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::State(_) => None,
            Self::SitemapFetchStarted { .. } => Some("Parsing sitemap...".to_owned()),
            Self::SitemapFetchFailed { error } => Some(format!("Error fetching sitemap: {error}")),
            Self::UrlsFound { count } => Some(format!("Found {count} URL(s). Now crawling...")),
            Self::CrawlingUrl { index, total, url } => {
                Some(format!("Crawling URL {index}/{total}: {url}"))
            }
            Self::Finished { .. } => Some("Crawling finished!".to_owned()),
            Self::Warned(warning) => Some(warning.to_string()),
        }
    }
}

/// Receiver for crawl progress. Implemented for closures, so tests and
/// front ends can collect events without a dedicated type.
pub trait StatusSink {
    fn emit(&mut self, event: StatusEvent);
}

impl<F> StatusSink for F
where
    F: FnMut(StatusEvent),
{
    fn emit(&mut self, event: StatusEvent) {
        self(event)
    }
}

/// Reports progress through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl StatusSink for TracingSink {
    fn emit(&mut self, event: StatusEvent) {
        match &event {
            StatusEvent::State(state) => tracing::debug!(?state, "crawl state"),
            StatusEvent::SitemapFetchFailed { .. } | StatusEvent::Warned(_) => {
                if let Some(message) = event.message() {
                    tracing::warn!("{message}");
                }
            }
            StatusEvent::Finished { pages, failed } => {
                tracing::info!(pages, failed, "Crawling finished!");
            }
            _ => {
                if let Some(message) = event.message() {
                    tracing::info!("{message}");
                }
            }
        }
    }
}
