use std::time::Duration;

use anyhow::Context as _;
use reqwest::blocking::Client;

use crate::archive::Archive;
use crate::formats::ResultSet;
use crate::http::{DEFAULT_PAGE_TIMEOUT, HttpClients};
use crate::status::{CrawlState, StatusEvent, StatusSink, Warning};

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub sitemap_url: String,
    pub page_timeout: Duration,
}

impl CrawlOptions {
    pub fn new(sitemap_url: impl Into<String>) -> Self {
        Self {
            sitemap_url: sitemap_url.into(),
            page_timeout: DEFAULT_PAGE_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_page_timeout(mut self, page_timeout: Duration) -> Self {
        self.page_timeout = page_timeout;
        self
    }
}

#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub archive: Archive,
    /// Number of pages crawled, one per sitemap URL (duplicates included).
    pub pages: usize,
    /// URLs whose entry holds an error document.
    pub failed: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum CrawlOutcome {
    Ready(CrawlReport),
    Warned(Warning),
}

struct Tracker<'a> {
    state: CrawlState,
    sink: &'a mut dyn StatusSink,
}

impl Tracker<'_> {
    fn enter(&mut self, next: CrawlState) {
        tracing::trace!(from = ?self.state, to = ?next, "crawl transition");
        self.state = next;
        self.sink.emit(StatusEvent::State(next));
    }

    fn emit(&mut self, event: StatusEvent) {
        self.sink.emit(event);
    }

    fn warn(&mut self, warning: Warning) -> CrawlOutcome {
        self.emit(StatusEvent::Warned(warning));
        self.enter(CrawlState::Warned);
        CrawlOutcome::Warned(warning)
    }
}

/// Run a full crawl: sitemap, every listed page in order, then the archive.
///
/// Page failures are stored as error documents and never abort the run.
/// Only a failure to set up HTTP clients or to assemble the archive is
/// returned as an error.
pub fn run(options: &CrawlOptions, sink: &mut dyn StatusSink) -> anyhow::Result<CrawlOutcome> {
    let mut tracker = Tracker {
        state: CrawlState::Idle,
        sink,
    };
    tracker.emit(StatusEvent::State(CrawlState::Idle));

    let sitemap_url = options.sitemap_url.trim();
    if sitemap_url.is_empty() {
        return Ok(tracker.warn(Warning::MissingSitemapUrl));
    }

    let clients = HttpClients::new(options.page_timeout).context("build http clients")?;

    tracker.enter(CrawlState::SitemapFetching);
    tracker.emit(StatusEvent::SitemapFetchStarted {
        url: sitemap_url.to_owned(),
    });
    let urls = match crate::sitemap::fetch_page_urls(&clients.sitemap, sitemap_url) {
        Ok(urls) => urls,
        Err(err) => {
            tracker.emit(StatusEvent::SitemapFetchFailed {
                error: format!("{err:#}"),
            });
            Vec::new()
        }
    };

    if urls.is_empty() {
        tracker.enter(CrawlState::Empty);
        return Ok(tracker.warn(Warning::NoUrlsFound));
    }

    tracker.emit(StatusEvent::UrlsFound { count: urls.len() });
    tracker.enter(CrawlState::Crawling);
    let (results, failed) = crawl_pages(&clients.page, &urls, &mut tracker);
    tracker.emit(StatusEvent::Finished {
        pages: urls.len(),
        failed: failed.len(),
    });

    tracker.enter(CrawlState::ArchiveBuilding);
    let archive = crate::archive::build(&results).context("build archive")?;

    tracker.enter(CrawlState::Ready);
    Ok(CrawlOutcome::Ready(CrawlReport {
        archive,
        pages: urls.len(),
        failed,
    }))
}

fn crawl_pages(
    client: &Client,
    urls: &[String],
    tracker: &mut Tracker<'_>,
) -> (ResultSet, Vec<String>) {
    let mut results = ResultSet::new();
    let mut failed = Vec::new();
    let total = urls.len();

    for (idx, url) in urls.iter().enumerate() {
        tracker.emit(StatusEvent::CrawlingUrl {
            index: idx + 1,
            total,
            url: url.clone(),
        });

        let page = crate::convert::fetch_page(client, url);
        if page.is_failed() {
            failed.push(page.url.clone());
        }

        let filename = crate::filename::safe_filename(url);
        if results.insert(filename.clone(), page.markdown).is_some() {
            tracing::debug!(url = %url, filename = %filename, "filename collision; replacing earlier page");
        }
    }

    (results, failed)
}
