use std::time::Duration;

use anyhow::Context as _;
use reqwest::blocking::Client;

/// Per-page fetch timeout.
pub const DEFAULT_PAGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking clients used by one crawl. The sitemap request waits as long as
/// the server takes; page requests are bounded by `page_timeout`.
#[derive(Debug, Clone)]
pub struct HttpClients {
    pub sitemap: Client,
    pub page: Client,
}

impl HttpClients {
    pub fn new(page_timeout: Duration) -> anyhow::Result<Self> {
        let sitemap = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .context("build sitemap http client")?;
        let page = Client::builder()
            .timeout(page_timeout)
            .build()
            .context("build page http client")?;

        Ok(Self { sitemap, page })
    }
}
