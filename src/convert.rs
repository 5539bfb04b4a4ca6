use anyhow::Context as _;
use reqwest::blocking::Client;

use crate::formats::ConvertedPage;

/// Fetch one page and convert it to Markdown.
///
/// Never fails: a fetch or conversion error is rendered into the returned
/// Markdown and recorded in [`ConvertedPage::error`].
pub fn fetch_page(client: &Client, url: &str) -> ConvertedPage {
    match fetch_markdown(client, url) {
        Ok(markdown) => ConvertedPage {
            url: url.to_owned(),
            markdown,
            error: None,
        },
        Err(err) => {
            let error = format!("{err:#}");
            tracing::warn!(url, error = %error, "page fetch failed; storing error document");
            ConvertedPage {
                url: url.to_owned(),
                markdown: error_document(url, &error),
                error: Some(error),
            }
        }
    }
}

fn fetch_markdown(client: &Client, url: &str) -> anyhow::Result<String> {
    let response = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())?;
    let html = response.text().context("read page body")?;
    html_to_markdown(&html)
}

pub fn html_to_markdown(html: &str) -> anyhow::Result<String> {
    let converter = htmd::HtmlToMarkdown::builder()
        .skip_tags(vec!["script", "style", "noscript"])
        .build();

    converter
        .convert(html)
        .context("convert html to markdown")
}

pub fn error_document(url: &str, error: &str) -> String {
    format!("# Error fetching {url}\n\n```\n{error}\n```")
}
