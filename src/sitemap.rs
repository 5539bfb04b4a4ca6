use std::borrow::Cow;

use anyhow::Context as _;
use quick_xml::Reader;
use quick_xml::events::Event;
use reqwest::blocking::Client;

/// Fetch a sitemap and return the URLs listed in its `<loc>` elements.
///
/// Transport errors, non-success statuses and malformed XML are returned as
/// errors; a well-formed document without `<loc>` elements yields an empty
/// list.
pub fn fetch_page_urls(client: &Client, sitemap_url: &str) -> anyhow::Result<Vec<String>> {
    tracing::debug!(url = %sitemap_url, "fetch sitemap");

    let response = client
        .get(sitemap_url)
        .send()
        .and_then(|response| response.error_for_status())?;
    let body = response.bytes().context("read sitemap body")?;

    let urls = parse_locs(&body).context("parse sitemap xml")?;
    tracing::debug!(url = %sitemap_url, count = urls.len(), "parsed sitemap");
    Ok(urls)
}

/// Trimmed text of every element named `loc`, in document order.
///
/// Namespaces are ignored, so sitemap-index entries are returned alongside
/// regular `<url><loc>` entries. Text is decoded with the encoding the
/// document declares.
pub fn parse_locs(xml: &[u8]) -> anyhow::Result<Vec<String>> {
    let mut reader = Reader::from_reader(xml);
    let mut urls = Vec::new();
    let mut current: Option<String> = None;
    let mut buf = Vec::new();

    // quick-xml errors already render their cause, so they are flattened into
    // the message instead of being kept as an error source.
    loop {
        let event = reader.read_event_into(&mut buf).map_err(|err| {
            anyhow::anyhow!("read xml at byte {}: {err}", reader.buffer_position())
        })?;
        let decoder = reader.decoder();
        match event {
            Event::Start(e) if e.local_name().as_ref() == b"loc" => {
                current = Some(String::new());
            }
            Event::Empty(e) if e.local_name().as_ref() == b"loc" => {
                urls.push(String::new());
            }
            Event::Text(e) => {
                if let Some(text) = current.as_mut() {
                    let raw = decoder
                        .decode(&e)
                        .map_err(|err| anyhow::anyhow!("decode loc text: {err}"))?;
                    text.push_str(&unescape_or_raw(&raw));
                }
            }
            Event::CData(e) => {
                if let Some(text) = current.as_mut() {
                    let raw = decoder
                        .decode(&e)
                        .map_err(|err| anyhow::anyhow!("decode loc cdata: {err}"))?;
                    text.push_str(&raw);
                }
            }
            Event::End(e) if e.local_name().as_ref() == b"loc" => {
                if let Some(text) = current.take() {
                    urls.push(text.trim().to_owned());
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(urls)
}

// Undeclared entities such as `&nbsp;` keep their literal text rather than
// discarding the whole sitemap.
fn unescape_or_raw(raw: &str) -> Cow<'_, str> {
    match quick_xml::escape::unescape(raw) {
        Ok(text) => text,
        Err(err) => {
            tracing::debug!(%err, text = raw, "keep loc text with unknown entity");
            Cow::Borrowed(raw)
        }
    }
}
