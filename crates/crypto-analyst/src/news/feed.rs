//! Feed Sources
//!
//! The feed source boundary and the RSS implementation. A source may
//! return zero entries or fail entirely; errors never cross the
//! aggregator boundary (they are caught at the per-source task).

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{AnalystError, Result};

/// One raw entry from a feed, before classification and enrichment
#[derive(Clone, Debug)]
pub struct FeedEntry {
    pub title: String,
    pub summary: String,
    pub link: String,

    /// Publish time as the source reported it; the aggregator defaults
    /// missing timestamps to "now"
    pub published: Option<DateTime<Utc>>,
}

/// An external endpoint yielding a list of news-like entries
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<FeedEntry>>;

    /// Source name for attribution (typically the feed domain)
    fn name(&self) -> &str;
}

/// RSS feed source over HTTP.
///
/// Parsing is deliberately lightweight: item blocks with
/// title/link/description/pubDate, CDATA-aware. Feeds that deviate
/// simply yield fewer entries.
pub struct RssFeedSource {
    url: String,
    domain: String,
    client: reqwest::Client,
}

impl RssFeedSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let url = url.into();
        let domain = extract_domain(&url);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            url,
            domain,
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FeedSource for RssFeedSource {
    async fn fetch(&self) -> Result<Vec<FeedEntry>> {
        tracing::debug!(url = %self.url, "fetching rss feed");
        let xml = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let entries = parse_rss(&xml);
        if entries.is_empty() {
            return Err(AnalystError::Feed(format!(
                "no parseable items in {}",
                self.url
            )));
        }
        Ok(entries)
    }

    fn name(&self) -> &str {
        &self.domain
    }
}

/// Extract the host portion of a URL for source attribution
fn extract_domain(url: &str) -> String {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    without_scheme
        .split('/')
        .next()
        .unwrap_or(without_scheme)
        .to_string()
}

/// Parse RSS 2.0 item blocks into feed entries
pub(crate) fn parse_rss(xml: &str) -> Vec<FeedEntry> {
    item_blocks(xml)
        .into_iter()
        .filter_map(|block| {
            let title = tag_text(block, "title")?;
            let link = tag_text(block, "link").unwrap_or_default();
            let summary = tag_text(block, "description")
                .or_else(|| tag_text(block, "summary"))
                .unwrap_or_default();
            let published = tag_text(block, "pubDate")
                .and_then(|date| parse_feed_date(&date));

            Some(FeedEntry {
                title,
                summary: strip_markup(&summary),
                link,
                published,
            })
        })
        .collect()
}

/// Collect the inner text of every `<item>...</item>` block
fn item_blocks(xml: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut rest = xml;
    while let Some(start) = rest.find("<item") {
        let after = &rest[start..];
        let Some(open_end) = after.find('>') else {
            break;
        };
        let body = &after[open_end + 1..];
        let Some(close) = body.find("</item>") else {
            break;
        };
        blocks.push(&body[..close]);
        rest = &body[close + "</item>".len()..];
    }
    blocks
}

/// Inner text of the first `<name>` element in a block, CDATA unwrapped
/// and entities decoded
fn tag_text(block: &str, name: &str) -> Option<String> {
    let open = format!("<{name}");
    let close = format!("</{name}>");

    let start = block.find(&open)?;
    let after = &block[start..];
    let open_end = after.find('>')?;
    // Self-closing tag has no text
    if after[..open_end].ends_with('/') {
        return None;
    }
    let body = &after[open_end + 1..];
    let end = body.find(&close)?;

    let raw = body[..end].trim();
    let inner = raw
        .strip_prefix("<![CDATA[")
        .and_then(|s| s.strip_suffix("]]>"))
        .unwrap_or(raw);

    let text = decode_entities(inner.trim());
    if text.is_empty() { None } else { Some(text) }
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Drop embedded HTML markup from a summary and collapse whitespace
fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// RSS feeds use RFC 2822 dates; some serve RFC 3339
fn parse_feed_date(date: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(date)
        .or_else(|_| DateTime::parse_from_rfc3339(date))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
