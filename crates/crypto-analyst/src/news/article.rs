//! Article Fetcher
//!
//! Best-effort full-article text extraction. No invariants beyond
//! "return best-effort text or an empty string".

use std::time::Duration;

use async_trait::async_trait;

/// Best-effort article body fetcher; purely additive input to the AI
/// summarization path
#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    /// Fetch readable text for a URL. Empty string on any failure.
    async fn fetch_text(&self, url: &str) -> String;
}

const MAX_ARTICLE_CHARS: usize = 3000;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// HTTP article fetcher with crude tag stripping
pub struct HttpArticleFetcher {
    client: reqwest::Client,
}

impl Default for HttpArticleFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl HttpArticleFetcher {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

#[async_trait]
impl ArticleFetcher for HttpArticleFetcher {
    async fn fetch_text(&self, url: &str) -> String {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(url, error = %err, "article fetch failed");
                return String::new();
            }
        };

        let html = match response.error_for_status() {
            Ok(response) => match response.text().await {
                Ok(html) => html,
                Err(err) => {
                    tracing::warn!(url, error = %err, "article body read failed");
                    return String::new();
                }
            },
            Err(err) => {
                tracing::warn!(url, error = %err, "article fetch returned error status");
                return String::new();
            }
        };

        extract_text(&html)
    }
}

/// Strip scripts, styles, and markup; collapse whitespace; cap length
pub fn extract_text(html: &str) -> String {
    let without_scripts = strip_element(html, "script");
    let without_styles = strip_element(&without_scripts, "style");

    let mut text = String::with_capacity(without_styles.len());
    let mut in_tag = false;
    for ch in without_styles.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                // Tag boundaries separate words
                text.push(' ');
            }
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(MAX_ARTICLE_CHARS).collect()
}

/// Remove `<name ...>...</name>` blocks, case-insensitive
fn strip_element(html: &str, name: &str) -> String {
    let open = format!("<{name}");
    let close = format!("</{name}>");

    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = find_ascii_ci(rest, &open) {
        out.push_str(&rest[..start]);
        let after_open = &rest[start..];
        match find_ascii_ci(after_open, &close) {
            Some(end) => rest = &after_open[end + close.len()..],
            None => {
                // Unclosed element: drop the remainder
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Case-insensitive search for an ASCII needle. Matches start on an
/// ASCII byte, so the returned offset is always a char boundary.
fn find_ascii_ci(haystack: &str, needle: &str) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || n.len() > h.len() {
        return None;
    }
    (0..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_and_styles_are_removed() {
        let html = "<html><script>var x = 1;</script><style>p { color: red; }</style>\
                    <p>Actual content</p></html>";
        let text = extract_text(html);
        assert_eq!(text, "Actual content");
    }

    #[test]
    fn tags_become_word_separators() {
        let html = "<h1>Title</h1><p>Body text</p>";
        assert_eq!(extract_text(html), "Title Body text");
    }

    #[test]
    fn long_articles_are_capped() {
        let html = format!("<p>{}</p>", "a".repeat(5000));
        assert_eq!(extract_text(&html).len(), MAX_ARTICLE_CHARS);
    }

    #[test]
    fn unclosed_script_drops_remainder() {
        let html = "<p>before</p><script>evil(";
        assert_eq!(extract_text(html), "before");
    }
}
