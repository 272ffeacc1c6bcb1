//! Article text extraction
//!
//! Fetches an article page and pulls out visible paragraph text for the
//! sentiment prompt. Any failure, network or otherwise, yields a fixed
//! sentinel string rather than an error. No retries.

use regex::Regex;
use reqwest::Client;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

/// Returned for any fetch or parse failure
pub const ARTICLE_ERROR: &str = "Error retrieving article text.";

const REQUEST_TIMEOUT_SECS: u64 = 20;

// Patterns are constants, so construction cannot fail
#[allow(clippy::unwrap_used)]
static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p[^>]*>(.*?)</p>").unwrap());

#[allow(clippy::unwrap_used)]
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]+>").unwrap());

#[allow(clippy::unwrap_used)]
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Extracts visible paragraph text from article pages
pub struct ArticleExtractor {
    client: Client,
}

impl ArticleExtractor {
    /// Create a new extractor with a shared HTTP client
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent("Mozilla/5.0 (compatible; stock-verdict/0.1)")
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Fetch a URL and return its concatenated paragraph text
    ///
    /// Returns [`ARTICLE_ERROR`] on any failure; never errors.
    pub async fn article_text(&self, url: &str) -> String {
        match self.fetch(url).await {
            Ok(text) => text,
            Err(e) => {
                debug!(url, error = %e, "article fetch failed");
                ARTICLE_ERROR.to_string()
            }
        }
    }

    async fn fetch(&self, url: &str) -> reqwest::Result<String> {
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(extract_paragraph_text(&body))
    }
}

impl Default for ArticleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the text of every `<p>` element out of an HTML document
pub fn extract_paragraph_text(html: &str) -> String {
    PARAGRAPH_RE
        .captures_iter(html)
        .map(|cap| {
            let inner = TAG_RE.replace_all(&cap[1], " ");
            let inner = WHITESPACE_RE.replace_all(&inner, " ");
            decode_entities(inner.trim())
        })
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode the handful of entities common in article body text
fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_paragraphs() {
        let html = "<html><body><h1>Title</h1>\
            <p>First paragraph.</p>\
            <p class=\"lead\">Second <b>bold</b> paragraph.</p>\
            </body></html>";
        let text = extract_paragraph_text(html);
        assert_eq!(text, "First paragraph. Second bold paragraph.");
    }

    #[test]
    fn test_extract_no_paragraphs() {
        assert_eq!(extract_paragraph_text("<div>no paragraphs here</div>"), "");
    }

    #[test]
    fn test_entity_decoding() {
        let html = "<p>Profit &amp; loss &gt; expected</p>";
        assert_eq!(extract_paragraph_text(html), "Profit & loss > expected");
    }

    #[tokio::test]
    async fn test_unreachable_url_returns_sentinel() {
        let extractor = ArticleExtractor::new();
        // Port 1 on loopback refuses the connection immediately
        let text = extractor.article_text("http://127.0.0.1:1/article").await;
        assert_eq!(text, "Error retrieving article text.");
    }

    #[tokio::test]
    async fn test_malformed_url_returns_sentinel() {
        let extractor = ArticleExtractor::new();
        let text = extractor.article_text("not a url").await;
        assert_eq!(text, "Error retrieving article text.");
    }
}
