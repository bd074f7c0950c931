//! Encyclopedia lookup
//!
//! [`WikipediaClient`] resolves a spoken topic to the best-matching article
//! with an opensearch query, then fetches that page's summary from the REST
//! API and trims it to a few sentences.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::EncyclopediaConfig;
use crate::{Error, Result};

/// Why a topic could not be summarized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The topic names several different articles
    #[error("topic is ambiguous")]
    Ambiguous,

    /// No article matches the topic
    #[error("topic not found")]
    NotFound,

    /// Network or service failure
    #[error("lookup failed: {0}")]
    Failed(String),
}

/// Short-summary lookup service
#[async_trait]
pub trait Encyclopedia: Send + Sync {
    /// Summarize `topic` in a few sentences
    ///
    /// # Errors
    ///
    /// Returns a [`LookupError`] for ambiguous or unknown topics and for
    /// service failures
    async fn summarize(&self, topic: &str) -> std::result::Result<String, LookupError>;
}

/// opensearch returns `[query, [titles], [descriptions], [urls]]`
type OpenSearchResponse = (String, Vec<String>, Vec<String>, Vec<String>);

/// Subset of the REST page summary
#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    extract: String,
}

/// Wikipedia over HTTP
pub struct WikipediaClient {
    client: Client,
    base_url: String,
    sentences: usize,
}

impl WikipediaClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn new(config: &EncyclopediaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("ultron/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            sentences: config.sentences,
        })
    }

    fn search_url(&self, topic: &str) -> String {
        format!(
            "{}/w/api.php?action=opensearch&format=json&namespace=0&limit=1&search={}",
            self.base_url,
            urlencoding::encode(topic)
        )
    }

    fn summary_url(&self, title: &str) -> String {
        format!(
            "{}/api/rest_v1/page/summary/{}",
            self.base_url,
            urlencoding::encode(&title.replace(' ', "_"))
        )
    }

    /// Best-matching article title for `topic`
    async fn best_title(&self, topic: &str) -> std::result::Result<String, LookupError> {
        let response = self
            .client
            .get(self.search_url(topic))
            .send()
            .await
            .map_err(|e| LookupError::Failed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LookupError::Failed(format!(
                "search returned {}",
                response.status()
            )));
        }

        let (_, titles, _, _): OpenSearchResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Failed(e.to_string()))?;

        titles.into_iter().next().ok_or(LookupError::NotFound)
    }

    async fn page_summary(&self, title: &str) -> std::result::Result<PageSummary, LookupError> {
        let response = self
            .client
            .get(self.summary_url(title))
            .send()
            .await
            .map_err(|e| LookupError::Failed(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(LookupError::NotFound),
            status if !status.is_success() => {
                Err(LookupError::Failed(format!("summary returned {status}")))
            }
            _ => response
                .json()
                .await
                .map_err(|e| LookupError::Failed(e.to_string())),
        }
    }
}

#[async_trait]
impl Encyclopedia for WikipediaClient {
    async fn summarize(&self, topic: &str) -> std::result::Result<String, LookupError> {
        let title = self.best_title(topic).await?;
        tracing::debug!(topic, title = %title, "resolved article");

        let page = self.page_summary(&title).await?;
        summary_text(&page, self.sentences)
    }
}

/// Classify a page summary and cut it to `sentences`
fn summary_text(page: &PageSummary, sentences: usize) -> std::result::Result<String, LookupError> {
    if page.kind == "disambiguation" {
        return Err(LookupError::Ambiguous);
    }
    let text = first_sentences(&page.extract, sentences);
    if text.is_empty() {
        return Err(LookupError::NotFound);
    }
    Ok(text)
}

/// The first `n` sentences of `text`
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace or the end of
/// the text.
#[must_use]
pub fn first_sentences(text: &str, n: usize) -> String {
    let text = text.trim();
    let mut seen = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            let at_boundary = chars.peek().is_none_or(|(_, next)| next.is_whitespace());
            if at_boundary {
                seen += 1;
                if seen >= n {
                    return text[..i + c.len_utf8()].to_string();
                }
            }
        }
    }

    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> WikipediaClient {
        WikipediaClient::new(&EncyclopediaConfig {
            base_url: "https://en.wikipedia.org/".to_string(),
            ..EncyclopediaConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn urls_are_encoded() {
        let client = client();
        assert_eq!(
            client.search_url("black holes"),
            "https://en.wikipedia.org/w/api.php?action=opensearch&format=json&namespace=0&limit=1&search=black%20holes"
        );
        assert_eq!(
            client.summary_url("Rust (programming language)"),
            "https://en.wikipedia.org/api/rest_v1/page/summary/Rust_%28programming_language%29"
        );
    }

    #[test]
    fn sentences_are_cut() {
        let text = "Rust is a language. It is fast. It is safe.";
        assert_eq!(first_sentences(text, 2), "Rust is a language. It is fast.");
        assert_eq!(first_sentences(text, 5), text);
        assert_eq!(first_sentences("Version 1.5 shipped. Then 2.0!", 1), "Version 1.5 shipped.");
    }

    #[test]
    fn disambiguation_pages_are_ambiguous() {
        let page: PageSummary = serde_json::from_str(
            r#"{"type":"disambiguation","title":"Mercury","extract":"Mercury may refer to:"}"#,
        )
        .unwrap();
        assert_eq!(summary_text(&page, 2), Err(LookupError::Ambiguous));
    }

    #[test]
    fn standard_pages_are_summarized() {
        let page: PageSummary = serde_json::from_str(
            r#"{"type":"standard","extract":"Sokovia is fictional. It floats. Briefly."}"#,
        )
        .unwrap();
        assert_eq!(
            summary_text(&page, 2).unwrap(),
            "Sokovia is fictional. It floats."
        );
    }

    #[test]
    fn empty_extract_is_not_found() {
        let page: PageSummary = serde_json::from_str(r#"{"type":"standard"}"#).unwrap();
        assert_eq!(summary_text(&page, 2), Err(LookupError::NotFound));
    }

    #[test]
    fn opensearch_shape_parses() {
        let parsed: OpenSearchResponse = serde_json::from_str(
            r#"["jarvis",["J.A.R.V.I.S."],[""],["https://en.wikipedia.org/wiki/J.A.R.V.I.S."]]"#,
        )
        .unwrap();
        assert_eq!(parsed.1, vec!["J.A.R.V.I.S.".to_string()]);
    }
}
