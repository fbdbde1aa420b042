//! The index fetch and the three per-document lookups.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::{DecodeError, FetchError, Fetcher, decode_text};

pub const RFC_EDITOR_URL: &str = "https://www.rfc-editor.org";
pub const DATATRACKER_URL: &str = "https://datatracker.ietf.org";

#[derive(Error, Debug)]
pub enum LookupError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LookupError {
    /// Whether the body arrived but could not be read as text.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

/// Datatracker document metadata. Only the fields used for attribution
/// are kept; absent fields default to empty.
///
/// Each field is read on its own: a value of the wrong shape empties that
/// field and leaves the others intact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Metadata {
    #[serde(default, deserialize_with = "string_entries")]
    pub authors: Vec<String>,
    #[serde(default, deserialize_with = "optional_string")]
    pub shepherd: Option<String>,
    /// Responsible Area Director.
    #[serde(default, deserialize_with = "optional_string")]
    pub ad: Option<String>,
}

/// String members of an array. Other members, or a non-array, are dropped.
fn string_entries<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn optional_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Base URLs of the two sites queried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    rfc_editor: String,
    datatracker: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(RFC_EDITOR_URL, DATATRACKER_URL)
    }
}

impl Endpoints {
    /// Base URLs like `https://www.rfc-editor.org` (a trailing slash is trimmed).
    pub fn new(rfc_editor: impl Into<String>, datatracker: impl Into<String>) -> Self {
        Self {
            rfc_editor: rfc_editor.into().trim_end_matches('/').to_string(),
            datatracker: datatracker.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn index_url(&self) -> String {
        format!("{}/rfc-index2.html", self.rfc_editor)
    }

    pub fn metadata_url(&self, number: u32) -> String {
        format!("{}/doc/rfc{number}/doc.json", self.datatracker)
    }

    pub fn acknowledgments_url(&self, number: u32) -> String {
        format!("{}/rfc/rfc{number}.txt", self.rfc_editor)
    }

    pub fn ballot_url(&self, number: u32) -> String {
        format!("{}/doc/rfc{number}/ballot/", self.datatracker)
    }
}

/// Lookup client over any [`Fetcher`].
pub struct LookupClient<F> {
    fetcher: F,
    endpoints: Endpoints,
}

impl<F: Fetcher> LookupClient<F> {
    pub fn new(fetcher: F, endpoints: Endpoints) -> Self {
        Self { fetcher, endpoints }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// The full RFC index page.
    pub async fn fetch_index(&self) -> Result<String, LookupError> {
        let url = self.endpoints.index_url();
        debug!(url = %url, "requesting index");
        self.text(&url).await
    }

    pub async fn metadata(&self, number: u32) -> Result<Metadata, LookupError> {
        let url = self.endpoints.metadata_url(number);
        debug!(number, url = %url, "requesting metadata");
        let body = self.fetcher.fetch(&url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Plain-text body of the RFC, searched for acknowledgments.
    pub async fn acknowledgments(&self, number: u32) -> Result<String, LookupError> {
        let url = self.endpoints.acknowledgments_url(number);
        debug!(number, url = %url, "requesting acknowledgment text");
        self.text(&url).await
    }

    /// Ballot page markup with one block per reviewer position.
    pub async fn ballot(&self, number: u32) -> Result<String, LookupError> {
        let url = self.endpoints.ballot_url(number);
        debug!(number, url = %url, "requesting ballot");
        self.text(&url).await
    }

    async fn text(&self, url: &str) -> Result<String, LookupError> {
        let body = self.fetcher.fetch(url).await?;
        Ok(decode_text(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryFetcher;

    fn endpoints() -> Endpoints {
        Endpoints::new("http://editor/", "http://tracker")
    }

    #[test]
    fn endpoint_urls() {
        let e = endpoints();
        assert_eq!(e.index_url(), "http://editor/rfc-index2.html");
        assert_eq!(e.metadata_url(9000), "http://tracker/doc/rfc9000/doc.json");
        assert_eq!(e.acknowledgments_url(9000), "http://editor/rfc/rfc9000.txt");
        assert_eq!(e.ballot_url(9000), "http://tracker/doc/rfc9000/ballot/");
    }

    #[test]
    fn default_endpoints_are_public_sites() {
        assert_eq!(
            Endpoints::default().index_url(),
            "https://www.rfc-editor.org/rfc-index2.html"
        );
    }

    #[test]
    fn metadata_null_fields() {
        let json = r#"{"authors": ["Jane Doe"], "shepherd": null, "ad": null, "title": "x"}"#;
        let meta: Metadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.authors, vec!["Jane Doe"]);
        assert!(meta.shepherd.is_none());
        assert!(meta.ad.is_none());
    }

    #[test]
    fn metadata_missing_fields_default() {
        let meta: Metadata = serde_json::from_str("{}").unwrap();
        assert_eq!(meta, Metadata::default());
    }

    #[tokio::test]
    async fn metadata_lookup_parses_json() {
        let client = LookupClient::new(
            MemoryFetcher::new().with_body(
                "http://tracker/doc/rfc9000/doc.json",
                r#"{"authors": ["A", "B"], "shepherd": "Lars Eggert", "ad": "Zaheduzzaman Sarker"}"#,
            ),
            endpoints(),
        );
        let meta = client.metadata(9000).await.unwrap();
        assert_eq!(meta.authors.len(), 2);
        assert_eq!(meta.shepherd.as_deref(), Some("Lars Eggert"));
    }

    #[test]
    fn malformed_field_keeps_the_others() {
        let json = r#"{"authors": [{"name": "A"}, null, "Jane Doe"], "shepherd": "Jane Doe <jane@example.org>", "ad": 7}"#;
        let meta: Metadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.authors, vec!["Jane Doe"]);
        assert_eq!(meta.shepherd.as_deref(), Some("Jane Doe <jane@example.org>"));
        assert!(meta.ad.is_none());
    }

    #[tokio::test]
    async fn mixed_author_entries_keep_roles() {
        let client = LookupClient::new(
            MemoryFetcher::new().with_body(
                "http://tracker/doc/rfc9001/doc.json",
                r#"{"authors": [{"name": "A"}, null], "shepherd": "Jane Doe <j@x>", "ad": "Jane Doe"}"#,
            ),
            endpoints(),
        );
        let meta = client.metadata(9001).await.unwrap();
        assert!(meta.authors.is_empty());
        assert_eq!(meta.shepherd.as_deref(), Some("Jane Doe <j@x>"));
        assert_eq!(meta.ad.as_deref(), Some("Jane Doe"));
    }

    #[tokio::test]
    async fn bad_json_is_a_lookup_error() {
        let client = LookupClient::new(
            MemoryFetcher::new().with_body("http://tracker/doc/rfc1/doc.json", "<html>"),
            endpoints(),
        );
        let err = client.metadata(1).await.unwrap_err();
        assert!(matches!(err, LookupError::Json(_)));
        assert!(!err.is_decode());
    }

    #[tokio::test]
    async fn undecodable_text_is_a_decode_error() {
        let client = LookupClient::new(
            MemoryFetcher::new().with_body("http://editor/rfc/rfc1.txt", vec![0xC3, 0x28, 0x00]),
            endpoints(),
        );
        assert!(client.acknowledgments(1).await.unwrap_err().is_decode());
    }

    #[tokio::test]
    async fn refused_connection_is_a_fetch_error() {
        let client = LookupClient::new(
            MemoryFetcher::new().with_refusal("http://tracker/doc/rfc1/ballot/", "refused"),
            endpoints(),
        );
        let err = client.ballot(1).await.unwrap_err();
        assert!(matches!(err, LookupError::Fetch(FetchError::Connection { .. })));
    }
}
