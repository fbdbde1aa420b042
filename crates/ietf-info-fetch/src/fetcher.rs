use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("server returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("connection to {url} failed: {reason}")]
    Connection { url: String, reason: String },
}

/// One GET per call, no retries. Failures are returned to the caller, which
/// decides whether they are fatal.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
