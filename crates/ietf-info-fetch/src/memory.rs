//! In-memory [`Fetcher`] serving canned bodies by URL.
//!
//! Used to replay a run offline and by the pipeline tests. Every request is
//! recorded so callers can assert on what was (or was not) fetched.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::{FetchError, Fetcher};

#[derive(Debug, Clone)]
enum Canned {
    Body(Vec<u8>),
    Refused(String),
}

#[derive(Debug, Default)]
pub struct MemoryFetcher {
    responses: HashMap<String, Canned>,
    delays: HashMap<String, Duration>,
    requests: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(url.into(), Canned::Body(body.into()));
        self
    }

    /// Fail `url` as a refused connection.
    pub fn with_refusal(mut self, url: impl Into<String>, reason: impl Into<String>) -> Self {
        self.responses
            .insert(url.into(), Canned::Refused(reason.into()));
        self
    }

    /// Hold the response for `url` for `delay` before answering.
    pub fn with_delay(mut self, url: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(url.into(), delay);
        self
    }

    /// URLs requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Fetcher for MemoryFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        match self.responses.get(url) {
            Some(Canned::Body(body)) => Ok(body.clone()),
            Some(Canned::Refused(reason)) => Err(FetchError::Connection {
                url: url.to_string(),
                reason: reason.clone(),
            }),
            None => Err(FetchError::Status {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}
