//! Serper.dev Client
//!
//! Sends Google Search queries to Serper.dev and returns the organic
//! (non-sponsored) entries of the response.
//!
//! ## Request
//!
//! `POST https://google.serper.dev/search` with the API key in the
//! `X-API-KEY` header and a JSON body `{"q": ..., "num": ...}`.
//!
//! ## Response
//!
//! Only the `organic` array is read. A missing array means no results; any
//! other shape mismatch is reported as [`SearchError::Parse`].

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::ReviewSearch;
use crate::config::{SearchConfig, DEFAULT_SERPER_ENDPOINT};

/// Errors that can occur while querying the provider
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search provider timed out")]
    Timeout,

    #[error("search request failed: {0}")]
    Request(String),

    #[error("search provider returned HTTP {0}")]
    Status(u16),

    #[error("failed to parse search provider response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SearchError::Timeout
        } else {
            SearchError::Request(e.without_url().to_string())
        }
    }
}

/// One organic entry as returned by Serper. Every field is optional; the
/// caller decides what to skip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganicResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub position: Option<u32>,
}

#[derive(Debug, Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
    num: usize,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

/// Serper.dev search client
pub struct SerperClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl SerperClient {
    /// Create a client for the public Serper endpoint
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            endpoint: DEFAULT_SERPER_ENDPOINT.to_string(),
        }
    }

    /// Configure client from config
    pub fn from_config(client: Client, config: &SearchConfig) -> Self {
        Self::new(client, config.serper_api_key.clone()).with_endpoint(&config.serper_endpoint)
    }

    /// Point the client at a different endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Query Serper and return its organic results in provider order
    pub async fn search_organic(
        &self,
        query: &str,
        num: usize,
    ) -> Result<Vec<OrganicResult>, SearchError> {
        info!(query = %query, num, "Searching via Serper");

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .json(&SerperRequest { q: query, num })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Serper returned an error status");
            return Err(SearchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "Raw Serper response received");

        let parsed: SerperResponse =
            serde_json::from_slice(&body).map_err(|e| SearchError::Parse(e.to_string()))?;

        info!(count = parsed.organic.len(), "Serper search completed");
        Ok(parsed.organic)
    }
}

#[async_trait]
impl ReviewSearch for SerperClient {
    async fn search(&self, query: &str, num: usize) -> Result<Vec<OrganicResult>, SearchError> {
        self.search_organic(query, num).await
    }
}
