use std::sync::Arc;

use crate::config::Config;
use crate::page::PageFetcher;
use crate::search::{ReviewSearch, SerperClient};
use crate::utils::build_client;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub search: Arc<dyn ReviewSearch>,
    pub pages: Arc<PageFetcher>,
}

impl AppState {
    /// Build the shared state once at startup. Read-only afterwards.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = build_client(&config.http)?;
        let search = SerperClient::from_config(client.clone(), &config.search);

        Ok(Self {
            config: Arc::new(config),
            search: Arc::new(search),
            pages: Arc::new(PageFetcher::new(client)),
        })
    }
}

/// One normalized review link returned by `GET /reviews`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReviewItem {
    pub title: String,
    pub link: String,
    pub snippet: String,
    pub logo: String,
}

/// Summary of a single page returned by `GET /review-url`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReviewCard {
    pub url: String,
    pub name: String,
    pub excerpt: String,
    pub logo: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub status: String,
    pub timestamp: String,
}
