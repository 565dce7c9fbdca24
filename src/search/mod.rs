//! Search Module
//!
//! Web search used to find review links for a title. The only backend is
//! Serper.dev, a Google Search results API; handlers talk to it through the
//! [`ReviewSearch`] trait so the provider can be swapped or stubbed.

pub mod serper;

use async_trait::async_trait;

pub use serper::{OrganicResult, SearchError, SerperClient};

#[async_trait]
pub trait ReviewSearch: Send + Sync {
    /// Run one provider query, asking for up to `num` organic results.
    async fn search(&self, query: &str, num: usize) -> Result<Vec<OrganicResult>, SearchError>;
}
