// Shared outbound HTTP client

use std::time::Duration;

use reqwest::{redirect, Client};

use crate::config::HttpConfig;

/// Browser-like User-Agent; many review sites reject unknown clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Build the client used for both provider queries and page fetches.
pub fn build_client(config: &HttpConfig) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .redirect(redirect::Policy::limited(10))
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
}
