use anyhow::{bail, Result};
use serde::Deserialize;
use std::env;

pub const DEFAULT_SERPER_ENDPOINT: &str = "https://google.serper.dev/search";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub search: SearchConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub allowed_origin: OriginPolicy,
}

/// Which cross-origin callers may read responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum OriginPolicy {
    Any,
    Exact(String),
    /// `ALLOWED_ORIGIN` set but empty: no cross-origin caller is allowed.
    Deny,
}

impl OriginPolicy {
    /// Unset or `*` allows any origin; an empty value denies all.
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        let Some(raw) = raw.map(str::trim) else {
            return Ok(OriginPolicy::Any);
        };

        match raw {
            "*" => Ok(OriginPolicy::Any),
            "" => Ok(OriginPolicy::Deny),
            origin => {
                if axum::http::HeaderValue::from_str(origin).is_err() {
                    bail!("ALLOWED_ORIGIN is not a valid origin: {}", origin);
                }
                Ok(OriginPolicy::Exact(origin.to_string()))
            }
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct SearchConfig {
    pub serper_api_key: String,
    pub serper_endpoint: String,
    pub query_suffix: String,
    pub default_count: usize,
    pub max_count: usize,
}

// Keep the API key out of startup logs.
impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("serper_api_key", &"<redacted>")
            .field("serper_endpoint", &self.serper_endpoint)
            .field("query_suffix", &self.query_suffix)
            .field("default_count", &self.default_count)
            .field("max_count", &self.max_count)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let serper_api_key = env::var("SERPER_API_KEY").unwrap_or_default().trim().to_string();
        if serper_api_key.is_empty() {
            bail!("SERPER_API_KEY must be set");
        }

        let allowed_origin = OriginPolicy::parse(env::var("ALLOWED_ORIGIN").ok().as_deref())?;

        let default_count: usize = env::var("REVIEWS_DEFAULT_COUNT")
            .unwrap_or_else(|_| "6".to_string())
            .parse()?;
        let max_count: usize = env::var("REVIEWS_MAX_COUNT")
            .unwrap_or_else(|_| "20".to_string())
            .parse()?;
        if max_count == 0 || default_count == 0 || default_count > max_count {
            bail!(
                "REVIEWS_DEFAULT_COUNT ({}) must be between 1 and REVIEWS_MAX_COUNT ({})",
                default_count,
                max_count
            );
        }

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                allowed_origin,
            },
            search: SearchConfig {
                serper_api_key,
                serper_endpoint: env::var("SERPER_ENDPOINT")
                    .unwrap_or_else(|_| DEFAULT_SERPER_ENDPOINT.to_string()),
                query_suffix: env::var("REVIEW_QUERY_SUFFIX")
                    .unwrap_or_else(|_| "review".to_string())
                    .trim()
                    .to_string(),
                default_count,
                max_count,
            },
            http: HttpConfig {
                timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "20".to_string())
                    .parse()?,
                connect_timeout_secs: env::var("HTTP_CONNECT_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()?,
            },
        })
    }

    /// Configuration pointing at a given provider endpoint, used by tests.
    pub fn for_endpoint(api_key: &str, endpoint: &str) -> Self {
        Self {
            server: ServerConfig {
                port: 0,
                host: "127.0.0.1".to_string(),
                allowed_origin: OriginPolicy::Any,
            },
            search: SearchConfig {
                serper_api_key: api_key.to_string(),
                serper_endpoint: endpoint.to_string(),
                query_suffix: "review".to_string(),
                default_count: 6,
                max_count: 20,
            },
            http: HttpConfig {
                timeout_secs: 5,
                connect_timeout_secs: 2,
            },
        }
    }
}
