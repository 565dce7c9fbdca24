//! Review cards from a direct URL.
//!
//! Fetches a page and pulls out a display name and a short readable
//! excerpt. Paragraphs inside `<article>` or `<main>` are preferred over
//! the rest of the document; the meta description is the last resort.

use reqwest::Client;
use scraper::{Html, Selector};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::ReviewCard;
use crate::utils::{domain_logo, root_domain};

/// Longest excerpt or name kept, in characters.
pub const MAX_TEXT_CHARS: usize = 300;

/// A paragraph must be longer than this to count as an excerpt.
pub const MIN_EXCERPT_CHARS: usize = 60;

/// Largest page body read for a review card.
pub const MAX_PAGE_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("page fetch timed out")]
    Timeout,

    #[error("page fetch failed: {0}")]
    Request(String),

    #[error("page returned HTTP {0}")]
    Status(u16),
}

impl From<reqwest::Error> for PageError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            PageError::Timeout
        } else {
            PageError::Request(e.to_string())
        }
    }
}

pub struct PageFetcher {
    client: Client,
    max_bytes: usize,
}

impl PageFetcher {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            max_bytes: MAX_PAGE_BYTES,
        }
    }

    /// Limit how much of a page body is read.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// GET a page and return at most `max_bytes` of its body as text.
    pub async fn fetch(&self, url: &str) -> Result<String, PageError> {
        let mut response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageError::Status(status.as_u16()));
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            let room = self.max_bytes - body.len();
            if chunk.len() >= room {
                body.extend_from_slice(&chunk[..room]);
                debug!(url = %url, limit = self.max_bytes, "Page body truncated");
                break;
            }
            body.extend_from_slice(&chunk);
        }

        debug!(url = %url, bytes = body.len(), "Page fetched");
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Fetch a page and build its review card.
    pub async fn review_card(&self, url: &str) -> Result<ReviewCard, PageError> {
        let html = self.fetch(url).await?;
        let card = build_card(&html, url);
        info!(url = %url, name = %card.name, has_excerpt = !card.excerpt.is_empty(), "Review card built");
        Ok(card)
    }
}

/// Build a review card from already-fetched HTML.
pub fn build_card(html: &str, url: &str) -> ReviewCard {
    let document = Html::parse_document(html);

    let name = Some(extract_title(&document))
        .filter(|t| !t.is_empty())
        .or_else(|| Some(root_domain(url)).filter(|d| !d.is_empty()))
        .unwrap_or_else(|| url.to_string());

    let excerpt = extract_excerpt(&document)
        .or_else(|| extract_meta_description(&document))
        .unwrap_or_default();

    ReviewCard {
        url: url.to_string(),
        name,
        excerpt,
        logo: domain_logo(url),
    }
}

/// Collapse whitespace runs, trim, and cap at [`MAX_TEXT_CHARS`].
pub fn clean_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(MAX_TEXT_CHARS)
        .collect()
}

fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .map(|el| clean_text(&el.text().collect::<String>()))
        .unwrap_or_default()
}

/// First sufficiently long paragraph, searching content areas first.
fn extract_excerpt(document: &Html) -> Option<String> {
    let scopes = ["article p", "main p", "[role=\"main\"] p", "p"];

    for scope in &scopes {
        let Ok(selector) = Selector::parse(scope) else {
            continue;
        };
        let found = document
            .select(&selector)
            .map(|el| clean_text(&el.text().collect::<Vec<_>>().join(" ")))
            .find(|line| line.chars().count() > MIN_EXCERPT_CHARS);
        if found.is_some() {
            return found;
        }
    }

    None
}

fn extract_meta_description(document: &Html) -> Option<String> {
    let selector = Selector::parse("meta[name=\"description\"]").ok()?;
    document
        .select(&selector)
        .filter_map(|el| el.value().attr("content"))
        .map(clean_text)
        .find(|content| !content.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG: &str = "This is a thoroughly long paragraph about the film that easily clears the sixty character bar.";

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  a \n\n b\t c  "), "a b c");
        assert_eq!(clean_text(&"x".repeat(500)).chars().count(), MAX_TEXT_CHARS);
        assert_eq!(clean_text(&"é".repeat(400)).chars().count(), MAX_TEXT_CHARS);
    }

    #[test]
    fn test_build_card_title_and_paragraph() {
        let html = format!(
            "<html><head><title>  Heat review \n | Empire </title></head>\
             <body><p>Short.</p><p>{}</p></body></html>",
            LONG
        );
        let card = build_card(&html, "https://www.empireonline.com/heat");
        assert_eq!(card.name, "Heat review | Empire");
        assert_eq!(card.excerpt, LONG);
        assert_eq!(card.url, "https://www.empireonline.com/heat");
        assert!(card.logo.ends_with("domain=empireonline.com"));
    }

    #[test]
    fn test_article_paragraph_preferred() {
        let html = format!(
            "<html><body><div><p>Cookie banner text that is long enough to count as an excerpt here.</p></div>\
             <article><p>{}</p></article></body></html>",
            LONG
        );
        let card = build_card(&html, "https://example.com/r");
        assert_eq!(card.excerpt, LONG);
    }

    #[test]
    fn test_meta_description_fallback() {
        let html = r#"<html><head><title>T</title>
            <meta name="description" content="  A   concise   summary. ">
            </head><body><p>Too short.</p></body></html>"#;
        let card = build_card(html, "https://example.com/r");
        assert_eq!(card.excerpt, "A concise summary.");
    }

    #[test]
    fn test_name_falls_back_to_domain_then_url() {
        let card = build_card("<html><body></body></html>", "https://www.bbc.co.uk/film/1");
        assert_eq!(card.name, "bbc.co.uk");
        assert_eq!(card.excerpt, "");

        let card = build_card("<html><body></body></html>", "not-a-url");
        assert_eq!(card.name, "not-a-url");
    }

    #[tokio::test]
    async fn test_fetch_card_from_server() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/review")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(format!("<html><head><title>Stub</title></head><body><p>{}</p></body></html>", LONG))
            .create_async()
            .await;

        let fetcher = PageFetcher::new(Client::new());
        let card = fetcher
            .review_card(&format!("{}/review", server.url()))
            .await
            .unwrap();
        assert_eq!(card.name, "Stub");
        assert_eq!(card.excerpt, LONG);
    }

    #[tokio::test]
    async fn test_fetch_caps_body_size() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/huge")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(format!("<html><body><p>{}</p></body></html>", "a".repeat(64 * 1024)))
            .create_async()
            .await;

        let fetcher = PageFetcher::new(Client::new()).with_max_bytes(1024);
        let body = fetcher.fetch(&format!("{}/huge", server.url())).await.unwrap();
        assert_eq!(body.len(), 1024);
        assert!(body.starts_with("<html><body><p>aaa"));
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/gone").with_status(404).create_async().await;

        let fetcher = PageFetcher::new(Client::new());
        let err = fetcher.fetch(&format!("{}/gone", server.url())).await.unwrap_err();
        assert!(matches!(err, PageError::Status(404)));
    }
}
