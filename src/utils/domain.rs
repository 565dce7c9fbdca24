//! Root-domain and favicon helpers.
//!
//! Result items and review cards carry a logo URL derived from the
//! registrable part of the link's host, and `distinct` lookups group
//! results by the same key.

use url::{Host, Url};

/// Second-level labels commonly used under two-letter country codes
/// (`bbc.co.uk`, `abc.net.au`, ...).
const SECOND_LEVEL_LABELS: &[&str] = &["co", "com", "net", "org", "gov", "ac", "edu"];

const FAVICON_BASE: &str = "https://www.google.com/s2/favicons?sz=64&domain=";

/// Parse an absolute `http`/`https` URL with a host.
pub fn parse_web_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    match url.scheme() {
        "http" | "https" if url.host().is_some() => Some(url),
        _ => None,
    }
}

/// Registrable domain of a URL, e.g. `https://www.bbc.co.uk/news` -> `bbc.co.uk`.
///
/// Returns an empty string when the input is not a usable web URL.
pub fn root_domain(raw: &str) -> String {
    let Some(url) = parse_web_url(raw) else {
        return String::new();
    };

    match url.host() {
        Some(Host::Domain(host)) => registrable(host),
        Some(host) => host.to_string(),
        None => String::new(),
    }
}

fn registrable(host: &str) -> String {
    let host = host.trim_end_matches('.').to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();

    let keep = match labels.as_slice() {
        [.., second, tld]
            if labels.len() >= 3
                && tld.len() == 2
                && SECOND_LEVEL_LABELS.contains(second) =>
        {
            3
        }
        _ => 2,
    };

    let start = labels.len().saturating_sub(keep);
    labels[start..].join(".")
}

/// Favicon URL for a link or a bare domain.
pub fn domain_logo(url_or_domain: &str) -> String {
    let domain = if url_or_domain.starts_with("http") {
        root_domain(url_or_domain)
    } else {
        url_or_domain.to_string()
    };
    format!("{}{}", FAVICON_BASE, domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_domain() {
        assert_eq!(root_domain("https://www.theguardian.com/film/review"), "theguardian.com");
        assert_eq!(root_domain("https://film.theguardian.com/x"), "theguardian.com");
        assert_eq!(root_domain("https://www.bbc.co.uk/news/1"), "bbc.co.uk");
        assert_eq!(root_domain("http://example.com"), "example.com");
        assert_eq!(root_domain("http://localhost:8080/page"), "localhost");
        assert_eq!(root_domain("http://127.0.0.1:9000/x"), "127.0.0.1");
    }

    #[test]
    fn test_root_domain_rejects_non_web_urls() {
        assert_eq!(root_domain("not a url"), "");
        assert_eq!(root_domain("ftp://example.com/file"), "");
        assert_eq!(root_domain(""), "");
    }

    #[test]
    fn test_domain_logo() {
        assert_eq!(
            domain_logo("https://www.rogerebert.com/reviews/heat-1995"),
            "https://www.google.com/s2/favicons?sz=64&domain=rogerebert.com"
        );
        assert_eq!(
            domain_logo("imdb.com"),
            "https://www.google.com/s2/favicons?sz=64&domain=imdb.com"
        );
    }

    #[test]
    fn test_parse_web_url() {
        assert!(parse_web_url("https://example.com/a?b=c").is_some());
        assert!(parse_web_url("  https://example.com  ").is_some());
        assert!(parse_web_url("mailto:someone@example.com").is_none());
        assert!(parse_web_url("/relative/path").is_none());
    }
}
