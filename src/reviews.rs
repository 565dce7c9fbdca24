//! Review lookup
//!
//! Turns a title into a bounded list of review links:
//! resolve the requested count, query the search provider once, then
//! project its organic results onto [`ReviewItem`]s in provider order.

use std::collections::HashSet;
use std::num::IntErrorKind;

use tracing::{info, warn};

use crate::config::SearchConfig;
use crate::models::ReviewItem;
use crate::search::{OrganicResult, ReviewSearch};
use crate::types::{AppError, AppResult};
use crate::utils::{domain_logo, parse_web_url, root_domain};

/// Smallest number of results requested from the provider.
const MIN_PROVIDER_RESULTS: usize = 10;

/// Over-fetch factor so skipped entries still leave `n` items.
const PROVIDER_OVERFETCH: usize = 3;

/// A validated lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewQuery {
    pub title: String,
    pub count: usize,
    pub distinct: bool,
}

impl ReviewQuery {
    /// Validate raw query-string values.
    pub fn parse(
        title: Option<&str>,
        n: Option<&str>,
        distinct: Option<&str>,
        config: &SearchConfig,
    ) -> AppResult<Self> {
        let title = title.map(str::trim).unwrap_or_default();
        if title.is_empty() {
            return Err(AppError::invalid("title", "title is required"));
        }

        Ok(Self {
            title: title.to_string(),
            count: resolve_count(n, config)?,
            distinct: parse_flag("distinct", distinct)?,
        })
    }

    /// Text sent to the provider: the title plus the configured suffix.
    pub fn provider_query(&self, suffix: &str) -> String {
        if suffix.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.title, suffix)
        }
    }

    pub fn provider_num(&self) -> usize {
        (self.count * PROVIDER_OVERFETCH).max(MIN_PROVIDER_RESULTS)
    }
}

/// Absent, blank or non-positive counts use the default; large ones are clamped.
pub fn resolve_count(n: Option<&str>, config: &SearchConfig) -> AppResult<usize> {
    let raw = n.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Ok(config.default_count);
    }

    let value = match raw.parse::<i64>() {
        Ok(value) => value,
        Err(e) => {
            return match e.kind() {
                IntErrorKind::PosOverflow => Ok(config.max_count),
                IntErrorKind::NegOverflow => Ok(config.default_count),
                _ => Err(AppError::invalid(
                    "n",
                    format!("n must be an integer, got '{}'", raw),
                )),
            }
        }
    };

    if value <= 0 {
        Ok(config.default_count)
    } else {
        Ok((value as u64).min(config.max_count as u64) as usize)
    }
}

fn parse_flag(field: &'static str, raw: Option<&str>) -> AppResult<bool> {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("false") | Some("0") | Some("no") => Ok(false),
        Some("true") | Some("1") | Some("yes") => Ok(true),
        Some(other) => Err(AppError::invalid(
            field,
            format!("{} must be a boolean, got '{}'", field, other),
        )),
    }
}

/// Map one provider entry, or `None` when it has no usable link.
pub fn to_review_item(result: &OrganicResult) -> Option<ReviewItem> {
    let link = result.link.as_deref().map(str::trim).unwrap_or_default();
    parse_web_url(link)?;

    let title = result
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(link);

    Some(ReviewItem {
        title: title.to_string(),
        link: link.to_string(),
        snippet: result.snippet.as_deref().map(str::trim).unwrap_or_default().to_string(),
        logo: domain_logo(link),
    })
}

/// Project provider results onto at most `count` items, keeping provider order.
pub fn collect_items(results: &[OrganicResult], count: usize, distinct: bool) -> Vec<ReviewItem> {
    let mut seen = HashSet::new();

    results
        .iter()
        .filter_map(to_review_item)
        .filter(|item| !distinct || seen.insert(root_domain(&item.link)))
        .take(count)
        .collect()
}

/// Run one lookup against the provider.
pub async fn lookup_reviews(
    search: &dyn ReviewSearch,
    config: &SearchConfig,
    query: &ReviewQuery,
) -> AppResult<Vec<ReviewItem>> {
    let q = query.provider_query(&config.query_suffix);

    let results = search.search(&q, query.provider_num()).await.map_err(|e| {
        warn!(error = %e, title = %query.title, "Review search failed");
        AppError::Upstream(e.to_string())
    })?;

    let items = collect_items(&results, query.count, query.distinct);
    info!(
        title = %query.title,
        provider_results = results.len(),
        returned = items.len(),
        "Review lookup completed"
    );
    Ok(items)
}
