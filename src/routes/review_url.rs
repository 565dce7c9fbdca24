use axum::{
    Router,
    routing::get,
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use tracing::warn;
use validator::Validate;

use crate::models::{AppState, ReviewCard};
use crate::types::{AppError, AppResult};
use crate::utils::parse_web_url;

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewUrlParams {
    #[validate(length(min = 8), url)]
    pub url: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/review-url", get(get_review_card))
        .with_state(state)
}

/// GET /review-url?url=<string> - build one review card from a direct link
async fn get_review_card(
    State(state): State<AppState>,
    params: Result<Query<ReviewUrlParams>, QueryRejection>,
) -> AppResult<Json<ReviewCard>> {
    let Query(params) = params.map_err(|e| AppError::invalid("url", e.body_text()))?;

    let url = params.url.trim().to_string();
    let trimmed = ReviewUrlParams { url };
    if let Err(e) = trimmed.validate() {
        return Err(AppError::invalid("url", format!("url is not valid: {}", e)));
    }
    if parse_web_url(&trimmed.url).is_none() {
        return Err(AppError::invalid("url", "url must be an http or https link"));
    }

    let card = state.pages.review_card(&trimmed.url).await.map_err(|e| {
        warn!(error = %e, url = %trimmed.url, "Review card fetch failed");
        AppError::Upstream(e.to_string())
    })?;
    Ok(Json(card))
}
