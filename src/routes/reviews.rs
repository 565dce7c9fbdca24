use axum::{
    Router,
    routing::get,
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use tracing::info;

use crate::models::{AppState, ReviewItem};
use crate::reviews::{lookup_reviews, ReviewQuery};
use crate::types::{AppError, AppResult};

/// Raw query string. Everything is read as text so bad values get our own
/// error envelope instead of the extractor's.
#[derive(Debug, Deserialize)]
pub struct ReviewParams {
    pub title: Option<String>,
    pub n: Option<String>,
    pub distinct: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/reviews", get(get_reviews))
        .with_state(state)
}

/// GET /reviews?title=<string>&n=<int>&distinct=<bool>
async fn get_reviews(
    State(state): State<AppState>,
    params: Result<Query<ReviewParams>, QueryRejection>,
) -> AppResult<Json<Vec<ReviewItem>>> {
    let Query(params) = params.map_err(|e| AppError::invalid("query", e.body_text()))?;

    let query = ReviewQuery::parse(
        params.title.as_deref(),
        params.n.as_deref(),
        params.distinct.as_deref(),
        &state.config.search,
    )?;
    info!(title = %query.title, count = query.count, distinct = query.distinct, "Received review lookup");

    let items = lookup_reviews(state.search.as_ref(), &state.config.search, &query).await?;
    Ok(Json(items))
}
