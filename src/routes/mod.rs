//! API Routes
//!
//! This module organizes all HTTP endpoints for the application:
//! - `/reviews` - Review links for a title via the search provider
//! - `/review-url` - A single review card built from a direct URL
//! - `/health` - Health checks

pub mod health;
pub mod review_url;
pub mod reviews;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::apply_cors;
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let origin_policy = state.config.server.allowed_origin.clone();

    let router = Router::new()
        .merge(reviews::router(state.clone()))
        .merge(review_url::router(state))
        .merge(health::router())
        .layer(TraceLayer::new_for_http());

    apply_cors(router, &origin_policy)
}
