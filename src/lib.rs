// Review Lookup - expert review links for a title via the Serper.dev search API

pub mod config;
pub mod middleware;
pub mod models;
pub mod page;     // Review cards built from a direct URL
pub mod reviews;  // Title -> review links
pub mod routes;
pub mod search;   // Search provider (Serper.dev)
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
