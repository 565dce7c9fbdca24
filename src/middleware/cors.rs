// CORS configuration
// The origin policy comes from ALLOWED_ORIGIN: unset or "*" allows any,
// a single origin allows only that one, an empty value allows none.

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

use crate::config::OriginPolicy;

pub fn cors_layer(policy: &OriginPolicy) -> CorsLayer {
    let origin = match policy {
        OriginPolicy::Any => AllowOrigin::any(),
        OriginPolicy::Exact(origin) => match HeaderValue::from_str(origin) {
            Ok(value) => AllowOrigin::list([value]),
            Err(e) => {
                warn!(error = %e, "Invalid ALLOWED_ORIGIN, denying cross-origin requests");
                AllowOrigin::list(Vec::<HeaderValue>::new())
            }
        },
        OriginPolicy::Deny => AllowOrigin::list(Vec::<HeaderValue>::new()),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
}

pub fn apply_cors(router: Router, policy: &OriginPolicy) -> Router {
    router.layer(cors_layer(policy))
}
