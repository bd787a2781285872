use axum::http::HeaderValue;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::handlers::{
    filter_handler, flip_handler, generate_all_handler, health_handler, metrics_handler,
};
use crate::state::AppState;

// Credentialed CORS for the configured origins, on every response
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        // a literal wildcard cannot be combined with credentials
        AllowOrigin::mirror_request()
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = origin.as_str(), "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

pub fn build_app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.allowed_origins);

    Router::new()
        .route("/health", get(health_handler))
        .route("/filter", post(filter_handler))
        .route("/flip", post(flip_handler))
        .route("/generate-all", post(generate_all_handler))
        .route("/metrics", get(metrics_handler))
        .layer(cors)
        .with_state(state)
}
