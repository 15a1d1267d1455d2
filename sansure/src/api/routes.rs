use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::openapi;
use super::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);
    let max_body_bytes = state.config.server.max_body_bytes;

    let modes = Router::new()
        .route("/vision", post(handlers::score_vision))
        .route("/collusion", post(handlers::check_collusion))
        .route("/health-narrative", post(handlers::narrate_health))
        .route("/investor-signal", post(handlers::signal_investor));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(openapi::openapi_json))
        .merge(openapi::redoc_router())
        .nest("/api", modes)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Credentialed CORS for the configured frontend origins. Methods and
/// headers are mirrored because wildcards are not allowed with credentials.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
