//! Route definitions

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use infrastructure::ServerConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::{handlers, state::AppState};

/// Create the router with all routes
///
/// A known path with the wrong method gets the same 404 as an unknown path.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/speak",
            post(handlers::speak::speak).fallback(handlers::not_found),
        )
        .route(
            "/status",
            get(handlers::status::status).fallback(handlers::not_found),
        )
        .route(
            "/health",
            get(handlers::health::health_check).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        .with_state(state)
}

/// Create the router wrapped in the server middleware
///
/// Order matters: the last layer added is the outermost.
pub fn create_app(state: AppState, server: &ServerConfig) -> Router {
    create_router(state)
        .layer(RequestBodyLimitLayer::new(server.max_body_bytes))
        .layer(cors_layer(&server.allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Allow all origins unless specific ones are configured
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    }
}
