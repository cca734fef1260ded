//! HTTP adapters - REST API implementations.
//!
//! Each resource has its own HTTP adapter; `api_router` nests them under
//! `/api` and applies the shared tower layers.

pub mod locations;
pub mod session;

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use ::http::HeaderValue;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::domain::story::StoryCatalog;

pub use locations::location_routes;
pub use session::{session_routes, ErrorResponse, SessionHandlers};

/// Builds the full application router.
pub fn api_router(
    handlers: SessionHandlers,
    catalog: Arc<StoryCatalog>,
    server: &ServerConfig,
) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/sessions", session_routes(handlers))
        .nest("/api/locations", location_routes(catalog))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}
