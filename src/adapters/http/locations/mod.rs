//! HTTP adapter for the check-in location list.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::domain::story::StoryCatalog;

use super::session::LocationResponse;

/// GET /api/locations - Places the user can check in at
async fn list_locations(State(catalog): State<Arc<StoryCatalog>>) -> Json<Vec<LocationResponse>> {
    Json(catalog.locations().iter().map(Into::into).collect())
}

pub fn location_routes(catalog: Arc<StoryCatalog>) -> Router {
    Router::new()
        .route("/", get(list_locations))
        .with_state(catalog)
}
