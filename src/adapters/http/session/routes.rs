//! HTTP routes for session endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    begin_check_in, cancel_check_in, check_in_at_location, choose_option, close_match,
    get_illustration, get_ritual, get_session, start_session, SessionHandlers,
};

/// Creates the session router with all endpoints.
pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/", post(start_session))
        .route("/:id", get(get_session))
        .route("/:id/choices", post(choose_option))
        .route("/:id/illustration", get(get_illustration))
        .route("/:id/check-in", post(begin_check_in))
        .route("/:id/check-in/cancel", post(cancel_check_in))
        .route("/:id/check-in/:location_id", post(check_in_at_location))
        .route("/:id/ritual", get(get_ritual))
        .route("/:id/match/close", post(close_match))
        .with_state(handlers)
}
