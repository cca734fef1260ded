//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::enrichment::{
    GetMeetingRitualHandler, GetMeetingRitualQuery, IllustrateChapterHandler,
    IllustrateChapterQuery,
};
use crate::application::handlers::session::{
    CheckInAtLocationCommand, CheckInAtLocationHandler, ChooseStoryOptionCommand,
    ChooseStoryOptionHandler, GetSessionHandler, GetSessionQuery, NavigateAction,
    NavigateViewCommand, NavigateViewHandler, StartOnboardingCommand, StartOnboardingHandler,
};
use crate::domain::foundation::{LocationId, SessionId};
use crate::domain::session::{Session, SessionError};
use crate::domain::story::StoryCatalog;

use super::dto::{
    CheckInResponse, ChooseOptionRequest, ErrorResponse, IcebreakerResponse, SessionResponse,
    StartSessionRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SessionHandlers {
    start_handler: Arc<StartOnboardingHandler>,
    get_handler: Arc<GetSessionHandler>,
    choose_handler: Arc<ChooseStoryOptionHandler>,
    navigate_handler: Arc<NavigateViewHandler>,
    check_in_handler: Arc<CheckInAtLocationHandler>,
    illustrate_handler: Arc<IllustrateChapterHandler>,
    ritual_handler: Arc<GetMeetingRitualHandler>,
    catalog: Arc<StoryCatalog>,
}

impl SessionHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        start_handler: Arc<StartOnboardingHandler>,
        get_handler: Arc<GetSessionHandler>,
        choose_handler: Arc<ChooseStoryOptionHandler>,
        navigate_handler: Arc<NavigateViewHandler>,
        check_in_handler: Arc<CheckInAtLocationHandler>,
        illustrate_handler: Arc<IllustrateChapterHandler>,
        ritual_handler: Arc<GetMeetingRitualHandler>,
        catalog: Arc<StoryCatalog>,
    ) -> Self {
        Self {
            start_handler,
            get_handler,
            choose_handler,
            navigate_handler,
            check_in_handler,
            illustrate_handler,
            ritual_handler,
            catalog,
        }
    }

    fn snapshot(&self, session: &Session) -> SessionResponse {
        SessionResponse::from_session(session, self.catalog.scenarios())
    }

    /// Frees enrichment results for screens the session has moved past.
    fn release_screens(&self, session: &Session) {
        self.illustrate_handler.release_if_left(session);
        self.ritual_handler.release_if_left(session);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions - Submit the identity form and start the story
pub async fn start_session(
    State(handlers): State<SessionHandlers>,
    payload: Result<Json<StartSessionRequest>, JsonRejection>,
) -> Response {
    let req = match parse_body(payload) {
        Ok(req) => req,
        Err(response) => return response,
    };

    let cmd = StartOnboardingCommand {
        name: req.name,
        age: req.age,
        education: req.education,
    };

    match handlers.start_handler.handle(cmd).await {
        Ok(session) => (StatusCode::CREATED, Json(handlers.snapshot(&session))).into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// GET /api/sessions/:id - Session snapshot
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.get_handler.handle(GetSessionQuery { session_id }).await {
        Ok(session) => (StatusCode::OK, Json(handlers.snapshot(&session))).into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// POST /api/sessions/:id/choices - Choose an option on the current chapter
pub async fn choose_option(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
    payload: Result<Json<ChooseOptionRequest>, JsonRejection>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let req = match parse_body(payload) {
        Ok(req) => req,
        Err(response) => return response,
    };

    let cmd = ChooseStoryOptionCommand {
        session_id,
        choice_index: req.choice_index,
    };

    match handlers.choose_handler.handle(cmd).await {
        Ok(result) => {
            handlers.release_screens(&result.session);
            (StatusCode::OK, Json(handlers.snapshot(&result.session))).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// GET /api/sessions/:id/illustration - Image for the current chapter
///
/// Responds `204 No Content` when no image is available and the client
/// should show its placeholder.
pub async fn get_illustration(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .illustrate_handler
        .handle(IllustrateChapterQuery { session_id })
        .await
    {
        Ok(Some(image)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, image.mime_type)],
            image.bytes,
        )
            .into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// POST /api/sessions/:id/check-in - Open the check-in screen
pub async fn begin_check_in(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    navigate(handlers, &session_id, NavigateAction::BeginCheckIn).await
}

/// POST /api/sessions/:id/check-in/cancel - Back to the dashboard
pub async fn cancel_check_in(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    navigate(handlers, &session_id, NavigateAction::CancelCheckIn).await
}

/// POST /api/sessions/:id/match/close - Dismiss the match
pub async fn close_match(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    navigate(handlers, &session_id, NavigateAction::CloseMatch).await
}

/// POST /api/sessions/:id/check-in/:location_id - Scan a location for a match
pub async fn check_in_at_location(
    State(handlers): State<SessionHandlers>,
    Path((session_id, location_id)): Path<(String, String)>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let location_id = match LocationId::new(location_id) {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid location ID")),
            )
                .into_response()
        }
    };

    let cmd = CheckInAtLocationCommand {
        session_id,
        location_id,
    };

    match handlers.check_in_handler.handle(cmd).await {
        Ok(result) => {
            let response = CheckInResponse {
                location: (&result.location).into(),
                session: handlers.snapshot(&result.session),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// GET /api/sessions/:id/ritual - Meeting ritual for the current match
pub async fn get_ritual(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .ritual_handler
        .handle(GetMeetingRitualQuery { session_id })
        .await
    {
        Ok(icebreaker) => {
            (StatusCode::OK, Json(IcebreakerResponse::from(icebreaker))).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

async fn navigate(handlers: SessionHandlers, session_id: &str, action: NavigateAction) -> Response {
    let session_id = match parse_session_id(session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = NavigateViewCommand { session_id, action };
    match handlers.navigate_handler.handle(cmd).await {
        Ok(session) => {
            handlers.release_screens(&session);
            (StatusCode::OK, Json(handlers.snapshot(&session))).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

/// Body rejections answer with the JSON 400 every other bad request gets.
fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Rejected request body");
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(rejection.body_text())),
            )
                .into_response())
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_session_error(error: SessionError) -> Response {
    match error {
        SessionError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Session", &id.to_string())),
        )
            .into_response(),
        SessionError::LocationNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Location", id.as_str())),
        )
            .into_response(),
        SessionError::ValidationFailed { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(
                ErrorResponse::bad_request(format!(
                    "Validation failed for {}: {}",
                    field, message
                ))
                .with_details(serde_json::json!({ "field": field })),
            ),
        )
            .into_response(),
        SessionError::InvalidState(msg) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(msg)),
        )
            .into_response(),
        SessionError::Conflict(msg) => {
            (StatusCode::CONFLICT, Json(ErrorResponse::conflict(msg))).into_response()
        }
        SessionError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "Session request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(msg)),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_error_not_found_maps_to_404() {
        let error = SessionError::NotFound(SessionId::new());
        let response = handle_session_error(error);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn location_not_found_maps_to_404() {
        let error = SessionError::LocationNotFound(LocationId::new("loc-99").unwrap());
        let response = handle_session_error(error);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_state_maps_to_400() {
        let error = SessionError::invalid_state("candidate pool is empty");
        let response = handle_session_error(error);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn session_error_validation_failed_maps_to_400() {
        let error = SessionError::ValidationFailed {
            field: "name".to_string(),
            message: "Must not be empty".to_string(),
        };
        let response = handle_session_error(error);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn conflict_maps_to_409() {
        let response = handle_session_error(SessionError::conflict("stale version"));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn infrastructure_maps_to_500() {
        let response = handle_session_error(SessionError::infrastructure("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn malformed_session_id_is_rejected() {
        let response = parse_session_id("not-a-uuid").unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
