//! Integration tests for the session HTTP API.
//!
//! These tests drive the full router through `tower::ServiceExt::oneshot`:
//! 1. Onboarding without a model credential serves the fixed fallbacks
//! 2. Onboarding with a model uses its refinement, ritual and image
//! 3. View transitions outside the allowed graph are rejected

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use kinship::adapters::ai::{MockError, MockGenerativeModel};
use kinship::bootstrap::build_router;
use kinship::config::{AppConfig, MatchingConfig};
use kinship::domain::enrichment::{Illustration, FAILED_BIO, UNCONFIGURED_BIO};
use kinship::ports::GenerativeModel;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn test_config() -> AppConfig {
    AppConfig {
        matching: MatchingConfig { scan_delay_ms: 0 },
        ..Default::default()
    }
}

fn app_without_model() -> Router {
    build_router(&test_config(), None)
}

fn app_with_model(model: MockGenerativeModel) -> Router {
    let model: Arc<dyn GenerativeModel> = Arc::new(model);
    build_router(&test_config(), Some(model))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(app, method, uri, body).await;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn start_session(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/sessions",
        Some(json!({ "name": "Ada Lovelace", "age": 28, "education": "Mathematics" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

async fn play_story(app: &Router, id: &str) -> Value {
    loop {
        let (status, body) = send(
            app,
            "POST",
            &format!("/api/sessions/{id}/choices"),
            Some(json!({ "choice_index": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        if body["view"] != "onboarding" {
            return body;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn health_endpoint_responds() {
    let app = app_without_model();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn locations_are_listed() {
    let app = app_without_model();
    let (status, body) = send(&app, "GET", "/api/locations", None).await;
    assert_eq!(status, StatusCode::OK);

    let locations = body.as_array().unwrap();
    assert_eq!(locations.len(), 4);
    assert_eq!(locations[1]["id"], "loc-2");
    assert_eq!(locations[1]["name"], "The Bean Coffee Roasters");
}

#[tokio::test]
async fn new_session_starts_on_first_chapter_at_midpoint() {
    let app = app_without_model();
    let id = start_session(&app).await;

    let (status, body) = send(&app, "GET", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "onboarding");
    assert_eq!(body["chapter"]["index"], 0);
    assert_eq!(body["chapter"]["total"], 5);
    assert_eq!(body["chapter"]["choices"].as_array().unwrap().len(), 3);
    for t in ["openness", "conscientiousness", "extraversion", "agreeableness", "neuroticism"] {
        assert_eq!(body["traits"][t], 50);
    }
}

#[tokio::test]
async fn identity_form_is_validated() {
    let app = app_without_model();
    let (status, body) = send(
        &app,
        "POST",
        "/api/sessions",
        Some(json!({ "name": "  ", "age": 28 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, _) = send(
        &app,
        "POST",
        "/api/sessions",
        Some(json!({ "name": "Ada", "age": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_identity_bodies_get_json_errors() {
    let app = app_without_model();
    let bodies = [
        json!({ "name": "Ada" }),
        json!({ "name": "Ada", "age": -1 }),
        json!({ "name": "Ada", "age": 70000 }),
        json!({ "name": "Ada", "age": "twenty" }),
    ];

    for body in bodies {
        let (status, response) = send(&app, "POST", "/api/sessions", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(response["code"], "BAD_REQUEST", "body {body}");
        assert!(response["message"].is_string());
    }
}

#[tokio::test]
async fn unparseable_identity_body_gets_json_error() {
    let app = app_without_model();
    let request = Request::builder()
        .method("POST")
        .uri("/api/sessions")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": \"Ada\", "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let app = app_without_model();
    let uri = format!("/api/sessions/{}", uuid::Uuid::new_v4());
    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = send(&app, "GET", "/api/sessions/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn full_flow_without_credential_uses_fallbacks() {
    let app = app_without_model();
    let id = start_session(&app).await;

    let (status, _) = send_raw(&app, "GET", &format!("/api/sessions/{id}/illustration"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let dashboard = play_story(&app, &id).await;
    assert_eq!(dashboard["view"], "dashboard");
    assert!(dashboard.get("chapter").is_none());
    assert_eq!(dashboard["profile"]["bio"], UNCONFIGURED_BIO);
    assert_eq!(dashboard["profile"]["name"], "Ada Lovelace");
    assert_eq!(dashboard["profile"]["traits"], dashboard["traits"]);

    let (status, body) = send(&app, "POST", &format!("/api/sessions/{id}/check-in"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "check_in");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/sessions/{id}/check-in/loc-2"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["location"]["name"], "The Bean Coffee Roasters");
    assert_eq!(body["session"]["view"], "match_found");
    let compatibility = body["session"]["match"]["compatibility"].as_u64().unwrap();
    assert!(compatibility <= 100);

    let (status, ritual) = send(&app, "GET", &format!("/api/sessions/{id}/ritual"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ritual["title"], "The Common Ground");
    assert_eq!(ritual["steps"].as_array().unwrap().len(), 3);

    let (status, body) = send(&app, "POST", &format!("/api/sessions/{id}/match/close"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "dashboard");
    assert!(body.get("match").is_none());
}

#[tokio::test]
async fn full_flow_with_model_uses_generated_content() {
    let model = MockGenerativeModel::new()
        .with_image(Some(Illustration::new("image/png", vec![0x89, 0x50, 0x4e, 0x47])))
        .with_json(json!({
            "traits": {
                "openness": 70, "conscientiousness": 90, "extraversion": 45,
                "agreeableness": 50, "neuroticism": 20
            },
            "bio": "Methodical builder with a curious streak."
        }))
        .with_json(json!({
            "title": "The Build Session",
            "topic": "Side projects",
            "steps": ["Swap one unfinished idea.", "Pick the wilder one.", "Sketch it together."]
        }));
    let app = app_with_model(model.clone());
    let id = start_session(&app).await;

    let (status, bytes) = send_raw(&app, "GET", &format!("/api/sessions/{id}/illustration"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, vec![0x89, 0x50, 0x4e, 0x47]);

    // Same screen entry: served from the screen cache.
    let (status, _) = send_raw(&app, "GET", &format!("/api/sessions/{id}/illustration"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(model.image_call_count(), 1);

    let dashboard = play_story(&app, &id).await;
    assert_eq!(dashboard["profile"]["bio"], "Methodical builder with a curious streak.");
    assert_eq!(dashboard["traits"]["conscientiousness"], 90);

    send(&app, "POST", &format!("/api/sessions/{id}/check-in"), None).await;
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/sessions/{id}/check-in/loc-1"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["match"]["candidate"]["id"], "u-2");
    assert_eq!(body["session"]["match"]["compatibility"], 100);
    assert_eq!(body["session"]["match"]["location_id"], "loc-1");

    let (status, ritual) = send(&app, "GET", &format!("/api/sessions/{id}/ritual"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ritual["title"], "The Build Session");

    let (_, again) = send(&app, "GET", &format!("/api/sessions/{id}/ritual"), None).await;
    assert_eq!(again, ritual);
    assert_eq!(model.structured_call_count(), 2);
}

#[tokio::test]
async fn model_failure_falls_back_without_error() {
    let model = MockGenerativeModel::new()
        .with_structured_error(MockError::Network {
            message: "connection reset".to_string(),
        });
    let app = app_with_model(model);
    let id = start_session(&app).await;

    let dashboard = play_story(&app, &id).await;
    assert_eq!(dashboard["view"], "dashboard");
    assert_eq!(dashboard["profile"]["bio"], FAILED_BIO);
}

#[tokio::test]
async fn check_in_before_onboarding_is_rejected() {
    let app = app_without_model();
    let id = start_session(&app).await;

    let (status, body) = send(&app, "POST", &format!("/api/sessions/{id}/check-in"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, _) = send(&app, "GET", &format!("/api/sessions/{id}/ritual"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cancel_check_in_returns_to_dashboard() {
    let app = app_without_model();
    let id = start_session(&app).await;
    play_story(&app, &id).await;

    send(&app, "POST", &format!("/api/sessions/{id}/check-in"), None).await;
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/sessions/{id}/check-in/cancel"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "dashboard");

    // Cancel is only valid from the check-in screen.
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/sessions/{id}/check-in/cancel"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_location_is_not_found() {
    let app = app_without_model();
    let id = start_session(&app).await;
    play_story(&app, &id).await;
    send(&app, "POST", &format!("/api/sessions/{id}/check-in"), None).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/sessions/{id}/check-in/loc-99"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("loc-99"));
}

#[tokio::test]
async fn out_of_range_choice_is_rejected() {
    let app = app_without_model();
    let id = start_session(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/sessions/{id}/choices"),
        Some(json!({ "choice_index": 7 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, "GET", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(body["chapter"]["index"], 0);
}

#[tokio::test]
async fn non_integer_choice_gets_json_error() {
    let app = app_without_model();
    let id = start_session(&app).await;
    let uri = format!("/api/sessions/{id}/choices");

    for body in [
        json!({ "choice_index": "first" }),
        json!({ "choice_index": 1.5 }),
        json!({ "choice_index": -1 }),
        json!({}),
    ] {
        let (status, response) = send(&app, "POST", &uri, Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(response["code"], "BAD_REQUEST", "body {body}");
    }

    let (_, body) = send(&app, "GET", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(body["chapter"]["index"], 0);
}
