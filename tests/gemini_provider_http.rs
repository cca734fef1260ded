//! Gemini transport tests against a local `wiremock` server.
//!
//! These cover what the body-builder unit tests cannot:
//! 1. The API key header and model path reach the server
//! 2. HTTP failure statuses map onto `AIError`
//! 3. Non-JSON model text surfaces as a parse error
//! 4. `LlmEnricher` over a failing provider serves the failure fallbacks

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kinship::adapters::ai::{GeminiConfig, GeminiProvider};
use kinship::adapters::enrichment::LlmEnricher;
use kinship::domain::enrichment::{Icebreaker, FAILED_BIO};
use kinship::domain::foundation::ProfileId;
use kinship::domain::personality::TraitVector;
use kinship::domain::profile::Profile;
use kinship::ports::{AIError, GenerativeModel, ImageRequest, ProfileEnricher, StructuredRequest};

// =============================================================================
// Test Infrastructure
// =============================================================================

const TEXT_PATH: &str = "/models/gemini-2.5-flash:generateContent";
const IMAGE_PATH: &str = "/models/gemini-2.5-flash-image:generateContent";

fn provider(server: &MockServer) -> GeminiProvider {
    GeminiProvider::new(GeminiConfig::new("test-key").with_base_url(server.uri())).unwrap()
}

fn text_candidate(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

fn request() -> StructuredRequest {
    StructuredRequest::new("Describe Ada", json!({ "type": "object" }))
}

async fn respond_with_status(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string("upstream says no"))
        .mount(server)
        .await;
}

fn profile(id: ProfileId, name: &str) -> Profile {
    Profile::new(
        id,
        name,
        30,
        "",
        TraitVector::midpoint(),
    )
}

// =============================================================================
// Request shape
// =============================================================================

#[tokio::test]
async fn structured_call_sends_key_header_to_model_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_candidate(r#"{"ok":true}"#)))
        .expect(1)
        .mount(&server)
        .await;

    let value = provider(&server).generate_structured(request()).await.unwrap();
    assert_eq!(value, json!({ "ok": true }));
}

#[tokio::test]
async fn image_call_decodes_inline_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": { "imageConfig": { "aspectRatio": "16:9" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{
                    "inlineData": { "mimeType": "image/png", "data": "AQID" }
                }] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let image = provider(&server)
        .generate_image(ImageRequest::new("a ruined city"))
        .await
        .unwrap()
        .expect("image");
    assert_eq!(image.mime_type, "image/png");
    assert_eq!(image.bytes, vec![1, 2, 3]);
}

// =============================================================================
// Status mapping
// =============================================================================

#[tokio::test]
async fn unauthorized_maps_to_authentication_failed() {
    let server = MockServer::start().await;
    respond_with_status(&server, 401).await;

    let err = provider(&server).generate_structured(request()).await.unwrap_err();
    assert!(matches!(err, AIError::AuthenticationFailed), "got {err:?}");
}

#[tokio::test]
async fn forbidden_maps_to_authentication_failed() {
    let server = MockServer::start().await;
    respond_with_status(&server, 403).await;

    let err = provider(&server).generate_structured(request()).await.unwrap_err();
    assert!(matches!(err, AIError::AuthenticationFailed), "got {err:?}");
}

#[tokio::test]
async fn too_many_requests_maps_to_rate_limited() {
    let server = MockServer::start().await;
    respond_with_status(&server, 429).await;

    let err = provider(&server).generate_structured(request()).await.unwrap_err();
    assert!(matches!(err, AIError::RateLimited { .. }), "got {err:?}");
}

#[tokio::test]
async fn bad_request_keeps_upstream_body() {
    let server = MockServer::start().await;
    respond_with_status(&server, 400).await;

    let err = provider(&server).generate_structured(request()).await.unwrap_err();
    assert!(
        matches!(&err, AIError::InvalidRequest(body) if body == "upstream says no"),
        "got {err:?}"
    );
}

#[tokio::test]
async fn server_errors_map_to_unavailable() {
    for status in [500, 503] {
        let server = MockServer::start().await;
        respond_with_status(&server, status).await;

        let err = provider(&server).generate_structured(request()).await.unwrap_err();
        assert!(matches!(err, AIError::Unavailable { .. }), "status {status}: {err:?}");
    }
}

// =============================================================================
// Response parsing
// =============================================================================

#[tokio::test]
async fn non_json_text_part_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(text_candidate("Sure! Here is a bio.")),
        )
        .mount(&server)
        .await;

    let err = provider(&server).generate_structured(request()).await.unwrap_err();
    assert!(matches!(err, AIError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn non_json_envelope_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = provider(&server).generate_structured(request()).await.unwrap_err();
    assert!(matches!(err, AIError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn safety_block_is_content_filtered() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [],
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let err = provider(&server).generate_structured(request()).await.unwrap_err();
    assert!(matches!(err, AIError::ContentFiltered { .. }), "got {err:?}");
}

// =============================================================================
// Enricher fallbacks over the real transport
// =============================================================================

#[tokio::test]
async fn enricher_falls_back_when_model_text_is_not_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_candidate("not json")))
        .mount(&server)
        .await;
    let enricher = LlmEnricher::new(Arc::new(provider(&server)));

    let computed = TraitVector::midpoint();
    let refinement = enricher
        .refine_profile(&["Helped a stranger".to_string()], computed)
        .await;
    assert_eq!(refinement.bio, FAILED_BIO);
    assert_eq!(refinement.traits, computed);

    let ritual = enricher
        .suggest_icebreaker(
            &profile(ProfileId::own(), "Ada"),
            &profile(ProfileId::new("u-1").unwrap(), "Grace"),
        )
        .await;
    assert_eq!(ritual, Icebreaker::failed());
}

#[tokio::test]
async fn enricher_falls_back_when_key_is_rejected() {
    let server = MockServer::start().await;
    respond_with_status(&server, 401).await;
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let enricher = LlmEnricher::new(Arc::new(provider(&server)));

    let refinement = enricher.refine_profile(&[], TraitVector::midpoint()).await;
    assert_eq!(refinement.bio, FAILED_BIO);
    assert!(enricher.illustrate("a ruined city").await.is_none());
}
