//! Gemini Provider - Implementation of GenerativeModel for Google's Gemini API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_text_model("gemini-2.5-flash")
//!     .with_image_model("gemini-2.5-flash-image");
//!
//! let provider = GeminiProvider::new(config)?;
//! ```
//!
//! Structured calls use JSON mode (`responseMimeType` plus `responseSchema`)
//! and parse the first text part. Image calls return the first `inlineData`
//! part, decoded from base64.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::domain::enrichment::Illustration;
use crate::ports::{AIError, GenerativeModel, ImageRequest, ProviderInfo, StructuredRequest};

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    api_key: Secret<String>,
    /// Model for JSON-mode text generation.
    pub text_model: String,
    /// Model for image generation.
    pub image_model: String,
    /// Base URL for the API (default: https://generativelanguage.googleapis.com/v1beta).
    pub base_url: String,
    /// Aspect ratio requested for images.
    pub aspect_ratio: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            text_model: "gemini-2.5-flash".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            aspect_ratio: "16:9".to_string(),
            timeout: Duration::from_secs(45),
        }
    }

    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_aspect_ratio(mut self, ratio: impl Into<String>) -> Self {
        self.aspect_ratio = ratio.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini REST API provider.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    fn structured_body(request: &StructuredRequest) -> serde_json::Value {
        let mut generation_config = json!({
            "responseMimeType": "application/json",
            "responseSchema": request.response_schema,
        });
        if let Some(temp) = request.temperature {
            generation_config["temperature"] = json!(temp);
        }

        let mut body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": request.prompt }] }],
            "generationConfig": generation_config,
        });
        if let Some(system) = &request.system_prompt {
            body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
        }
        body
    }

    fn image_body(&self, request: &ImageRequest) -> serde_json::Value {
        let ratio = request
            .aspect_ratio
            .as_deref()
            .unwrap_or(&self.config.aspect_ratio);
        json!({
            "contents": [{ "parts": [{ "text": request.prompt }] }],
            "generationConfig": {
                "imageConfig": { "aspectRatio": ratio }
            },
        })
    }

    async fn post(&self, model: &str, body: &serde_json::Value) -> Result<GenerateResponse, AIError> {
        tracing::debug!(model, "Calling Gemini generateContent");

        let response = self
            .client
            .post(self.generate_url(model))
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::timeout(self.config.timeout.as_secs() as u32)
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })?;

        let response = Self::handle_response_status(response).await?;
        response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))
    }

    async fn handle_response_status(response: Response) -> Result<Response, AIError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(AIError::AuthenticationFailed),
            429 => Err(AIError::rate_limited(30)),
            400 => Err(AIError::InvalidRequest(error_body)),
            500..=599 => Err(AIError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AIError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }
}

#[async_trait]
impl GenerativeModel for GeminiProvider {
    async fn generate_structured(
        &self,
        request: StructuredRequest,
    ) -> Result<serde_json::Value, AIError> {
        let body = Self::structured_body(&request);
        let response = self.post(&self.config.text_model, &body).await?;
        let text = response.first_text()?;
        serde_json::from_str(text)
            .map_err(|e| AIError::parse(format!("Model returned invalid JSON: {}", e)))
    }

    async fn generate_image(
        &self,
        request: ImageRequest,
    ) -> Result<Option<Illustration>, AIError> {
        let body = self.image_body(&request);
        let response = self.post(&self.config.image_model, &body).await?;
        response.first_image()
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("gemini", &self.config.text_model, &self.config.image_model)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Gemini API wire types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
    #[serde(rename = "inlineData")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

impl GenerateResponse {
    fn parts(&self) -> Result<&[Part], AIError> {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(AIError::content_filtered(reason));
        }
        let candidate = self
            .candidates
            .first()
            .ok_or_else(|| AIError::parse("No candidates in response"))?;
        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(AIError::content_filtered("SAFETY"));
        }
        Ok(candidate
            .content
            .as_ref()
            .map(|c| c.parts.as_slice())
            .unwrap_or_default())
    }

    fn first_text(&self) -> Result<&str, AIError> {
        self.parts()?
            .iter()
            .find_map(|p| p.text.as_deref())
            .ok_or_else(|| AIError::parse("No text part in response"))
    }

    fn first_image(&self) -> Result<Option<Illustration>, AIError> {
        let Some(inline) = self
            .parts()?
            .iter()
            .find_map(|p| p.inline_data.as_ref())
            .filter(|d| !d.data.is_empty())
        else {
            return Ok(None);
        };
        let bytes = BASE64
            .decode(inline.data.as_bytes())
            .map_err(|e| AIError::parse(format!("Invalid image data: {}", e)))?;
        Ok(Some(Illustration::new(inline.mime_type.clone(), bytes)))
    }
}
