//! Generative Model Port - Interface for the external generative-AI service.
//!
//! Two request shapes cover everything the app asks of the model: JSON-mode
//! text generation constrained by a response schema, and single-image
//! generation from a prompt.
//!
//! # Example
//!
//! ```ignore
//! let request = StructuredRequest::new(prompt, schema).with_system_prompt("Be brief.");
//! let value = model.generate_structured(request).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::enrichment::Illustration;

/// Port for generative-AI interactions.
///
/// Implementations make exactly one attempt per call; callers decide what
/// to do on failure.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Generates a JSON value matching `request.response_schema`.
    async fn generate_structured(
        &self,
        request: StructuredRequest,
    ) -> Result<serde_json::Value, AIError>;

    /// Generates an image. `Ok(None)` means the model answered without one.
    async fn generate_image(&self, request: ImageRequest)
        -> Result<Option<Illustration>, AIError>;

    /// Provider information (name, models).
    fn provider_info(&self) -> ProviderInfo;
}

/// JSON-mode text generation request.
#[derive(Debug, Clone)]
pub struct StructuredRequest {
    pub prompt: String,
    pub system_prompt: Option<String>,
    /// OpenAPI-style schema the response must follow.
    pub response_schema: serde_json::Value,
    pub temperature: Option<f32>,
}

impl StructuredRequest {
    pub fn new(prompt: impl Into<String>, response_schema: serde_json::Value) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: None,
            response_schema,
            temperature: None,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// Image generation request.
#[derive(Debug, Clone)]
pub struct ImageRequest {
    pub prompt: String,
    /// Overrides the provider's configured aspect ratio, e.g. "16:9".
    pub aspect_ratio: Option<String>,
}

impl ImageRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            aspect_ratio: None,
        }
    }

    pub fn with_aspect_ratio(mut self, ratio: impl Into<String>) -> Self {
        self.aspect_ratio = Some(ratio.into());
        self
    }
}

/// Provider information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "gemini", "mock").
    pub name: String,
    pub text_model: String,
    pub image_model: String,
}

impl ProviderInfo {
    pub fn new(
        name: impl Into<String>,
        text_model: impl Into<String>,
        image_model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            text_model: text_model.into(),
            image_model: image_model.into(),
        }
    }
}

/// Generative model errors.
#[derive(Debug, thiserror::Error)]
pub enum AIError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Content was filtered for safety.
    #[error("content filtered: {reason}")]
    ContentFiltered { reason: String },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl AIError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn timeout(timeout_secs: u32) -> Self {
        Self::Timeout { timeout_secs }
    }
}
