//! Generative model configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Generative model configuration.
///
/// Without an API key the app runs on fixed fallback content.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key
    pub gemini_api_key: Option<String>,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model for profile analysis and meeting rituals
    #[serde(default = "default_text_model")]
    pub text_model: String,

    /// Model for chapter illustrations
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Illustration aspect ratio, "W:H"
    #[serde(default = "default_aspect_ratio")]
    pub image_aspect_ratio: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if Gemini is configured
    pub fn has_gemini(&self) -> bool {
        self.gemini_api_key
            .as_ref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout("ai.timeout_secs"));
        }
        if self.text_model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("ai.text_model"));
        }
        if self.image_model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("ai.image_model"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("ai.base_url"));
        }
        if !is_aspect_ratio(&self.image_aspect_ratio) {
            return Err(ValidationError::InvalidAspectRatio(
                self.image_aspect_ratio.clone(),
            ));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            base_url: default_base_url(),
            text_model: default_text_model(),
            image_model: default_image_model(),
            image_aspect_ratio: default_aspect_ratio(),
            timeout_secs: default_timeout(),
        }
    }
}

fn is_aspect_ratio(s: &str) -> bool {
    match s.split_once(':') {
        Some((w, h)) => {
            matches!(w.parse::<u32>(), Ok(n) if n > 0) && matches!(h.parse::<u32>(), Ok(n) if n > 0)
        }
        None => false,
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_text_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_aspect_ratio() -> String {
    "16:9".to_string()
}

fn default_timeout() -> u64 {
    45
}
