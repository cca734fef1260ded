//! Generative Model Adapters.
//!
//! ## Available Adapters
//!
//! - `MockGenerativeModel` - Configurable mock for testing
//! - `GeminiProvider` - Google Gemini text and image models

mod gemini_provider;
mod mock_provider;

pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use mock_provider::{MockError, MockGenerativeModel, MockResponse};
