//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - generative model providers (Gemini, mock)
//! - `enrichment` - `ProfileEnricher` built on a generative model
//! - `storage` - session repositories
//! - `http` - axum REST API

pub mod ai;
pub mod enrichment;
pub mod http;
pub mod storage;

pub use ai::{GeminiConfig, GeminiProvider, MockGenerativeModel};
pub use enrichment::LlmEnricher;
pub use storage::InMemorySessionRepository;
