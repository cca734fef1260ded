//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `GenerativeModel` - Raw access to the generative-AI service
//! - `ProfileEnricher` - Infallible enrichment calls with fallbacks
//! - `SessionRepository` - Versioned session storage

mod generative_model;
mod profile_enricher;
mod session_repository;

pub use generative_model::{AIError, GenerativeModel, ImageRequest, ProviderInfo, StructuredRequest};
pub use profile_enricher::ProfileEnricher;
pub use session_repository::SessionRepository;
