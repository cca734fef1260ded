//! Storage Adapters
//!
//! ## Available Adapters
//!
//! - **InMemorySessionRepository** - Keeps sessions in process memory
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::InMemorySessionRepository;
//!
//! let repo = Arc::new(InMemorySessionRepository::new());
//! ```

mod in_memory_session_repository;

pub use in_memory_session_repository::InMemorySessionRepository;
