//! Session repository port.
//!
//! Sessions are stored whole. Writes are guarded by the session's version so
//! two handlers racing on the same session cannot both win.

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::session::Session;
use async_trait::async_trait;

/// Repository port for Session aggregate persistence.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Save a new session.
    ///
    /// # Errors
    ///
    /// - `ConcurrentModification` if a session with the same id exists
    async fn save(&self, session: &Session) -> Result<(), DomainError>;

    /// Replace a stored session and return the stored copy.
    ///
    /// The stored version must equal `session.version()`; the returned copy
    /// carries the incremented version.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `ConcurrentModification` if the stored version has moved on
    async fn update(&self, session: &Session) -> Result<Session, DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;
}
