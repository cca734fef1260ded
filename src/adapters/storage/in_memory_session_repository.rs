//! In-Memory Session Repository
//!
//! Sessions live only as long as the process. Updates are compare-and-swap
//! on the session version. A session not updated within the idle TTL is
//! dropped the next time a new session is saved.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, Timestamp};
use crate::domain::session::Session;
use crate::ports::SessionRepository;

#[derive(Debug, Clone)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
    idle_ttl: Duration,
}

/// Idle lifetime of a session when none is configured.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(6 * 60 * 60);

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::with_idle_ttl(DEFAULT_SESSION_TTL)
    }

    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
        }
    }

    /// Get the number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(session.id()) {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                format!("Session {} already exists", session.id()),
            ));
        }

        let now = Timestamp::now();
        let before = sessions.len();
        sessions.retain(|_, stored| idle_for(stored, &now) <= self.idle_ttl);
        let expired = before - sessions.len();
        if expired > 0 {
            tracing::debug!(expired, remaining = sessions.len(), "Dropped idle sessions");
        }

        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &Session) -> Result<Session, DomainError> {
        let mut sessions = self.sessions.write().await;
        let stored = sessions.get_mut(session.id()).ok_or_else(|| {
            DomainError::new(ErrorCode::SessionNotFound, "Session not found")
                .with_detail("session_id", session.id().to_string())
        })?;

        if stored.version() != session.version() {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                "Session was modified by another request",
            )
            .with_detail("expected_version", session.version().to_string())
            .with_detail("actual_version", stored.version().to_string()));
        }

        let mut next = session.clone();
        next.increment_version();
        *stored = next.clone();
        Ok(next)
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }
}

fn idle_for(session: &Session, now: &Timestamp) -> Duration {
    (*now.as_datetime() - *session.updated_at().as_datetime())
        .to_std()
        .unwrap_or_default()
}
