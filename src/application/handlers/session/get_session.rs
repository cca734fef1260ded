//! GetSessionHandler - Query handler for retrieving a session.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{Session, SessionError};
use crate::ports::SessionRepository;

/// Query to get a session by ID.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

pub struct GetSessionHandler {
    repository: Arc<dyn SessionRepository>,
}

impl GetSessionHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<Session, SessionError> {
        load_session(self.repository.as_ref(), &query.session_id).await
    }
}

/// Loads a session or fails with `NotFound`.
pub(crate) async fn load_session(
    repository: &dyn SessionRepository,
    id: &SessionId,
) -> Result<Session, SessionError> {
    repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| SessionError::not_found(*id))
}
