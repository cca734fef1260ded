//! NavigateViewHandler - screen transitions that carry no payload.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{Session, SessionError};
use crate::ports::SessionRepository;

use super::get_session::load_session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigateAction {
    /// Dashboard -> CheckIn
    BeginCheckIn,
    /// CheckIn -> Dashboard
    CancelCheckIn,
    /// MatchFound -> Dashboard
    CloseMatch,
}

#[derive(Debug, Clone)]
pub struct NavigateViewCommand {
    pub session_id: SessionId,
    pub action: NavigateAction,
}

pub struct NavigateViewHandler {
    repository: Arc<dyn SessionRepository>,
}

impl NavigateViewHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: NavigateViewCommand) -> Result<Session, SessionError> {
        let mut session = load_session(self.repository.as_ref(), &cmd.session_id).await?;

        match cmd.action {
            NavigateAction::BeginCheckIn => session.begin_check_in()?,
            NavigateAction::CancelCheckIn => session.cancel_check_in()?,
            NavigateAction::CloseMatch => session.close_match()?,
        }

        let session = self.repository.update(&session).await?;
        tracing::debug!(session_id = %session.id(), view = %session.view(), "View changed");
        Ok(session)
    }
}
