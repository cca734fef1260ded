//! StartOnboardingHandler - Command handler for the identity form.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::profile::Identity;
use crate::domain::session::{Session, SessionError};
use crate::ports::SessionRepository;

/// Command carrying the identity form.
#[derive(Debug, Clone)]
pub struct StartOnboardingCommand {
    pub name: String,
    pub age: u16,
    pub education: String,
}

pub struct StartOnboardingHandler {
    repository: Arc<dyn SessionRepository>,
}

impl StartOnboardingHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: StartOnboardingCommand) -> Result<Session, SessionError> {
        let identity =
            Identity::new(cmd.name, cmd.age, cmd.education).map_err(DomainError::from)?;

        let session = Session::start(identity);
        self.repository.save(&session).await?;

        tracing::info!(session_id = %session.id(), "Onboarding started");
        Ok(session)
    }
}
