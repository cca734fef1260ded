//! ChooseStoryOptionHandler - applies a story choice and, after the last
//! chapter, builds the user's profile.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{ChoiceOutcome, Session, SessionError};
use crate::domain::story::StoryCatalog;
use crate::ports::{ProfileEnricher, SessionRepository};

use super::get_session::load_session;

#[derive(Debug, Clone)]
pub struct ChooseStoryOptionCommand {
    pub session_id: SessionId,
    pub choice_index: usize,
}

#[derive(Debug, Clone)]
pub struct ChooseStoryOptionResult {
    pub session: Session,
    pub outcome: ChoiceOutcome,
}

pub struct ChooseStoryOptionHandler {
    repository: Arc<dyn SessionRepository>,
    enricher: Arc<dyn ProfileEnricher>,
    catalog: Arc<StoryCatalog>,
}

impl ChooseStoryOptionHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        enricher: Arc<dyn ProfileEnricher>,
        catalog: Arc<StoryCatalog>,
    ) -> Self {
        Self {
            repository,
            enricher,
            catalog,
        }
    }

    pub async fn handle(
        &self,
        cmd: ChooseStoryOptionCommand,
    ) -> Result<ChooseStoryOptionResult, SessionError> {
        let mut session = load_session(self.repository.as_ref(), &cmd.session_id).await?;
        let outcome = session.choose(self.catalog.scenarios(), cmd.choice_index)?;

        // Persisting the Analyzing stage blocks any second final choice.
        let session = self.repository.update(&session).await?;

        let session = match outcome {
            ChoiceOutcome::Continue { chapter } => {
                tracing::debug!(session_id = %session.id(), chapter, "Story advanced");
                session
            }
            ChoiceOutcome::StoryComplete => {
                tracing::info!(session_id = %session.id(), "Story complete, analyzing profile");
                // Runs detached so a dropped request cannot strand the
                // session in Analyzing.
                let task = tokio::spawn(complete_onboarding(
                    self.repository.clone(),
                    self.enricher.clone(),
                    session,
                ));
                task.await
                    .map_err(|e| SessionError::infrastructure(e.to_string()))??
            }
        };

        Ok(ChooseStoryOptionResult { session, outcome })
    }
}

async fn complete_onboarding(
    repository: Arc<dyn SessionRepository>,
    enricher: Arc<dyn ProfileEnricher>,
    mut session: Session,
) -> Result<Session, SessionError> {
    let refinement = enricher
        .refine_profile(session.decisions(), *session.traits())
        .await;
    session.complete_onboarding(refinement)?;
    let session = repository.update(&session).await?;

    tracing::info!(session_id = %session.id(), "Profile created");
    Ok(session)
}
