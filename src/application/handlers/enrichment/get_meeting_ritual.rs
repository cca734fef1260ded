//! GetMeetingRitualHandler - icebreaker for the current match.

use std::sync::Arc;
use std::time::Duration;

use crate::application::ScreenCache;
use crate::application::handlers::session::load_session;
use crate::domain::enrichment::Icebreaker;
use crate::domain::foundation::SessionId;
use crate::domain::session::{Session, SessionError, ViewState};
use crate::ports::{ProfileEnricher, SessionRepository};

#[derive(Debug, Clone)]
pub struct GetMeetingRitualQuery {
    pub session_id: SessionId,
}

pub struct GetMeetingRitualHandler {
    repository: Arc<dyn SessionRepository>,
    enricher: Arc<dyn ProfileEnricher>,
    cache: ScreenCache<Icebreaker>,
}

impl GetMeetingRitualHandler {
    pub fn new(repository: Arc<dyn SessionRepository>, enricher: Arc<dyn ProfileEnricher>) -> Self {
        Self {
            repository,
            enricher,
            cache: ScreenCache::new(),
        }
    }

    /// Drops cached rituals for sessions idle longer than `idle_ttl`.
    pub fn with_idle_ttl(mut self, idle_ttl: Duration) -> Self {
        self.cache = ScreenCache::with_idle_ttl(idle_ttl);
        self
    }

    /// Frees the session's cached ritual once its match screen is closed.
    pub fn release_if_left(&self, session: &Session) {
        if session.view() != ViewState::MatchFound && self.cache.evict(session.id()) {
            tracing::debug!(session_id = %session.id(), "Released meeting ritual");
        }
    }

    /// Number of sessions holding a cached ritual.
    pub fn cached_screens(&self) -> usize {
        self.cache.len()
    }

    pub async fn handle(&self, query: GetMeetingRitualQuery) -> Result<Icebreaker, SessionError> {
        let session = load_session(self.repository.as_ref(), &query.session_id).await?;
        if session.view() != ViewState::MatchFound {
            self.release_if_left(&session);
            return Err(SessionError::invalid_state("No match is being shown"));
        }
        let (me, other) = match (session.profile(), session.current_match()) {
            (Some(me), Some(m)) => (me.clone(), m.candidate.clone()),
            _ => return Err(SessionError::invalid_state("No match is being shown")),
        };

        let enricher = self.enricher.clone();
        self.cache
            .get_or_start(*session.id(), session.screen_entry(), move || async move {
                enricher.suggest_icebreaker(&me, &other).await
            })
            .await
            .map_err(|e| SessionError::infrastructure(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockGenerativeModel;
    use crate::adapters::enrichment::LlmEnricher;
    use crate::adapters::storage::InMemorySessionRepository;
    use crate::domain::enrichment::ProfileRefinement;
    use crate::domain::foundation::LocationId;
    use crate::domain::matching::MatchResult;
    use crate::domain::profile::Identity;
    use crate::domain::story::StoryCatalog;
    use serde_json::json;

    async fn matched_session(repo: &InMemorySessionRepository) -> Session {
        let catalog = StoryCatalog::builtin();
        let mut session = Session::start(Identity::new("Ada", 30, "").unwrap());
        for _ in 0..catalog.scenarios().len() {
            session.choose(catalog.scenarios(), 0).unwrap();
        }
        session
            .complete_onboarding(ProfileRefinement::unconfigured(*session.traits()))
            .unwrap();
        session.begin_check_in().unwrap();
        let me = session.profile().unwrap().clone();
        let result = MatchResult::find(&me, catalog.candidates()).unwrap();
        session
            .record_match(LocationId::new("loc-1").unwrap(), result)
            .unwrap();
        repo.save(&session).await.unwrap();
        session
    }

    #[tokio::test]
    async fn unconfigured_returns_default_ritual() {
        let repo = Arc::new(InMemorySessionRepository::new());
        let session = matched_session(&repo).await;
        let handler = GetMeetingRitualHandler::new(repo, Arc::new(LlmEnricher::unconfigured()));

        let ritual = handler
            .handle(GetMeetingRitualQuery {
                session_id: *session.id(),
            })
            .await
            .unwrap();
        assert_eq!(ritual, Icebreaker::unconfigured());
    }

    #[tokio::test]
    async fn ritual_is_generated_once_per_match_screen() {
        let model = MockGenerativeModel::new().with_json(json!({
            "title": "Two Truths",
            "topic": "Surprises",
            "steps": ["Each share two truths and a lie."],
        }));
        let repo = Arc::new(InMemorySessionRepository::new());
        let session = matched_session(&repo).await;
        let handler =
            GetMeetingRitualHandler::new(repo, Arc::new(LlmEnricher::new(Arc::new(model.clone()))));
        let query = GetMeetingRitualQuery {
            session_id: *session.id(),
        };

        let first = handler.handle(query.clone()).await.unwrap();
        let second = handler.handle(query).await.unwrap();

        assert_eq!(first.title, "Two Truths");
        assert_eq!(first, second);
        assert_eq!(model.structured_call_count(), 1);
        assert!(model.get_structured_calls()[0].prompt.contains("Person A: Ada"));
    }

    #[tokio::test]
    async fn no_match_is_invalid_state() {
        let repo = Arc::new(InMemorySessionRepository::new());
        let session = Session::start(Identity::new("Ada", 30, "").unwrap());
        repo.save(&session).await.unwrap();
        let handler = GetMeetingRitualHandler::new(repo, Arc::new(LlmEnricher::unconfigured()));

        let err = handler
            .handle(GetMeetingRitualQuery {
                session_id: *session.id(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidState(_)));
    }

    #[tokio::test]
    async fn closing_the_match_releases_the_cached_ritual() {
        let repo = Arc::new(InMemorySessionRepository::new());
        let session = matched_session(&repo).await;
        let handler =
            GetMeetingRitualHandler::new(repo.clone(), Arc::new(LlmEnricher::unconfigured()));
        let query = GetMeetingRitualQuery {
            session_id: *session.id(),
        };

        handler.handle(query.clone()).await.unwrap();
        assert_eq!(handler.cached_screens(), 1);

        let mut closed = repo.find_by_id(session.id()).await.unwrap().unwrap();
        closed.close_match().unwrap();
        let closed = repo.update(&closed).await.unwrap();
        handler.release_if_left(&closed);
        assert_eq!(handler.cached_screens(), 0);

        let err = handler.handle(query).await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidState(_)));
    }
}
