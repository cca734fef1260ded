//! IllustrateChapterHandler - image for the chapter currently shown.

use std::sync::Arc;
use std::time::Duration;

use crate::application::ScreenCache;
use crate::application::handlers::session::load_session;
use crate::domain::enrichment::Illustration;
use crate::domain::foundation::SessionId;
use crate::domain::session::{Session, SessionError};
use crate::domain::story::StoryCatalog;
use crate::ports::{ProfileEnricher, SessionRepository};

#[derive(Debug, Clone)]
pub struct IllustrateChapterQuery {
    pub session_id: SessionId,
}

pub struct IllustrateChapterHandler {
    repository: Arc<dyn SessionRepository>,
    enricher: Arc<dyn ProfileEnricher>,
    catalog: Arc<StoryCatalog>,
    cache: ScreenCache<Option<Illustration>>,
}

impl IllustrateChapterHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        enricher: Arc<dyn ProfileEnricher>,
        catalog: Arc<StoryCatalog>,
    ) -> Self {
        Self {
            repository,
            enricher,
            catalog,
            cache: ScreenCache::new(),
        }
    }

    /// Drops cached images for sessions idle longer than `idle_ttl`.
    pub fn with_idle_ttl(mut self, idle_ttl: Duration) -> Self {
        self.cache = ScreenCache::with_idle_ttl(idle_ttl);
        self
    }

    /// Frees the session's cached image once it no longer shows a chapter.
    pub fn release_if_left(&self, session: &Session) {
        if session.current_scenario(self.catalog.scenarios()).is_none()
            && self.cache.evict(session.id())
        {
            tracing::debug!(session_id = %session.id(), "Released chapter illustration");
        }
    }

    /// Number of sessions holding a cached image.
    pub fn cached_screens(&self) -> usize {
        self.cache.len()
    }

    /// Returns `None` when no image could be produced; callers show a
    /// placeholder.
    pub async fn handle(
        &self,
        query: IllustrateChapterQuery,
    ) -> Result<Option<Illustration>, SessionError> {
        let session = load_session(self.repository.as_ref(), &query.session_id).await?;
        let Some(scenario) = session.current_scenario(self.catalog.scenarios()) else {
            self.release_if_left(&session);
            return Err(SessionError::invalid_state("No story chapter is being shown"));
        };

        let enricher = self.enricher.clone();
        let prompt = scenario.visual_prompt.clone();
        self.cache
            .get_or_start(*session.id(), session.screen_entry(), move || async move {
                enricher.illustrate(&prompt).await
            })
            .await
            .map_err(|e| SessionError::infrastructure(e.to_string()))
    }
}
