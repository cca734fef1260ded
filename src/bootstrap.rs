//! Composition root: wires repositories, enrichment and handlers into the
//! HTTP router.

use std::sync::Arc;

use axum::Router;

use crate::adapters::ai::{GeminiConfig, GeminiProvider};
use crate::adapters::enrichment::LlmEnricher;
use crate::adapters::http::{api_router, SessionHandlers};
use crate::adapters::storage::InMemorySessionRepository;
use crate::application::handlers::enrichment::{GetMeetingRitualHandler, IllustrateChapterHandler};
use crate::application::handlers::session::{
    CheckInAtLocationHandler, ChooseStoryOptionHandler, GetSessionHandler, NavigateViewHandler,
    StartOnboardingHandler,
};
use crate::config::{AiConfig, AppConfig};
use crate::domain::story::StoryCatalog;
use crate::ports::{AIError, GenerativeModel, ProfileEnricher, SessionRepository};

/// Builds the Gemini provider when an API key is configured.
pub fn generative_model(ai: &AiConfig) -> Result<Option<Arc<dyn GenerativeModel>>, AIError> {
    let Some(key) = ai.gemini_api_key.as_ref().filter(|_| ai.has_gemini()) else {
        return Ok(None);
    };

    let config = GeminiConfig::new(key.trim())
        .with_base_url(&ai.base_url)
        .with_text_model(&ai.text_model)
        .with_image_model(&ai.image_model)
        .with_aspect_ratio(&ai.image_aspect_ratio)
        .with_timeout(ai.timeout());
    let provider: Arc<dyn GenerativeModel> = Arc::new(GeminiProvider::new(config)?);
    Ok(Some(provider))
}

/// Builds the application router over in-memory storage and the given model.
pub fn build_router(config: &AppConfig, model: Option<Arc<dyn GenerativeModel>>) -> Router {
    let session_ttl = config.server.session_ttl();
    let repository: Arc<dyn SessionRepository> =
        Arc::new(InMemorySessionRepository::with_idle_ttl(session_ttl));
    let enricher: Arc<dyn ProfileEnricher> = Arc::new(LlmEnricher::from_optional(model));
    let catalog = Arc::new(StoryCatalog::builtin().clone());

    let handlers = SessionHandlers::new(
        Arc::new(StartOnboardingHandler::new(repository.clone())),
        Arc::new(GetSessionHandler::new(repository.clone())),
        Arc::new(ChooseStoryOptionHandler::new(
            repository.clone(),
            enricher.clone(),
            catalog.clone(),
        )),
        Arc::new(NavigateViewHandler::new(repository.clone())),
        Arc::new(CheckInAtLocationHandler::new(
            repository.clone(),
            catalog.clone(),
            config.matching.scan_delay(),
        )),
        Arc::new(
            IllustrateChapterHandler::new(repository.clone(), enricher.clone(), catalog.clone())
                .with_idle_ttl(session_ttl),
        ),
        Arc::new(GetMeetingRitualHandler::new(repository, enricher).with_idle_ttl(session_ttl)),
        catalog.clone(),
    );

    api_router(handlers, catalog, &config.server)
}
