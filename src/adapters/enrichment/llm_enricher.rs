//! ProfileEnricher backed by a generative model.
//!
//! Without a model every call returns the "unconfigured" fallback. With one,
//! each call is attempted once; any error or unusable answer is logged and
//! replaced by the "failed" fallback.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::enrichment::{Icebreaker, Illustration, ProfileRefinement};
use crate::domain::personality::TraitVector;
use crate::domain::profile::Profile;
use crate::ports::{GenerativeModel, ImageRequest, ProfileEnricher, StructuredRequest};

use super::prompts;

pub struct LlmEnricher {
    model: Option<Arc<dyn GenerativeModel>>,
}

impl LlmEnricher {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model: Some(model) }
    }

    /// An enricher with no model; every call returns its fallback.
    pub fn unconfigured() -> Self {
        Self { model: None }
    }

    pub fn from_optional(model: Option<Arc<dyn GenerativeModel>>) -> Self {
        Self { model }
    }

    pub fn is_configured(&self) -> bool {
        self.model.is_some()
    }
}

#[async_trait]
impl ProfileEnricher for LlmEnricher {
    async fn refine_profile(
        &self,
        decisions: &[String],
        computed: TraitVector,
    ) -> ProfileRefinement {
        let Some(model) = &self.model else {
            tracing::warn!("No generative model configured, using default profile analysis");
            return ProfileRefinement::unconfigured(computed);
        };

        let request = StructuredRequest::new(
            prompts::refine_profile_prompt(decisions, &computed),
            prompts::refinement_schema(),
        );
        let outcome = model
            .generate_structured(request)
            .await
            .map_err(|e| e.to_string())
            .and_then(parse_refinement);

        match outcome {
            Ok(refinement) => refinement,
            Err(reason) => {
                tracing::warn!(%reason, "Profile refinement failed, using fallback");
                ProfileRefinement::failed(computed)
            }
        }
    }

    async fn suggest_icebreaker(&self, me: &Profile, other: &Profile) -> Icebreaker {
        let Some(model) = &self.model else {
            tracing::warn!("No generative model configured, using default meeting ritual");
            return Icebreaker::unconfigured();
        };

        let request = StructuredRequest::new(
            prompts::icebreaker_prompt(me, other),
            prompts::icebreaker_schema(),
        );
        let outcome = model
            .generate_structured(request)
            .await
            .map_err(|e| e.to_string())
            .and_then(parse_icebreaker);

        match outcome {
            Ok(icebreaker) => icebreaker,
            Err(reason) => {
                tracing::warn!(%reason, "Icebreaker generation failed, using fallback");
                Icebreaker::failed()
            }
        }
    }

    async fn illustrate(&self, prompt: &str) -> Option<Illustration> {
        let Some(model) = &self.model else {
            tracing::warn!("No generative model configured, skipping illustration");
            return None;
        };

        match model.generate_image(ImageRequest::new(prompt)).await {
            Ok(Some(image)) => Some(image),
            Ok(None) => {
                tracing::warn!("Image model returned no image data");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Illustration failed");
                None
            }
        }
    }
}

/// Model answer for refinement. Every trait is required.
#[derive(Debug, Deserialize)]
struct RefinementAnswer {
    traits: TraitAnswer,
    bio: String,
}

#[derive(Debug, Deserialize)]
struct TraitAnswer {
    openness: f64,
    conscientiousness: f64,
    extraversion: f64,
    agreeableness: f64,
    neuroticism: f64,
}

#[derive(Debug, Deserialize)]
struct IcebreakerAnswer {
    title: String,
    topic: String,
    steps: Vec<String>,
}

fn parse_refinement(value: serde_json::Value) -> Result<ProfileRefinement, String> {
    let answer: RefinementAnswer =
        serde_json::from_value(value).map_err(|e| format!("malformed refinement: {}", e))?;
    let bio = answer.bio.trim();
    if bio.is_empty() {
        return Err("refinement has an empty bio".to_string());
    }

    let t = answer.traits;
    Ok(ProfileRefinement {
        traits: TraitVector::clamped(
            score(t.openness),
            score(t.conscientiousness),
            score(t.extraversion),
            score(t.agreeableness),
            score(t.neuroticism),
        ),
        bio: bio.to_string(),
    })
}

fn parse_icebreaker(value: serde_json::Value) -> Result<Icebreaker, String> {
    let answer: IcebreakerAnswer =
        serde_json::from_value(value).map_err(|e| format!("malformed icebreaker: {}", e))?;
    let steps: Vec<String> = answer
        .steps
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if answer.title.trim().is_empty() || steps.is_empty() {
        return Err("icebreaker is missing a title or steps".to_string());
    }
    Ok(Icebreaker::new(
        answer.title.trim(),
        answer.topic.trim(),
        steps,
    ))
}

fn score(value: f64) -> i64 {
    if value.is_finite() {
        value.round() as i64
    } else {
        0
    }
}
