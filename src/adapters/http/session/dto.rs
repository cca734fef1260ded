//! HTTP DTOs for session endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::enrichment::Icebreaker;
use crate::domain::matching::MatchResult;
use crate::domain::personality::TraitVector;
use crate::domain::profile::Profile;
use crate::domain::session::{OnboardingStage, Session, ViewState};
use crate::domain::story::{Location, LocationKind, StoryScenario};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Identity form submitted before the story starts.
#[derive(Debug, Clone, Deserialize)]
pub struct StartSessionRequest {
    pub name: String,
    pub age: u16,
    #[serde(default)]
    pub education: String,
}

/// Choice made on the current chapter.
#[derive(Debug, Clone, Deserialize)]
pub struct ChooseOptionRequest {
    pub choice_index: usize,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraitsResponse {
    pub openness: u8,
    pub conscientiousness: u8,
    pub extraversion: u8,
    pub agreeableness: u8,
    pub neuroticism: u8,
}

impl From<&TraitVector> for TraitsResponse {
    fn from(traits: &TraitVector) -> Self {
        Self {
            openness: traits.openness(),
            conscientiousness: traits.conscientiousness(),
            extraversion: traits.extraversion(),
            agreeableness: traits.agreeableness(),
            neuroticism: traits.neuroticism(),
        }
    }
}

/// The chapter currently shown during onboarding.
#[derive(Debug, Clone, Serialize)]
pub struct ChapterResponse {
    /// Zero-based chapter index.
    pub index: usize,
    pub total: usize,
    pub title: String,
    pub narrative: String,
    pub choices: Vec<String>,
}

impl ChapterResponse {
    fn new(index: usize, total: usize, scenario: &StoryScenario) -> Self {
        Self {
            index,
            total,
            title: scenario.chapter_title.clone(),
            narrative: scenario.narrative.clone(),
            choices: scenario.choice_labels().map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub name: String,
    pub age: u16,
    pub education: String,
    pub traits: TraitsResponse,
    pub bio: String,
    pub influence_score: u32,
    pub connections: u32,
    pub avatar_url: String,
}

impl From<&Profile> for ProfileResponse {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id().to_string(),
            name: profile.name().to_string(),
            age: profile.age(),
            education: profile.education().to_string(),
            traits: profile.traits().into(),
            bio: profile.bio().to_string(),
            influence_score: profile.influence_score(),
            connections: profile.connections(),
            avatar_url: profile.avatar_url().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    pub candidate: ProfileResponse,
    /// Whole percent, 0..=100.
    pub compatibility: u8,
    pub shared_traits: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
}

impl MatchResponse {
    fn new(result: &MatchResult, location_id: Option<String>) -> Self {
        Self {
            candidate: (&result.candidate).into(),
            compatibility: result.compatibility.value(),
            shared_traits: result.shared_traits.clone(),
            location_id,
        }
    }
}

/// Session snapshot: everything the current screen needs.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub view: ViewState,
    pub stage: OnboardingStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter: Option<ChapterResponse>,
    pub traits: TraitsResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileResponse>,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub current_match: Option<MatchResponse>,
    pub version: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl SessionResponse {
    pub fn from_session(session: &Session, scenarios: &[StoryScenario]) -> Self {
        let chapter = session
            .current_scenario(scenarios)
            .map(|s| ChapterResponse::new(session.chapter(), scenarios.len(), s));
        let location_id = session.check_in_location().map(|id| id.to_string());

        Self {
            id: session.id().to_string(),
            view: session.view(),
            stage: session.stage(),
            chapter,
            traits: session.traits().into(),
            profile: session.profile().map(Into::into),
            current_match: session
                .current_match()
                .map(|m| MatchResponse::new(m, location_id)),
            version: session.version(),
            created_at: session.created_at().to_rfc3339(),
            updated_at: session.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: LocationKind,
    pub distance: String,
    pub attendees: u32,
}

impl From<&Location> for LocationResponse {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id.to_string(),
            name: location.name.clone(),
            kind: location.kind,
            distance: location.distance.clone(),
            attendees: location.attendees,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckInResponse {
    pub location: LocationResponse,
    pub session: SessionResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct IcebreakerResponse {
    pub title: String,
    pub topic: String,
    pub steps: Vec<String>,
}

impl From<Icebreaker> for IcebreakerResponse {
    fn from(icebreaker: Icebreaker) -> Self {
        Self {
            title: icebreaker.title,
            topic: icebreaker.topic,
            steps: icebreaker.steps,
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
            details: None,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            code: "CONFLICT".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
