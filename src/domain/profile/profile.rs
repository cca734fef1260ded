//! Profile - a person that can be matched.

use serde::{Deserialize, Serialize};

use crate::domain::enrichment::ProfileRefinement;
use crate::domain::foundation::ProfileId;
use crate::domain::personality::TraitVector;

use super::Identity;

/// Avatar shown for the session's own profile.
pub const OWN_AVATAR_URL: &str = "https://picsum.photos/200/200?grayscale";

/// A matchable person: identity, trait vector and social metrics.
///
/// Candidate profiles come from the static catalog and never change. The
/// session's own profile is built once, when onboarding completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    id: ProfileId,
    name: String,
    age: u16,
    #[serde(default)]
    education: String,
    traits: TraitVector,
    #[serde(default)]
    bio: String,
    #[serde(default)]
    influence_score: u32,
    #[serde(default)]
    connections: u32,
    #[serde(default)]
    avatar_url: String,
}

impl Profile {
    pub fn new(
        id: ProfileId,
        name: impl Into<String>,
        age: u16,
        education: impl Into<String>,
        traits: TraitVector,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            education: education.into(),
            traits,
            bio: String::new(),
            influence_score: 0,
            connections: 0,
            avatar_url: String::new(),
        }
    }

    /// Builds the session's own profile from the identity form and the
    /// (possibly refined) onboarding result.
    pub fn own(identity: &Identity, refinement: ProfileRefinement) -> Self {
        Self::new(
            ProfileId::own(),
            identity.name(),
            identity.age(),
            identity.education(),
            refinement.traits,
        )
        .with_bio(refinement.bio)
        .with_avatar_url(OWN_AVATAR_URL)
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    pub fn with_avatar_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = url.into();
        self
    }

    pub fn id(&self) -> &ProfileId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u16 {
        self.age
    }

    pub fn education(&self) -> &str {
        &self.education
    }

    pub fn traits(&self) -> &TraitVector {
        &self.traits
    }

    pub fn bio(&self) -> &str {
        &self.bio
    }

    pub fn influence_score(&self) -> u32 {
        self.influence_score
    }

    pub fn connections(&self) -> u32 {
        self.connections
    }

    pub fn avatar_url(&self) -> &str {
        &self.avatar_url
    }
}
