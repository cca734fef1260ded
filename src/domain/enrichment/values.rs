//! Values produced by the generative-AI enrichment calls, and their fallbacks.

use serde::{Deserialize, Serialize};

use crate::domain::personality::TraitVector;

/// Bio used when no model credential is configured.
pub const UNCONFIGURED_BIO: &str = "A survivor who balances caution with curiosity. Your choices suggest you value both structure and human connection in a chaotic world.";

/// Bio used when the model call fails or returns something unusable.
pub const FAILED_BIO: &str =
    "A balanced individual with a multifaceted personality, capable of adapting to the new world.";

/// Outcome of profile refinement: final traits plus a short bio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRefinement {
    pub traits: TraitVector,
    pub bio: String,
}

impl ProfileRefinement {
    /// Computed traits, unchanged, with the "no credential" bio.
    pub fn unconfigured(computed: TraitVector) -> Self {
        Self {
            traits: computed,
            bio: UNCONFIGURED_BIO.to_string(),
        }
    }

    /// Computed traits, unchanged, with the "call failed" bio.
    pub fn failed(computed: TraitVector) -> Self {
        Self {
            traits: computed,
            bio: FAILED_BIO.to_string(),
        }
    }
}

/// Icebreaker script ("meeting ritual") for two matched people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icebreaker {
    pub title: String,
    pub topic: String,
    pub steps: Vec<String>,
}

impl Icebreaker {
    pub fn new(
        title: impl Into<String>,
        topic: impl Into<String>,
        steps: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            title: title.into(),
            topic: topic.into(),
            steps: steps.into_iter().map(Into::into).collect(),
        }
    }

    /// Ritual shown when no model credential is configured.
    pub fn unconfigured() -> Self {
        Self::new(
            "The Common Ground",
            "The intersection of art and science.",
            [
                "Share your favorite book.",
                "Discuss why you chose your major.",
                "Plan a hypothetical trip together.",
            ],
        )
    }

    /// Ritual shown when the model call fails or returns something unusable.
    pub fn failed() -> Self {
        Self::new(
            "The Connection",
            "Life goals.",
            [
                "Take a deep breath together.",
                "Share one highlight of your week.",
                "High five.",
            ],
        )
    }
}

/// Generated image for a story chapter.
#[derive(Clone, PartialEq, Eq)]
pub struct Illustration {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Illustration {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

impl std::fmt::Debug for Illustration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Illustration")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
