//! ProfileEnricher port - the three enrichment calls the app makes.
//!
//! Every method is infallible: implementations swallow provider failures and
//! return the fixed fallback instead.

use async_trait::async_trait;

use crate::domain::enrichment::{Icebreaker, Illustration, ProfileRefinement};
use crate::domain::personality::TraitVector;
use crate::domain::profile::Profile;

#[async_trait]
pub trait ProfileEnricher: Send + Sync {
    /// Refines the computed traits and writes a short bio from the choices
    /// made during the story.
    async fn refine_profile(
        &self,
        decisions: &[String],
        computed: TraitVector,
    ) -> ProfileRefinement;

    /// Suggests a meeting ritual for two matched people.
    async fn suggest_icebreaker(&self, me: &Profile, other: &Profile) -> Icebreaker;

    /// Illustrates a story chapter. `None` means show a placeholder.
    async fn illustrate(&self, prompt: &str) -> Option<Illustration>;
}
