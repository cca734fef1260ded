//! Match result and shared-trait labels.

use serde::{Deserialize, Serialize};

use crate::domain::personality::Trait;
use crate::domain::profile::Profile;

use super::{best_match, CompatibilityScore, MatchError};

/// Largest per-trait gap still counted as "shared".
pub const SHARED_TRAIT_TOLERANCE: u8 = 15;
const HIGH_THRESHOLD: u8 = 65;
const LOW_THRESHOLD: u8 = 35;

/// The selected candidate with its score and what the two people share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub candidate: Profile,
    pub compatibility: CompatibilityScore,
    pub shared_traits: Vec<String>,
}

impl MatchResult {
    /// Finds the best candidate for `me`, skipping any entry with the same id.
    pub fn find(me: &Profile, candidates: &[Profile]) -> Result<Self, MatchError> {
        let pool: Vec<Profile> = candidates
            .iter()
            .filter(|c| c.id() != me.id())
            .cloned()
            .collect();
        let (candidate, compatibility) = best_match(me.traits(), &pool)?;
        Ok(Self {
            shared_traits: shared_traits(me, candidate),
            candidate: candidate.clone(),
            compatibility,
        })
    }
}

/// Human-readable labels for traits (and background) two profiles share.
pub fn shared_traits(a: &Profile, b: &Profile) -> Vec<String> {
    let mut labels: Vec<String> = Trait::ALL
        .iter()
        .filter_map(|&t| {
            let (x, y) = (a.traits().get(t), b.traits().get(t));
            if x.abs_diff(y) > SHARED_TRAIT_TOLERANCE {
                return None;
            }
            let prefix = if x >= HIGH_THRESHOLD && y >= HIGH_THRESHOLD {
                "High"
            } else if x <= LOW_THRESHOLD && y <= LOW_THRESHOLD {
                "Low"
            } else {
                "Similar"
            };
            Some(format!("{} {}", prefix, t.display_name()))
        })
        .collect();

    let (ea, eb) = (a.education().trim(), b.education().trim());
    if !ea.is_empty() && ea.eq_ignore_ascii_case(eb) {
        labels.push("Similar Education".to_string());
    }
    labels
}
