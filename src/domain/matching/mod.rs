//! Matching module - compatibility scoring against the candidate pool.

mod matcher;
mod result;
mod score;

pub use matcher::{best_match, compatibility_score, trait_distance, MatchError};
pub use result::{shared_traits, MatchResult, SHARED_TRAIT_TOLERANCE};
pub use score::CompatibilityScore;
