//! Brute-force best-match scan over a candidate pool.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::personality::{Trait, TraitVector};
use crate::domain::profile::Profile;

use super::CompatibilityScore;

/// Errors from the matcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("candidate pool is empty")]
    EmptyCandidatePool,
}

impl From<MatchError> for DomainError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::EmptyCandidatePool => {
                DomainError::new(ErrorCode::EmptyCandidatePool, err.to_string())
            }
        }
    }
}

/// Sum of absolute differences across the five traits, in `[0, 500]`.
pub fn trait_distance(a: &TraitVector, b: &TraitVector) -> u32 {
    Trait::ALL
        .iter()
        .map(|&t| u32::from(a.get(t).abs_diff(b.get(t))))
        .sum()
}

pub fn compatibility_score(a: &TraitVector, b: &TraitVector) -> CompatibilityScore {
    CompatibilityScore::from_distance(trait_distance(a, b))
}

/// Returns the highest-scoring candidate and its score.
///
/// The first candidate is the initial best and is only replaced by a strictly
/// greater score, so ties resolve to the earliest candidate.
pub fn best_match<'a>(
    me: &TraitVector,
    candidates: &'a [Profile],
) -> Result<(&'a Profile, CompatibilityScore), MatchError> {
    let (first, rest) = candidates
        .split_first()
        .ok_or(MatchError::EmptyCandidatePool)?;

    let mut best = (first, compatibility_score(me, first.traits()));
    for candidate in rest {
        let score = compatibility_score(me, candidate.traits());
        if score > best.1 {
            best = (candidate, score);
        }
    }
    Ok(best)
}
