//! Property tests for story accumulation and matching over the built-in
//! catalog.

use proptest::prelude::*;

use kinship::domain::foundation::ProfileId;
use kinship::domain::matching::{best_match, compatibility_score, MatchError, MatchResult};
use kinship::domain::personality::{accumulate, TraitVector};
use kinship::domain::profile::Profile;
use kinship::domain::story::StoryCatalog;

fn trait_vector() -> impl Strategy<Value = TraitVector> {
    prop::array::uniform5(0u8..=100).prop_map(|[o, c, e, a, n]| {
        TraitVector::new(o, c, e, a, n).unwrap()
    })
}

fn candidate(i: usize, traits: TraitVector) -> Profile {
    Profile::new(
        ProfileId::new(format!("c-{i}")).unwrap(),
        format!("Candidate {i}"),
        25,
        "",
        traits,
    )
}

/// Index paths through the built-in story, one choice per chapter.
fn story_path() -> impl Strategy<Value = Vec<usize>> {
    let catalog = StoryCatalog::builtin();
    catalog
        .scenarios()
        .iter()
        .map(|s| 0..s.choices.len())
        .collect::<Vec<_>>()
}

proptest! {
    #[test]
    fn any_story_path_stays_in_range(path in story_path()) {
        let catalog = StoryCatalog::builtin();
        let deltas = catalog
            .scenarios()
            .iter()
            .zip(&path)
            .map(|(s, &i)| &s.choices[i].impact);

        let traits = accumulate(TraitVector::midpoint(), deltas);
        for score in traits.to_array() {
            prop_assert!(score <= 100);
        }
    }

    #[test]
    fn best_match_is_a_maximum_of_the_pool(
        me in trait_vector(),
        pool in prop::collection::vec(trait_vector(), 1..12),
    ) {
        let candidates: Vec<Profile> = pool
            .iter()
            .enumerate()
            .map(|(i, t)| candidate(i, *t))
            .collect();

        let (best, score) = best_match(&me, &candidates).unwrap();
        let best_index = candidates.iter().position(|c| c.id() == best.id()).unwrap();

        for (i, c) in candidates.iter().enumerate() {
            let other = compatibility_score(&me, c.traits());
            prop_assert!(other <= score);
            if i < best_index {
                prop_assert!(other < score, "an earlier candidate tied the winner");
            }
        }
    }

    #[test]
    fn builtin_pool_always_yields_a_match(me in trait_vector()) {
        let own = Profile::new(ProfileId::own(), "Me", 30, "", me);
        let result = MatchResult::find(&own, StoryCatalog::builtin().candidates()).unwrap();
        prop_assert!(result.compatibility.value() <= 100);
        prop_assert!(!result.candidate.id().is_own());
    }
}

#[test]
fn empty_pool_is_an_error_not_a_default() {
    let err = best_match(&TraitVector::midpoint(), &[]).unwrap_err();
    assert_eq!(err, MatchError::EmptyCandidatePool);
}

#[test]
fn matching_a_catalog_candidate_exactly_scores_perfect() {
    let catalog = StoryCatalog::builtin();
    for target in catalog.candidates() {
        let (best, score) = best_match(target.traits(), catalog.candidates()).unwrap();
        assert_eq!(score.value(), 100);
        assert_eq!(best.id(), target.id());
    }
}
