//! Trait accumulation: folding narrative decisions into a trait vector.
//!
//! Each decision is applied on its own and the result clamped to `[0, 100]`
//! before the next one. Summing all deltas first and clamping once gives a
//! different answer whenever an intermediate total leaves the range, so the
//! fold must stay step-by-step.

use super::traits::{Trait, TraitDelta, TraitVector};

/// Applies a single decision's deltas to a vector.
///
/// Traits without a delta keep their value; the rest become
/// `clamp(old + delta, 0, 100)`.
pub fn apply_decision(vector: TraitVector, delta: &TraitDelta) -> TraitVector {
    Trait::ALL.iter().fold(vector, |acc, &t| match delta.get(t) {
        Some(d) => acc.with(t, i64::from(acc.get(t)) + i64::from(d)),
        None => acc,
    })
}

/// Applies decisions strictly in the order given.
pub fn accumulate<'a, I>(start: TraitVector, decisions: I) -> TraitVector
where
    I: IntoIterator<Item = &'a TraitDelta>,
{
    decisions.into_iter().fold(start, apply_decision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_decisions_leave_the_midpoint() {
        let none: Vec<TraitDelta> = Vec::new();
        assert_eq!(
            accumulate(TraitVector::midpoint(), &none),
            TraitVector::midpoint()
        );
    }

    #[test]
    fn only_named_traits_move() {
        let delta = TraitDelta::new()
            .with(Trait::Conscientiousness, 20)
            .with(Trait::Neuroticism, -10);
        let v = apply_decision(TraitVector::midpoint(), &delta);
        assert_eq!(v.to_array(), [50, 70, 50, 50, 40]);
    }

    #[test]
    fn large_positive_delta_saturates_at_hundred() {
        let delta = TraitDelta::new().with(Trait::Openness, 1000);
        let once = apply_decision(TraitVector::midpoint(), &delta);
        let twice = apply_decision(once, &delta);
        assert_eq!(once.openness(), 100);
        assert_eq!(twice.openness(), 100);
    }

    #[test]
    fn large_negative_delta_saturates_at_zero() {
        let delta = TraitDelta::new().with(Trait::Agreeableness, -1000);
        let v = accumulate(TraitVector::midpoint(), [&delta, &delta]);
        assert_eq!(v.agreeableness(), 0);
    }

    #[test]
    fn clamping_happens_per_step_not_once_at_the_end() {
        let up = TraitDelta::new().with(Trait::Extraversion, 60);
        let down = TraitDelta::new().with(Trait::Extraversion, -60);

        // 50 + 60 clamps to 100, then 100 - 60 = 40. A summed pass would give 50.
        let v = accumulate(TraitVector::midpoint(), [&up, &down]);
        assert_eq!(v.extraversion(), 40);
    }

    #[test]
    fn order_matters_when_clamping_absorbs_a_delta() {
        let up = TraitDelta::new().with(Trait::Neuroticism, 60);
        let down = TraitDelta::new().with(Trait::Neuroticism, -60);

        let up_first = accumulate(TraitVector::midpoint(), [&up, &down]);
        let down_first = accumulate(TraitVector::midpoint(), [&down, &up]);
        assert_eq!(up_first.neuroticism(), 40);
        assert_eq!(down_first.neuroticism(), 60);
    }

    fn any_trait() -> impl Strategy<Value = Trait> {
        prop::sample::select(Trait::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn single_step_matches_clamped_sum(
            start in 0u8..=100,
            t in any_trait(),
            delta in -1000i32..=1000,
        ) {
            let before = TraitVector::uniform(start);
            let after = apply_decision(before, &TraitDelta::new().with(t, delta));
            let expected = (i64::from(start) + i64::from(delta)).clamp(0, 100) as u8;
            prop_assert_eq!(after.get(t), expected);
            for other in Trait::ALL.iter().filter(|o| **o != t) {
                prop_assert_eq!(after.get(*other), start);
            }
        }

        #[test]
        fn every_fold_stays_in_range(
            deltas in prop::collection::vec((any_trait(), -200i32..=200), 0..20),
        ) {
            let decisions: Vec<TraitDelta> = deltas
                .into_iter()
                .map(|(t, d)| TraitDelta::new().with(t, d))
                .collect();
            let v = accumulate(TraitVector::midpoint(), &decisions);
            prop_assert!(v.to_array().iter().all(|s| *s <= 100));
        }
    }
}
