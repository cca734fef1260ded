//! Personality module - Big Five trait modeling.
//!
//! - `traits` - the bounded `TraitVector` and partial `TraitDelta`
//! - `accumulator` - folds narrative decisions into a vector, clamping per step

mod accumulator;
mod traits;

pub use accumulator::{accumulate, apply_decision};
pub use traits::{Trait, TraitDelta, TraitVector};
