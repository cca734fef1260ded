//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machines)
//! - `personality` - OCEAN trait vector and decision accumulation
//! - `profile` - Identity form and matchable profiles
//! - `story` - Onboarding chapters, candidate pool and locations
//! - `matching` - Compatibility scoring and best-match selection
//! - `enrichment` - Values from the generative model and their fallbacks
//! - `session` - Session aggregate and screen routing

pub mod enrichment;
pub mod foundation;
pub mod matching;
pub mod personality;
pub mod profile;
pub mod session;
pub mod story;
