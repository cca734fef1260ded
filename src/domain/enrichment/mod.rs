//! Enrichment module - values returned by the generative-AI collaborator.
//!
//! Every enrichment has a fixed fallback so callers never see a failure.

mod values;

pub use values::{Icebreaker, Illustration, ProfileRefinement, FAILED_BIO, UNCONFIGURED_BIO};
