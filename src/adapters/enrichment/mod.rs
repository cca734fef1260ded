//! Enrichment adapter - ProfileEnricher over a GenerativeModel.

mod llm_enricher;
mod prompts;

pub use llm_enricher::LlmEnricher;
