//! Prompts and response schemas for the enrichment calls.

use serde_json::{json, Value};

use crate::domain::personality::TraitVector;
use crate::domain::profile::Profile;

/// Prompt asking for a bio and refined traits from the story choices.
pub fn refine_profile_prompt(decisions: &[String], computed: &TraitVector) -> String {
    let numbered = decisions
        .iter()
        .enumerate()
        .map(|(i, d)| format!("{}. {}", i + 1, d))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"A player just finished a five-chapter survival story set after a global memory loss.
Each choice they made nudged their Big Five personality scores.

Choices, in order:
{}

Scores computed from those choices (0-100):
{}

Write a psychological bio of at most two sentences, in the second person.
Adjust any score where the choices point more strongly one way than the numbers show.
Every score must stay between 0 and 100. Reply with JSON only."#,
        numbered,
        traits_json(computed)
    )
}

/// Prompt asking for an icebreaker activity for two matched people.
pub fn icebreaker_prompt(me: &Profile, other: &Profile) -> String {
    format!(
        r#"Two people just matched on Kinship, an app that pairs people by personality.

Person A: {}, {}, background: {}. Big Five scores: {}
Person B: {}, {}, background: {}. Big Five scores: {}

Invent a short "meeting ritual": an icebreaker activity that plays to both personalities.
Give it a title, a conversation topic and a few concrete steps. Reply with JSON only."#,
        me.name(),
        me.age(),
        or_unknown(me.education()),
        traits_json(me.traits()),
        other.name(),
        other.age(),
        or_unknown(other.education()),
        traits_json(other.traits()),
    )
}

/// Response schema for profile refinement.
pub fn refinement_schema() -> Value {
    let score = json!({ "type": "INTEGER" });
    json!({
        "type": "OBJECT",
        "properties": {
            "traits": {
                "type": "OBJECT",
                "properties": {
                    "openness": score,
                    "conscientiousness": score,
                    "extraversion": score,
                    "agreeableness": score,
                    "neuroticism": score,
                },
                "required": ["openness", "conscientiousness", "extraversion", "agreeableness", "neuroticism"],
            },
            "bio": { "type": "STRING" },
        },
        "required": ["traits", "bio"],
    })
}

/// Response schema for the meeting ritual.
pub fn icebreaker_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "topic": { "type": "STRING" },
            "steps": { "type": "ARRAY", "items": { "type": "STRING" } },
        },
        "required": ["title", "topic", "steps"],
    })
}

fn traits_json(traits: &TraitVector) -> String {
    serde_json::to_string(traits).unwrap_or_default()
}

fn or_unknown(s: &str) -> &str {
    if s.is_empty() {
        "not given"
    } else {
        s
    }
}
