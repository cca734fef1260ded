//! Big Five (OCEAN) trait vector and per-decision deltas.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::foundation::ValidationError;

/// One of the five OCEAN personality dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trait {
    Openness,
    Conscientiousness,
    Extraversion,
    Agreeableness,
    Neuroticism,
}

impl Trait {
    /// All traits in canonical OCEAN order.
    pub const ALL: [Trait; 5] = [
        Trait::Openness,
        Trait::Conscientiousness,
        Trait::Extraversion,
        Trait::Agreeableness,
        Trait::Neuroticism,
    ];

    /// Key used in JSON payloads and the story tables.
    pub fn key(&self) -> &'static str {
        match self {
            Trait::Openness => "openness",
            Trait::Conscientiousness => "conscientiousness",
            Trait::Extraversion => "extraversion",
            Trait::Agreeableness => "agreeableness",
            Trait::Neuroticism => "neuroticism",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Trait::Openness => "Openness",
            Trait::Conscientiousness => "Conscientiousness",
            Trait::Extraversion => "Extraversion",
            Trait::Agreeableness => "Agreeableness",
            Trait::Neuroticism => "Neuroticism",
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Five trait scores, each an integer in `[0, 100]`.
///
/// Fields are private so the range invariant cannot be bypassed; every
/// constructor either validates or clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTraitScores")]
pub struct TraitVector {
    openness: u8,
    conscientiousness: u8,
    extraversion: u8,
    agreeableness: u8,
    neuroticism: u8,
}

impl TraitVector {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 100;
    pub const MIDPOINT: u8 = 50;

    /// Creates a vector, rejecting any score above 100.
    pub fn new(
        openness: u8,
        conscientiousness: u8,
        extraversion: u8,
        agreeableness: u8,
        neuroticism: u8,
    ) -> Result<Self, ValidationError> {
        RawTraitScores {
            openness: i64::from(openness),
            conscientiousness: i64::from(conscientiousness),
            extraversion: i64::from(extraversion),
            agreeableness: i64::from(agreeableness),
            neuroticism: i64::from(neuroticism),
        }
        .try_into()
    }

    /// Every trait at 50, the starting point before any decision.
    pub fn midpoint() -> Self {
        Self::uniform(Self::MIDPOINT)
    }

    /// Every trait at the same score (clamped to 100).
    pub fn uniform(score: u8) -> Self {
        let score = score.min(Self::MAX);
        Self {
            openness: score,
            conscientiousness: score,
            extraversion: score,
            agreeableness: score,
            neuroticism: score,
        }
    }

    /// Builds a vector from arbitrary integers, clamping each into range.
    pub fn clamped(
        openness: i64,
        conscientiousness: i64,
        extraversion: i64,
        agreeableness: i64,
        neuroticism: i64,
    ) -> Self {
        Self {
            openness: clamp_score(openness),
            conscientiousness: clamp_score(conscientiousness),
            extraversion: clamp_score(extraversion),
            agreeableness: clamp_score(agreeableness),
            neuroticism: clamp_score(neuroticism),
        }
    }

    pub fn get(&self, t: Trait) -> u8 {
        match t {
            Trait::Openness => self.openness,
            Trait::Conscientiousness => self.conscientiousness,
            Trait::Extraversion => self.extraversion,
            Trait::Agreeableness => self.agreeableness,
            Trait::Neuroticism => self.neuroticism,
        }
    }

    /// Returns a copy with one trait replaced, clamped into range.
    pub fn with(mut self, t: Trait, score: i64) -> Self {
        let score = clamp_score(score);
        match t {
            Trait::Openness => self.openness = score,
            Trait::Conscientiousness => self.conscientiousness = score,
            Trait::Extraversion => self.extraversion = score,
            Trait::Agreeableness => self.agreeableness = score,
            Trait::Neuroticism => self.neuroticism = score,
        }
        self
    }

    pub fn openness(&self) -> u8 {
        self.openness
    }

    pub fn conscientiousness(&self) -> u8 {
        self.conscientiousness
    }

    pub fn extraversion(&self) -> u8 {
        self.extraversion
    }

    pub fn agreeableness(&self) -> u8 {
        self.agreeableness
    }

    pub fn neuroticism(&self) -> u8 {
        self.neuroticism
    }

    /// Scores in OCEAN order.
    pub fn to_array(&self) -> [u8; 5] {
        Trait::ALL.map(|t| self.get(t))
    }
}

impl Default for TraitVector {
    fn default() -> Self {
        Self::midpoint()
    }
}

fn clamp_score(value: i64) -> u8 {
    value.clamp(i64::from(TraitVector::MIN), i64::from(TraitVector::MAX)) as u8
}

/// Unvalidated wire shape; all five fields are required.
#[derive(Debug, Clone, Copy, Deserialize)]
struct RawTraitScores {
    openness: i64,
    conscientiousness: i64,
    extraversion: i64,
    agreeableness: i64,
    neuroticism: i64,
}

impl TryFrom<RawTraitScores> for TraitVector {
    type Error = ValidationError;

    fn try_from(raw: RawTraitScores) -> Result<Self, Self::Error> {
        let check = |t: Trait, value: i64| -> Result<u8, ValidationError> {
            if (i64::from(TraitVector::MIN)..=i64::from(TraitVector::MAX)).contains(&value) {
                Ok(value as u8)
            } else {
                Err(ValidationError::out_of_range(
                    t.key(),
                    i64::from(TraitVector::MIN),
                    i64::from(TraitVector::MAX),
                    value,
                ))
            }
        };

        Ok(Self {
            openness: check(Trait::Openness, raw.openness)?,
            conscientiousness: check(Trait::Conscientiousness, raw.conscientiousness)?,
            extraversion: check(Trait::Extraversion, raw.extraversion)?,
            agreeableness: check(Trait::Agreeableness, raw.agreeableness)?,
            neuroticism: check(Trait::Neuroticism, raw.neuroticism)?,
        })
    }
}

/// Partial map of trait to signed delta. Traits not present move by zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitDelta(BTreeMap<Trait, i32>);

impl TraitDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the delta for one trait.
    pub fn with(mut self, t: Trait, delta: i32) -> Self {
        self.0.insert(t, delta);
        self
    }

    pub fn get(&self, t: Trait) -> Option<i32> {
        self.0.get(&t).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Trait, i32)> + '_ {
        self.0.iter().map(|(t, d)| (*t, *d))
    }
}
