//! Compatibility score value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer compatibility between two trait vectors, 0 to 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompatibilityScore(u8);

impl CompatibilityScore {
    pub const ZERO: Self = Self(0);
    pub const PERFECT: Self = Self(100);

    /// Creates a score, clamping to 100.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Converts a summed absolute trait difference (0..=500) into a score.
    ///
    /// `round(max(0, 100 - diff / 5))`. The quotient never lands on x.5, so
    /// integer rounding is exact.
    pub fn from_distance(diff: u32) -> Self {
        let remaining = 500u32.saturating_sub(diff);
        Self::new(((remaining + 2) / 5) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for CompatibilityScore {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for CompatibilityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
