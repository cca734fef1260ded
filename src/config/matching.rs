//! Check-in configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingConfig {
    /// Simulated crowd scan before a match is shown, in milliseconds
    #[serde(default = "default_scan_delay")]
    pub scan_delay_ms: u64,
}

impl MatchingConfig {
    pub fn scan_delay(&self) -> Duration {
        Duration::from_millis(self.scan_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.scan_delay_ms > 30_000 {
            return Err(ValidationError::InvalidTimeout("matching.scan_delay_ms"));
        }
        Ok(())
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            scan_delay_ms: default_scan_delay(),
        }
    }
}

fn default_scan_delay() -> u64 {
    2500
}
