//! Static story, candidate and location tables.
//!
//! The tables ship inside the binary and are parsed once on first use.

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::domain::foundation::LocationId;
use crate::domain::profile::Profile;

use super::{Location, StoryScenario};

const SCENARIOS_YAML: &str = include_str!("../../../data/scenarios.yaml");
const CANDIDATES_YAML: &str = include_str!("../../../data/candidates.yaml");
const LOCATIONS_YAML: &str = include_str!("../../../data/locations.yaml");

static BUILTIN: Lazy<StoryCatalog> = Lazy::new(|| {
    StoryCatalog::from_yaml(SCENARIOS_YAML, CANDIDATES_YAML, LOCATIONS_YAML)
        .expect("embedded catalog tables are valid")
});

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse {table} table: {source}")]
    Parse {
        table: &'static str,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{table} table: {reason}")]
    Invalid { table: &'static str, reason: String },
}

/// Everything the onboarding story and check-in flow read from.
#[derive(Debug, Clone)]
pub struct StoryCatalog {
    scenarios: Vec<StoryScenario>,
    candidates: Vec<Profile>,
    locations: Vec<Location>,
}

impl StoryCatalog {
    /// Parses and checks the three tables.
    ///
    /// Every chapter needs at least one choice. The candidate pool may be
    /// empty; matching reports that case itself.
    pub fn from_yaml(
        scenarios: &str,
        candidates: &str,
        locations: &str,
    ) -> Result<Self, CatalogError> {
        let scenarios: Vec<StoryScenario> = parse("scenarios", scenarios)?;
        let candidates: Vec<Profile> = parse("candidates", candidates)?;
        let locations: Vec<Location> = parse("locations", locations)?;

        if scenarios.is_empty() {
            return Err(CatalogError::Invalid {
                table: "scenarios",
                reason: "at least one chapter is required".to_string(),
            });
        }
        if let Some(s) = scenarios.iter().find(|s| s.choices.is_empty()) {
            return Err(CatalogError::Invalid {
                table: "scenarios",
                reason: format!("chapter {} has no choices", s.id),
            });
        }

        Ok(Self {
            scenarios,
            candidates,
            locations,
        })
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> &'static StoryCatalog {
        &BUILTIN
    }

    pub fn scenarios(&self) -> &[StoryScenario] {
        &self.scenarios
    }

    pub fn candidates(&self) -> &[Profile] {
        &self.candidates
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn location(&self, id: &LocationId) -> Option<&Location> {
        self.locations.iter().find(|l| &l.id == id)
    }
}

fn parse<T: serde::de::DeserializeOwned>(
    table: &'static str,
    yaml: &str,
) -> Result<Vec<T>, CatalogError> {
    serde_yaml::from_str(yaml).map_err(|source| CatalogError::Parse { table, source })
}
