//! Story module - onboarding chapters, candidate pool and locations.

mod catalog;
mod location;
mod scenario;

pub use catalog::{CatalogError, StoryCatalog};
pub use location::{Location, LocationKind};
pub use scenario::{StoryChoice, StoryScenario};
