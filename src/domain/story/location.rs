//! Check-in locations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::LocationId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    University,
    Cafe,
    #[serde(rename = "Co-working")]
    CoWorking,
    #[serde(rename = "Public Space")]
    PublicSpace,
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LocationKind::University => "University",
            LocationKind::Cafe => "Cafe",
            LocationKind::CoWorking => "Co-working",
            LocationKind::PublicSpace => "Public Space",
        };
        f.write_str(s)
    }
}

/// A place the user can check in at to scan for matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub kind: LocationKind,
    /// Display label, e.g. "0.2 km".
    pub distance: String,
    pub attendees: u32,
}
