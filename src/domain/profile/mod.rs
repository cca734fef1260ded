//! Profile module - identity form and matchable profiles.

mod identity;
#[allow(clippy::module_inception)]
mod profile;

pub use identity::Identity;
pub use profile::{Profile, OWN_AVATAR_URL};
