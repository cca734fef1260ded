//! Session domain module.
//!
//! A session walks one user through the four screens (onboarding, dashboard,
//! check-in, match found) and owns their profile and current match.

mod aggregate;
mod errors;
mod view_state;

pub use aggregate::{ChoiceOutcome, Session};
pub use errors::SessionError;
pub use view_state::{OnboardingStage, ViewState};
