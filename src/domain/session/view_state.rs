//! Screen routing for a session.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// The screen a session is on.
///
/// Valid transitions:
/// - Onboarding -> Dashboard
/// - Dashboard -> CheckIn
/// - CheckIn -> MatchFound
/// - CheckIn -> Dashboard (cancel)
/// - MatchFound -> Dashboard (close)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Onboarding,
    Dashboard,
    CheckIn,
    MatchFound,
}

impl StateMachine for ViewState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ViewState::*;
        matches!(
            (self, target),
            (Onboarding, Dashboard)
                | (Dashboard, CheckIn)
                | (CheckIn, MatchFound)
                | (CheckIn, Dashboard)
                | (MatchFound, Dashboard)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ViewState::*;
        match self {
            Onboarding => vec![Dashboard],
            Dashboard => vec![CheckIn],
            CheckIn => vec![MatchFound, Dashboard],
            MatchFound => vec![Dashboard],
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ViewState::Onboarding => "Onboarding",
            ViewState::Dashboard => "Dashboard",
            ViewState::CheckIn => "CheckIn",
            ViewState::MatchFound => "MatchFound",
        };
        write!(f, "{}", s)
    }
}

/// Progress through the onboarding story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStage {
    /// Playing chapters.
    #[default]
    Story,
    /// Last choice made; waiting for profile refinement.
    Analyzing,
    /// Profile built.
    Complete,
}

impl StateMachine for OnboardingStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        use OnboardingStage::*;
        matches!((self, target), (Story, Analyzing) | (Analyzing, Complete))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use OnboardingStage::*;
        match self {
            Story => vec![Analyzing],
            Analyzing => vec![Complete],
            Complete => vec![],
        }
    }
}
