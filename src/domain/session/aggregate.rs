//! Session aggregate.
//!
//! A session is one user's run through the app: identity form, onboarding
//! story, dashboard and check-ins. It owns the user's single profile and
//! current match; both are replaced wholesale, never patched.
//!
//! # Invariants
//!
//! - `traits` is the accumulator result for the choices made so far
//! - `profile` is set exactly once, when onboarding completes
//! - `current_match` is present only on the MatchFound screen
//! - `screen_entry` increases on every screen or chapter change

use serde::{Deserialize, Serialize};

use crate::domain::enrichment::ProfileRefinement;
use crate::domain::foundation::{
    DomainError, ErrorCode, LocationId, SessionId, StateMachine, Timestamp, ValidationError,
};
use crate::domain::matching::MatchResult;
use crate::domain::personality::{apply_decision, TraitVector};
use crate::domain::profile::{Identity, Profile};
use crate::domain::story::StoryScenario;

use super::{OnboardingStage, ViewState};

/// What happened after a story choice was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceOutcome {
    /// Another chapter follows, at this index.
    Continue { chapter: usize },
    /// That was the last chapter; the profile awaits refinement.
    StoryComplete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    identity: Identity,
    view: ViewState,
    stage: OnboardingStage,
    /// Index of the chapter currently shown.
    chapter: usize,
    traits: TraitVector,
    /// Labels of the choices made, in order.
    decisions: Vec<String>,
    profile: Option<Profile>,
    current_match: Option<MatchResult>,
    check_in_location: Option<LocationId>,
    screen_entry: u64,
    version: u64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Session {
    /// Starts a session on the first chapter with midpoint traits.
    pub fn start(identity: Identity) -> Self {
        let now = Timestamp::now();
        Self {
            id: SessionId::new(),
            identity,
            view: ViewState::Onboarding,
            stage: OnboardingStage::Story,
            chapter: 0,
            traits: TraitVector::midpoint(),
            decisions: Vec::new(),
            profile: None,
            current_match: None,
            check_in_location: None,
            screen_entry: 0,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn stage(&self) -> OnboardingStage {
        self.stage
    }

    pub fn chapter(&self) -> usize {
        self.chapter
    }

    pub fn traits(&self) -> &TraitVector {
        &self.traits
    }

    pub fn decisions(&self) -> &[String] {
        &self.decisions
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn current_match(&self) -> Option<&MatchResult> {
        self.current_match.as_ref()
    }

    pub fn check_in_location(&self) -> Option<&LocationId> {
        self.check_in_location.as_ref()
    }

    /// Counter identifying the current screen instance.
    pub fn screen_entry(&self) -> u64 {
        self.screen_entry
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// The chapter being played, if the story is still in progress.
    pub fn current_scenario<'a>(&self, scenarios: &'a [StoryScenario]) -> Option<&'a StoryScenario> {
        if self.view == ViewState::Onboarding && self.stage == OnboardingStage::Story {
            scenarios.get(self.chapter)
        } else {
            None
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies choice `index` of the current chapter.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the story is not in progress
    /// - `ValidationFailed` if `index` is not a choice of the chapter
    pub fn choose(
        &mut self,
        scenarios: &[StoryScenario],
        index: usize,
    ) -> Result<ChoiceOutcome, DomainError> {
        let scenario = self.current_scenario(scenarios).ok_or_else(|| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Story is not in progress",
            )
        })?;
        let choice = scenario.choice(index).ok_or_else(|| {
            ValidationError::out_of_range(
                "choice",
                0,
                scenario.choices.len() as i64 - 1,
                index as i64,
            )
        })?;

        self.traits = apply_decision(self.traits, &choice.impact);
        self.decisions.push(choice.text.clone());
        self.chapter += 1;
        self.screen_entry += 1;
        self.updated_at = Timestamp::now();

        if self.chapter >= scenarios.len() {
            self.stage = self.stage.transition_to(OnboardingStage::Analyzing)?;
            Ok(ChoiceOutcome::StoryComplete)
        } else {
            Ok(ChoiceOutcome::Continue {
                chapter: self.chapter,
            })
        }
    }

    /// Builds the user's profile and moves to the dashboard.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the story just finished
    pub fn complete_onboarding(
        &mut self,
        refinement: ProfileRefinement,
    ) -> Result<&Profile, DomainError> {
        if self.stage != OnboardingStage::Analyzing || self.profile.is_some() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Onboarding is not awaiting analysis",
            ));
        }
        let stage = self.stage.transition_to(OnboardingStage::Complete)?;
        self.transition(ViewState::Dashboard)?;

        let profile = Profile::own(&self.identity, refinement);
        self.traits = *profile.traits();
        self.stage = stage;
        Ok(self.profile.insert(profile))
    }

    /// Dashboard -> CheckIn.
    pub fn begin_check_in(&mut self) -> Result<(), DomainError> {
        self.transition(ViewState::CheckIn)?;
        self.check_in_location = None;
        Ok(())
    }

    /// CheckIn -> Dashboard.
    pub fn cancel_check_in(&mut self) -> Result<(), DomainError> {
        self.transition(ViewState::Dashboard)?;
        self.check_in_location = None;
        Ok(())
    }

    /// CheckIn -> MatchFound, storing the match.
    pub fn record_match(
        &mut self,
        location: LocationId,
        result: MatchResult,
    ) -> Result<(), DomainError> {
        self.transition(ViewState::MatchFound)?;
        self.check_in_location = Some(location);
        self.current_match = Some(result);
        Ok(())
    }

    /// MatchFound -> Dashboard, discarding the match.
    pub fn close_match(&mut self) -> Result<(), DomainError> {
        self.transition(ViewState::Dashboard)?;
        self.current_match = None;
        self.check_in_location = None;
        Ok(())
    }

    /// Called by repositories after a successful write.
    pub(crate) fn increment_version(&mut self) {
        self.version += 1;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn transition(&mut self, target: ViewState) -> Result<(), DomainError> {
        if !self.view.can_transition_to(&target) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot move from {} to {}", self.view, target),
            ));
        }
        self.view = target;
        self.screen_entry += 1;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}
