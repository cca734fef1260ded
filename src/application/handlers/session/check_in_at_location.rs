//! CheckInAtLocationHandler - scans a location's crowd and records the best
//! match.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::{LocationId, SessionId};
use crate::domain::matching::MatchResult;
use crate::domain::session::{Session, SessionError, ViewState};
use crate::domain::story::{Location, StoryCatalog};
use crate::ports::SessionRepository;

use super::get_session::load_session;

#[derive(Debug, Clone)]
pub struct CheckInAtLocationCommand {
    pub session_id: SessionId,
    pub location_id: LocationId,
}

#[derive(Debug, Clone)]
pub struct CheckInAtLocationResult {
    pub session: Session,
    pub location: Location,
}

pub struct CheckInAtLocationHandler {
    repository: Arc<dyn SessionRepository>,
    catalog: Arc<StoryCatalog>,
    scan_delay: Duration,
}

impl CheckInAtLocationHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        catalog: Arc<StoryCatalog>,
        scan_delay: Duration,
    ) -> Self {
        Self {
            repository,
            catalog,
            scan_delay,
        }
    }

    /// # Errors
    ///
    /// - `LocationNotFound` for an unknown location
    /// - `InvalidState` unless the session is on the CheckIn screen, or if
    ///   the candidate pool is empty
    /// - `Conflict` if the session changed during the scan
    pub async fn handle(
        &self,
        cmd: CheckInAtLocationCommand,
    ) -> Result<CheckInAtLocationResult, SessionError> {
        let location = self
            .catalog
            .location(&cmd.location_id)
            .cloned()
            .ok_or_else(|| SessionError::location_not_found(cmd.location_id.clone()))?;

        let mut session = load_session(self.repository.as_ref(), &cmd.session_id).await?;
        if session.view() != ViewState::CheckIn {
            return Err(SessionError::invalid_state(format!(
                "Cannot check in from {}",
                session.view()
            )));
        }
        let me = session
            .profile()
            .cloned()
            .ok_or_else(|| SessionError::invalid_state("Profile has not been created"))?;

        tracing::info!(
            session_id = %session.id(),
            location = %location.name,
            attendees = location.attendees,
            "Scanning crowd"
        );
        if !self.scan_delay.is_zero() {
            tokio::time::sleep(self.scan_delay).await;
        }

        let result = MatchResult::find(&me, self.catalog.candidates())?;
        tracing::info!(
            session_id = %session.id(),
            candidate = %result.candidate.id(),
            compatibility = result.compatibility.value(),
            "Match found"
        );

        session.record_match(location.id.clone(), result)?;
        let session = self.repository.update(&session).await?;

        Ok(CheckInAtLocationResult { session, location })
    }
}
