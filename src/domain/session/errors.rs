//! Session-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, LocationId, SessionId};
use crate::domain::matching::MatchError;

/// Session-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Session was not found.
    NotFound(SessionId),
    /// Check-in location was not found.
    LocationNotFound(LocationId),
    /// Operation not valid on the current screen.
    InvalidState(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Session changed since it was loaded.
    Conflict(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl SessionError {
    pub fn not_found(id: SessionId) -> Self {
        SessionError::NotFound(id)
    }
    pub fn location_not_found(id: LocationId) -> Self {
        SessionError::LocationNotFound(id)
    }
    pub fn invalid_state(message: impl Into<String>) -> Self {
        SessionError::InvalidState(message.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn conflict(message: impl Into<String>) -> Self {
        SessionError::Conflict(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        SessionError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::LocationNotFound(_) => ErrorCode::LocationNotFound,
            SessionError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            SessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SessionError::Conflict(_) => ErrorCode::ConcurrentModification,
            SessionError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            SessionError::NotFound(id) => format!("Session not found: {}", id),
            SessionError::LocationNotFound(id) => format!("Location not found: {}", id),
            SessionError::InvalidState(msg) => format!("Invalid state: {}", msg),
            SessionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SessionError::Conflict(msg) => format!("Conflict: {}", msg),
            SessionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidStateTransition | ErrorCode::EmptyCandidatePool => {
                SessionError::InvalidState(err.message)
            }
            ErrorCode::ValidationFailed => SessionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::ConcurrentModification => SessionError::Conflict(err.message),
            ErrorCode::SessionNotFound => match err
                .details
                .get("session_id")
                .and_then(|id| id.parse::<SessionId>().ok())
            {
                Some(id) => SessionError::NotFound(id),
                None => SessionError::Infrastructure(err.to_string()),
            },
            _ => SessionError::Infrastructure(err.to_string()),
        }
    }
}

impl From<MatchError> for SessionError {
    fn from(err: MatchError) -> Self {
        SessionError::InvalidState(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ValidationError;

    #[test]
    fn validation_domain_error_keeps_field() {
        let err: SessionError = DomainError::from(ValidationError::empty_field("name")).into();
        assert!(matches!(
            err,
            SessionError::ValidationFailed { ref field, .. } if field == "name"
        ));
    }

    #[test]
    fn concurrent_modification_becomes_conflict() {
        let err: SessionError =
            DomainError::new(ErrorCode::ConcurrentModification, "stale version").into();
        assert_eq!(err, SessionError::Conflict("stale version".to_string()));
        assert_eq!(err.code(), ErrorCode::ConcurrentModification);
    }

    #[test]
    fn empty_pool_is_an_invalid_state() {
        let err: SessionError = MatchError::EmptyCandidatePool.into();
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
        assert_eq!(err.message(), "Invalid state: candidate pool is empty");
    }
}
