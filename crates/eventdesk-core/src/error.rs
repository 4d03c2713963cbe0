// Error types for the event engine

use std::time::Duration;
use thiserror::Error;

use crate::event::EventId;
use crate::store::StoreError;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EventError>;

/// Errors returned by the event engine.
///
/// Transports map these to wire status codes via [`EventError::kind`].
#[derive(Debug, Error)]
pub enum EventError {
    /// A required field is missing or empty
    #[error("validation failed: field '{0}' is required")]
    Validation(String),

    /// Status is not one of the two lifecycle values
    #[error("invalid status '{0}': must be 'Pendiente por revisar' or 'Revisado'")]
    InvalidStatus(String),

    /// Category is not one of the two classification values
    #[error("invalid category '{0}': must be 'Requiere gestión' or 'Sin gestión'")]
    InvalidCategory(String),

    /// Classification requested for an event that is not reviewed
    #[error("event {0} is not reviewed; only reviewed events can be classified")]
    NotReviewed(EventId),

    /// Identifier does not resolve to a stored event (including malformed ids)
    #[error("event not found: {0}")]
    NotFound(String),

    /// Delete requested without an identifier
    #[error("event id is required")]
    MissingIdentifier,

    /// A store call did not finish within the configured deadline
    #[error("store operation exceeded deadline of {0:?}")]
    DeadlineExceeded(Duration),

    /// Any other persistence failure, passed through unchanged
    #[error(transparent)]
    Store(StoreError),
}

/// Coarse error classification used by transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    InvalidStatus,
    InvalidCategory,
    NotReviewed,
    NotFound,
    MissingIdentifier,
    DeadlineExceeded,
    Store,
}

impl EventError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EventError::Validation(_) => ErrorKind::Validation,
            EventError::InvalidStatus(_) => ErrorKind::InvalidStatus,
            EventError::InvalidCategory(_) => ErrorKind::InvalidCategory,
            EventError::NotReviewed(_) => ErrorKind::NotReviewed,
            EventError::NotFound(_) => ErrorKind::NotFound,
            EventError::MissingIdentifier => ErrorKind::MissingIdentifier,
            EventError::DeadlineExceeded(_) => ErrorKind::DeadlineExceeded,
            EventError::Store(_) => ErrorKind::Store,
        }
    }

    /// Create a validation error for a field
    pub fn validation(field: impl Into<String>) -> Self {
        EventError::Validation(field.into())
    }

    /// True for errors caused by the caller's input rather than the system
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self.kind(),
            ErrorKind::Store | ErrorKind::DeadlineExceeded
        )
    }
}

impl From<StoreError> for EventError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => EventError::NotFound(id.to_string()),
            other => EventError::Store(other),
        }
    }
}
