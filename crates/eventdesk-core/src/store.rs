//! EventStore trait definition

use async_trait::async_trait;

use crate::event::{Event, EventFilter, EventId, NewEvent};

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No event stored under this id
    #[error("event not found: {0}")]
    NotFound(EventId),

    /// Database error
    #[error("database error: {0}")]
    Database(String),

    /// Stored data could not be decoded
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persistence for events
///
/// The store owns physical representation only; it has no business rules.
/// List operations return events newest first by `date`.
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait EventStore: Send + Sync + 'static {
    /// Persist a new event and return it with its assigned id
    async fn create(&self, event: NewEvent) -> Result<Event, StoreError>;

    /// Load an event by id
    async fn get_by_id(&self, id: EventId) -> Result<Event, StoreError>;

    /// All events, newest first
    async fn get_all(&self) -> Result<Vec<Event>, StoreError>;

    /// Events matching every set field of the filter, newest first
    async fn find(&self, filter: &EventFilter) -> Result<Vec<Event>, StoreError>;

    /// Replace all mutable fields of a stored event
    async fn update(&self, event: &Event) -> Result<Event, StoreError>;

    /// Physically delete an event
    async fn delete(&self, id: EventId) -> Result<(), StoreError>;
}
