// Endpoint set consumed by the transports
//
// Both the HTTP API and the gRPC service hold an `Arc<dyn EventService>`.
// `EventEngine` is the production implementation; transport tests can plug in
// a double.

use async_trait::async_trait;

use crate::error::Result;
use crate::event::{Event, EventInput};

/// One method per engine operation.
#[async_trait]
pub trait EventService: Send + Sync {
    /// Validate and persist a new event
    async fn create_event(&self, input: EventInput) -> Result<Event>;

    /// Load one event
    async fn get_event_by_id(&self, id: &str) -> Result<Event>;

    /// All events, newest first
    async fn get_all_events(&self) -> Result<Vec<Event>>;

    /// Events in the given lifecycle status, newest first
    async fn get_events_by_status(&self, status: &str) -> Result<Vec<Event>>;

    /// Reviewed events in the given category, newest first
    async fn get_events_by_category(&self, category: &str) -> Result<Vec<Event>>;

    /// Reviewed events that need action, newest first
    async fn get_events_needing_action(&self) -> Result<Vec<Event>>;

    /// Replace the mutable fields of an event, auto-classifying reviewed
    /// events that arrive without a category
    async fn update_event(&self, id: &str, input: EventInput) -> Result<Event>;

    /// Physically delete an event
    async fn delete_event(&self, id: &str) -> Result<()>;

    /// Classify a reviewed event from its type
    async fn classify_event(&self, id: &str) -> Result<Event>;

    /// Classify a reviewed event with a caller-supplied category
    async fn manual_classify_event(&self, id: &str, category: &str) -> Result<Event>;
}
