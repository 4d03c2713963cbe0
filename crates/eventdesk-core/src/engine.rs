// Event Engine
//
// Owns every business rule: field validation, the status/category state
// machine and the classification policy. Storage is reached only through the
// injected `EventStore`; the engine holds no mutable state of its own.
//
// Decision: Every store call runs under a deadline (`EngineConfig::store_timeout`).
// On expiry the store future is dropped and the call fails with DeadlineExceeded.
// Decision: No per-event locking. Concurrent writers to one id race; last write wins.

use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::classification::classify_type;
use crate::error::{EventError, Result};
use crate::event::{
    Event, EventCategory, EventFilter, EventId, EventInput, EventStatus, NewEvent,
};
use crate::service::EventService;
use crate::store::{EventStore, StoreError};
use crate::validation::{EventValidator, RequiredFieldsValidator};

/// Default deadline for a single store call
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// Engine tuning
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Upper bound for each store call
    pub store_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}

/// Parsed and validated caller input
struct ValidatedInput {
    name: String,
    event_type: String,
    description: String,
    status: EventStatus,
    category: Option<EventCategory>,
}

/// The event lifecycle and classification engine.
#[derive(Clone)]
pub struct EventEngine {
    store: Arc<dyn EventStore>,
    validator: Arc<dyn EventValidator>,
    config: EngineConfig,
}

impl EventEngine {
    pub fn new(
        store: Arc<dyn EventStore>,
        validator: Arc<dyn EventValidator>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            validator,
            config,
        }
    }

    /// Engine with the default validator and config
    pub fn with_store(store: Arc<dyn EventStore>) -> Self {
        Self::new(
            store,
            Arc::new(RequiredFieldsValidator),
            EngineConfig::default(),
        )
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Run a store call under the configured deadline.
    async fn store_call<T, F>(&self, operation: &'static str, call: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.config.store_timeout, call).await {
            Ok(result) => result.map_err(EventError::from),
            Err(_) => {
                tracing::error!(
                    operation,
                    timeout_ms = self.config.store_timeout.as_millis() as u64,
                    "store call exceeded deadline"
                );
                Err(EventError::DeadlineExceeded(self.config.store_timeout))
            }
        }
    }

    /// Log a rejected operation and hand the error back
    fn reject(operation: &'static str, err: EventError) -> EventError {
        if err.is_client_error() {
            tracing::warn!(operation, error = %err, "event operation rejected");
        } else {
            tracing::error!(operation, error = %err, "event operation failed");
        }
        err
    }

    fn validate_input(&self, input: EventInput) -> Result<ValidatedInput> {
        self.validator.validate(&input)?;
        let status = EventStatus::from_str(&input.status)?;
        let category = input.category().map(EventCategory::from_str).transpose()?;
        Ok(ValidatedInput {
            name: input.name,
            event_type: input.event_type,
            description: input.description,
            status,
            category,
        })
    }

    async fn load(&self, operation: &'static str, id: &str) -> Result<Event> {
        let id = EventId::parse(id)?;
        self.store_call(operation, self.store.get_by_id(id)).await
    }

    fn require_reviewed(event: &Event) -> Result<()> {
        if event.is_reviewed() {
            Ok(())
        } else {
            Err(EventError::NotReviewed(event.id))
        }
    }

    /// Apply the type table to a reviewed event (no persistence)
    fn apply_classification(event: &mut Event) {
        let classification = classify_type(&event.event_type);
        if !classification.recognized {
            tracing::debug!(
                event_id = %event.id,
                event_type = %event.event_type,
                "unrecognized event type, using fallback category"
            );
        }
        event.set_category(classification.category);
    }

    // ========================================================================
    // Operations
    // ========================================================================

    async fn create(&self, input: EventInput) -> Result<Event> {
        let input = self.validate_input(input)?;

        let mut event = NewEvent {
            name: input.name,
            event_type: input.event_type,
            description: input.description,
            date: Utc::now(),
            status: input.status,
            category: None,
            needs_action: false,
        };
        if input.status == EventStatus::Reviewed {
            if let Some(category) = input.category {
                event.category = Some(category);
                event.needs_action = category.needs_action();
            }
        }

        let event = self
            .store_call("create_event", self.store.create(event))
            .await?;
        tracing::info!(event_id = %event.id, status = %event.status, "event created");
        Ok(event)
    }

    async fn list(&self, operation: &'static str, filter: EventFilter) -> Result<Vec<Event>> {
        self.store_call(operation, self.store.find(&filter)).await
    }

    async fn update(&self, id: &str, input: EventInput) -> Result<Event> {
        let input = self.validate_input(input)?;
        let existing = self.load("update_event", id).await?;

        let mut event = Event {
            id: existing.id,
            name: input.name,
            event_type: input.event_type,
            description: input.description,
            date: existing.date,
            status: input.status,
            category: None,
            needs_action: false,
        };
        match (input.status, input.category) {
            (EventStatus::PendingReview, _) => event.clear_category(),
            (EventStatus::Reviewed, Some(category)) => event.set_category(category),
            (EventStatus::Reviewed, None) => {
                Self::apply_classification(&mut event);
                tracing::info!(
                    event_id = %event.id,
                    category = %event.category.map(|c| c.as_str()).unwrap_or_default(),
                    "reviewed event auto-classified on update"
                );
            }
        }

        let event = self
            .store_call("update_event", self.store.update(&event))
            .await?;
        tracing::info!(event_id = %event.id, status = %event.status, "event updated");
        Ok(event)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(EventError::MissingIdentifier);
        }
        let id = EventId::parse(id)?;
        self.store_call("delete_event", self.store.delete(id)).await?;
        tracing::info!(event_id = %id, "event deleted");
        Ok(())
    }

    async fn classify(&self, id: &str) -> Result<Event> {
        let mut event = self.load("classify_event", id).await?;
        Self::require_reviewed(&event)?;

        Self::apply_classification(&mut event);
        let event = self
            .store_call("classify_event", self.store.update(&event))
            .await?;
        tracing::info!(
            event_id = %event.id,
            needs_action = event.needs_action,
            "event classified"
        );
        Ok(event)
    }

    async fn manual_classify(&self, id: &str, category: &str) -> Result<Event> {
        let category = EventCategory::from_str(category)?;
        let mut event = self.load("manual_classify_event", id).await?;
        Self::require_reviewed(&event)?;

        event.set_category(category);
        let event = self
            .store_call("manual_classify_event", self.store.update(&event))
            .await?;
        tracing::info!(
            event_id = %event.id,
            category = %category,
            "event classified manually"
        );
        Ok(event)
    }
}

#[async_trait]
impl EventService for EventEngine {
    async fn create_event(&self, input: EventInput) -> Result<Event> {
        self.create(input)
            .await
            .map_err(|e| Self::reject("create_event", e))
    }

    async fn get_event_by_id(&self, id: &str) -> Result<Event> {
        self.load("get_event_by_id", id)
            .await
            .map_err(|e| Self::reject("get_event_by_id", e))
    }

    async fn get_all_events(&self) -> Result<Vec<Event>> {
        self.store_call("get_all_events", self.store.get_all())
            .await
            .map_err(|e| Self::reject("get_all_events", e))
    }

    async fn get_events_by_status(&self, status: &str) -> Result<Vec<Event>> {
        let result = match EventStatus::from_str(status) {
            Ok(status) => {
                self.list("get_events_by_status", EventFilter::by_status(status))
                    .await
            }
            Err(e) => Err(e),
        };
        result.map_err(|e| Self::reject("get_events_by_status", e))
    }

    async fn get_events_by_category(&self, category: &str) -> Result<Vec<Event>> {
        let result = match EventCategory::from_str(category) {
            Ok(category) => {
                self.list("get_events_by_category", EventFilter::by_category(category))
                    .await
            }
            Err(e) => Err(e),
        };
        result.map_err(|e| Self::reject("get_events_by_category", e))
    }

    async fn get_events_needing_action(&self) -> Result<Vec<Event>> {
        self.list("get_events_needing_action", EventFilter::needing_action())
            .await
            .map_err(|e| Self::reject("get_events_needing_action", e))
    }

    async fn update_event(&self, id: &str, input: EventInput) -> Result<Event> {
        self.update(id, input)
            .await
            .map_err(|e| Self::reject("update_event", e))
    }

    async fn delete_event(&self, id: &str) -> Result<()> {
        self.delete(id)
            .await
            .map_err(|e| Self::reject("delete_event", e))
    }

    async fn classify_event(&self, id: &str) -> Result<Event> {
        self.classify(id)
            .await
            .map_err(|e| Self::reject("classify_event", e))
    }

    async fn manual_classify_event(&self, id: &str, category: &str) -> Result<Event> {
        self.manual_classify(id, category)
            .await
            .map_err(|e| Self::reject("manual_classify_event", e))
    }
}
