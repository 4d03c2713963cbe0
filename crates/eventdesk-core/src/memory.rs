//! In-memory implementation of EventStore for dev mode and testing

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::event::{Event, EventFilter, EventId, NewEvent};
use crate::store::{EventStore, StoreError};

/// In-memory implementation of EventStore
///
/// All data is lost on restart. Provides the same semantics as the
/// PostgreSQL implementation, including newest-first ordering.
///
/// # Example
///
/// ```
/// use eventdesk_core::InMemoryEventStore;
///
/// let store = InMemoryEventStore::new();
/// assert_eq!(store.len(), 0);
/// ```
#[derive(Default)]
pub struct InMemoryEventStore {
    events: RwLock<HashMap<EventId, Event>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    fn newest_first(mut events: Vec<Event>) -> Vec<Event> {
        events.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        events
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn create(&self, event: NewEvent) -> Result<Event, StoreError> {
        let event = event.with_id(EventId::new());
        self.events.write().insert(event.id, event.clone());
        tracing::debug!(event_id = %event.id, "stored event in memory");
        Ok(event)
    }

    async fn get_by_id(&self, id: EventId) -> Result<Event, StoreError> {
        self.events
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<Event>, StoreError> {
        let events = self.events.read().values().cloned().collect();
        Ok(Self::newest_first(events))
    }

    async fn find(&self, filter: &EventFilter) -> Result<Vec<Event>, StoreError> {
        let events = self
            .events
            .read()
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        Ok(Self::newest_first(events))
    }

    async fn update(&self, event: &Event) -> Result<Event, StoreError> {
        let mut events = self.events.write();
        let stored = events
            .get_mut(&event.id)
            .ok_or(StoreError::NotFound(event.id))?;
        *stored = event.clone();
        Ok(stored.clone())
    }

    async fn delete(&self, id: EventId) -> Result<(), StoreError> {
        self.events
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
