// Sample data for demos and local development
//
// Inserted straight through the store so the sample dates can be spread
// around "now". Skipped when the store already holds events.

use chrono::{Duration, Utc};
use eventdesk_core::{EventCategory, EventStatus, EventStore, NewEvent, StoreError};

/// The four sample events, dated relative to now
pub fn sample_events() -> Vec<NewEvent> {
    let now = Utc::now();
    let event = |name: &str,
                 event_type: &str,
                 description: &str,
                 offset: Duration,
                 status: EventStatus,
                 category: Option<EventCategory>| NewEvent {
        name: name.to_string(),
        event_type: event_type.to_string(),
        description: description.to_string(),
        date: now + offset,
        status,
        category,
        needs_action: category.is_some_and(|c| c.needs_action()),
    };

    vec![
        event(
            "Conferencia de Tecnología",
            "Conferencia",
            "Evento anual de tecnología e innovación",
            Duration::zero(),
            EventStatus::PendingReview,
            None,
        ),
        event(
            "Taller de Go",
            "Taller",
            "Taller práctico de programación en Go",
            Duration::days(1),
            EventStatus::PendingReview,
            None,
        ),
        event(
            "Reunión de Equipo",
            "Reunión",
            "Reunión mensual del equipo de desarrollo",
            Duration::days(-1),
            EventStatus::Reviewed,
            Some(EventCategory::NoActionNeeded),
        ),
        event(
            "Incidente de Seguridad",
            "Incidente",
            "Reporte de posible vulnerabilidad",
            Duration::zero(),
            EventStatus::Reviewed,
            Some(EventCategory::RequiresAction),
        ),
    ]
}

/// Insert the sample events if the store is empty. Returns how many were inserted.
pub async fn seed_sample_events(store: &dyn EventStore) -> Result<usize, StoreError> {
    if !store.get_all().await?.is_empty() {
        tracing::info!("Store already has events, skipping sample data");
        return Ok(0);
    }

    let samples = sample_events();
    let count = samples.len();
    for sample in samples {
        let event = store.create(sample).await?;
        tracing::debug!(event_id = %event.id, name = %event.name, "seeded sample event");
    }
    tracing::info!(count, "Seeded sample events");
    Ok(count)
}
