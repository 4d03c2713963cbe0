// Eventdesk gRPC protocol
//
// Decision: Status and category stay strings on the wire; the engine parses them
// Decision: Conversions live here so the server only deals with core types

use chrono::{DateTime, Utc};

use eventdesk_core::{Event, EventInput};

// Generated protobuf code
pub mod proto {
    tonic::include_proto!("eventdesk.v1");
}

// Re-export for convenience
pub use proto::event_service_server::{EventService, EventServiceServer};

// ============================================================================
// Basic types
// ============================================================================

/// Convert from chrono DateTime<Utc> to proto Timestamp
pub fn datetime_to_proto_timestamp(value: DateTime<Utc>) -> proto::Timestamp {
    proto::Timestamp {
        seconds: value.timestamp(),
        nanos: value.timestamp_subsec_nanos() as i32,
    }
}

// ============================================================================
// Event conversions
// ============================================================================

impl From<&Event> for proto::Event {
    fn from(event: &Event) -> Self {
        proto::Event {
            id: event.id.to_string(),
            name: event.name.clone(),
            r#type: event.event_type.clone(),
            description: event.description.clone(),
            date: Some(datetime_to_proto_timestamp(event.date)),
            status: event.status.as_str().to_string(),
            category: event.category.map(|c| c.as_str().to_string()),
            needs_action: event.needs_action,
        }
    }
}

impl From<Event> for proto::Event {
    fn from(event: Event) -> Self {
        proto::Event::from(&event)
    }
}

impl From<proto::EventInput> for EventInput {
    fn from(input: proto::EventInput) -> Self {
        EventInput {
            name: input.name,
            event_type: input.r#type,
            description: input.description,
            status: input.status,
            category: input.category,
        }
    }
}

/// Wrap engine results in the list message
pub fn event_list(events: Vec<Event>) -> proto::EventList {
    proto::EventList {
        events: events.into_iter().map(proto::Event::from).collect(),
    }
}
