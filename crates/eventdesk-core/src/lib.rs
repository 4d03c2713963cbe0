// Event lifecycle and classification core
//
// Key design decisions:
// - The engine depends on storage only through the EventStore trait
// - Validator and store are injected at construction; no process-wide state
// - Status and category are closed enums; raw text is parsed once, at the engine boundary
// - Transports consume the engine through the EventService trait (the endpoint set)

// Domain types
pub mod event;

// Errors
pub mod error;

// Storage contract and in-memory implementation
pub mod memory;
pub mod store;

// Business rules
pub mod classification;
pub mod engine;
pub mod service;
pub mod validation;

// Telemetry (tracing-subscriber + optional OpenTelemetry)
pub mod telemetry;

// Re-exports for convenience
pub use classification::{classify_type, Classification};
pub use engine::{EngineConfig, EventEngine, DEFAULT_STORE_TIMEOUT};
pub use error::{ErrorKind, EventError, Result};
pub use event::{Event, EventCategory, EventFilter, EventId, EventInput, EventStatus, NewEvent};
pub use memory::InMemoryEventStore;
pub use service::EventService;
pub use store::{EventStore, StoreError};
pub use validation::{EventValidator, RequiredFieldsValidator};
