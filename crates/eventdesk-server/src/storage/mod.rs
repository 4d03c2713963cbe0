// Storage layer for the Eventdesk server
// Decision: Support both PostgreSQL (production) and in-memory (dev mode)
//
// - PostgresEventStore: implements EventStore on a sqlx pool
// - StorageBackend: picks the store from configuration
// - seed: optional sample data

pub mod backend;
pub mod postgres;
pub mod seed;

pub use backend::StorageBackend;
pub use postgres::PostgresEventStore;
pub use seed::seed_sample_events;
