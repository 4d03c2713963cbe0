//! PostgreSQL implementation of EventStore
//!
//! Single `events` table, created by the embedded migrations on startup.
//! Status and category are stored as their display literals.

use std::str::FromStr;

use async_trait::async_trait;
use eventdesk_core::{
    Event, EventCategory, EventFilter, EventId, EventStatus, EventStore, NewEvent, StoreError,
};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::{debug, error, instrument};

const EVENT_COLUMNS: &str = "id, name, type, description, date, status, category, needs_action";

/// PostgreSQL implementation of EventStore
///
/// ```ignore
/// let pool = PgPool::connect("postgres://localhost/eventdesk").await?;
/// let store = PostgresEventStore::new(pool);
/// store.migrate().await?;
/// ```
#[derive(Clone)]
pub struct PostgresEventStore {
    pool: PgPool,
}

impl PostgresEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect with a bounded pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(Self::new(pool))
    }

    /// Apply embedded migrations
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}

fn db_error(action: &str, e: sqlx::Error) -> StoreError {
    error!("Failed to {}: {}", action, e);
    StoreError::Database(e.to_string())
}

fn row_to_event(row: &PgRow) -> Result<Event, StoreError> {
    let status: String = row.get("status");
    let category: Option<String> = row.get("category");

    let status = EventStatus::from_str(&status)
        .map_err(|_| StoreError::Serialization(format!("unknown status '{}'", status)))?;
    let category = category
        .map(|c| {
            EventCategory::from_str(&c)
                .map_err(|_| StoreError::Serialization(format!("unknown category '{}'", c)))
        })
        .transpose()?;

    Ok(Event {
        id: EventId::from(row.get::<uuid::Uuid, _>("id")),
        name: row.get("name"),
        event_type: row.get("type"),
        description: row.get("description"),
        date: row.get("date"),
        status,
        category,
        needs_action: row.get("needs_action"),
    })
}

fn rows_to_events(rows: &[PgRow]) -> Result<Vec<Event>, StoreError> {
    rows.iter().map(row_to_event).collect()
}

#[async_trait]
impl EventStore for PostgresEventStore {
    #[instrument(skip(self, event), fields(status = %event.status))]
    async fn create(&self, event: NewEvent) -> Result<Event, StoreError> {
        let id = EventId::new();
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO events (id, name, type, description, date, status, category, needs_action)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id.as_uuid())
        .bind(&event.name)
        .bind(&event.event_type)
        .bind(&event.description)
        .bind(event.date)
        .bind(event.status.as_str())
        .bind(event.category.map(|c| c.as_str()))
        .bind(event.needs_action)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("create event", e))?;

        debug!(%id, "created event");
        row_to_event(&row)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: EventId) -> Result<Event, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("get event", e))?
        .ok_or(StoreError::NotFound(id))?;

        row_to_event(&row)
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<Event>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY date DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list events", e))?;

        rows_to_events(&rows)
    }

    #[instrument(skip(self))]
    async fn find(&self, filter: &EventFilter) -> Result<Vec<Event>, StoreError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM events
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR category = $2)
              AND ($3::boolean IS NULL OR needs_action = $3)
            ORDER BY date DESC, id DESC
            "#
        ))
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.category.map(|c| c.as_str()))
        .bind(filter.needs_action)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("find events", e))?;

        rows_to_events(&rows)
    }

    #[instrument(skip(self, event), fields(id = %event.id))]
    async fn update(&self, event: &Event) -> Result<Event, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE events
            SET name = $2, type = $3, description = $4, date = $5,
                status = $6, category = $7, needs_action = $8
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(event.id.as_uuid())
        .bind(&event.name)
        .bind(&event.event_type)
        .bind(&event.description)
        .bind(event.date)
        .bind(event.status.as_str())
        .bind(event.category.map(|c| c.as_str()))
        .bind(event.needs_action)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("update event", e))?
        .ok_or(StoreError::NotFound(event.id))?;

        debug!(id = %event.id, "updated event");
        row_to_event(&row)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EventId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete event", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        debug!(%id, "deleted event");
        Ok(())
    }
}
