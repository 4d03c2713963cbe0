// Storage backend selection
// Decision: Enum over the two concrete stores; the engine only sees `Arc<dyn EventStore>`
//
// PostgreSQL when DATABASE_URL is set (production), in-memory otherwise (dev mode).

use std::sync::Arc;

use anyhow::{Context, Result};
use eventdesk_core::{EventStore, InMemoryEventStore};

use super::postgres::PostgresEventStore;
use crate::config::ServerConfig;

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(PostgresEventStore),
    /// In-memory store (dev mode)
    InMemory(Arc<InMemoryEventStore>),
}

impl StorageBackend {
    /// Connect to PostgreSQL and apply migrations
    pub async fn postgres(database_url: &str, max_connections: u32) -> Result<Self> {
        let store = PostgresEventStore::connect(database_url, max_connections)
            .await
            .context("Failed to connect to database")?;
        store
            .migrate()
            .await
            .context("Failed to run database migrations")?;
        Ok(Self::Postgres(store))
    }

    /// Create an in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory(Arc::new(InMemoryEventStore::new()))
    }

    /// Pick the backend from configuration
    pub async fn from_config(config: &ServerConfig) -> Result<Self> {
        match &config.database_url {
            Some(url) => {
                let backend = Self::postgres(url, config.database_max_connections).await?;
                tracing::info!(
                    max_connections = config.database_max_connections,
                    "Connected to PostgreSQL"
                );
                Ok(backend)
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using in-memory store (dev mode, data is not persisted)");
                Ok(Self::in_memory())
            }
        }
    }

    /// Check if this is dev mode (in-memory)
    pub fn is_dev_mode(&self) -> bool {
        matches!(self, Self::InMemory(_))
    }

    /// Short backend name for health output and logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::InMemory(_) => "memory",
        }
    }

    /// Shared store handle for the engine
    pub fn store(&self) -> Arc<dyn EventStore> {
        match self {
            Self::Postgres(store) => Arc::new(store.clone()),
            Self::InMemory(store) => store.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_backend_without_database_url() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        let backend = StorageBackend::from_config(&config).await.unwrap();

        assert!(backend.is_dev_mode());
        assert_eq!(backend.name(), "memory");
        assert!(backend.store().get_all().await.unwrap().is_empty());
    }
}
