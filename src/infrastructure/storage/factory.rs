//! Storage factory for runtime storage selection

use std::sync::Arc;

use sqlx::postgres::PgPool;

use crate::domain::storage::Storage;
use crate::domain::{ApiKey, DomainError, Movie};

use super::in_memory::InMemoryStorage;
use super::migrations::run_storage_migrations;
use super::postgres::{PostgresConfig, PostgresStorage};

/// Supported storage types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    InMemory,
    Postgres(PostgresConfig),
}

impl StorageConfig {
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// The pair of stores the application runs on
#[derive(Debug, Clone)]
pub struct Stores {
    pub movies: Arc<dyn Storage<Movie>>,
    pub api_keys: Arc<dyn Storage<ApiKey>>,
}

/// Factory for creating storage instances
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates both stores for the configured backend. For PostgreSQL the
    /// schema is migrated before the stores are handed out.
    pub async fn create(config: &StorageConfig) -> Result<Stores, DomainError> {
        match config {
            StorageConfig::InMemory => Ok(Self::in_memory()),
            StorageConfig::Postgres(pg_config) => {
                let pool = pg_config.connect().await?;
                run_storage_migrations(&pool).await?;
                Ok(Self::postgres(pool))
            }
        }
    }

    /// Creates empty in-memory stores
    pub fn in_memory() -> Stores {
        Stores {
            movies: Arc::new(InMemoryStorage::<Movie>::new()),
            api_keys: Arc::new(InMemoryStorage::<ApiKey>::new()),
        }
    }

    /// Creates PostgreSQL stores sharing one pool
    pub fn postgres(pool: PgPool) -> Stores {
        Stores {
            movies: Arc::new(PostgresStorage::<Movie>::new(pool.clone())),
            api_keys: Arc::new(PostgresStorage::<ApiKey>::new(pool)),
        }
    }
}
