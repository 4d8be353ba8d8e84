//! PostgreSQL storage implementation with connection pooling

use std::fmt::Debug;
use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPool, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::{Postgres, Row};

use crate::domain::storage::{FieldValue, Fields, Filter, Storage, StorageEntity, StorageKey};
use crate::domain::{ApiKey, ApiKeyId, DomainError, Movie, MovieId, NewApiKey, NewMovie, Price};

/// PostgreSQL storage configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/movie_api".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_idle_timeout(mut self, secs: u64) -> Self {
        self.idle_timeout_secs = secs;
        self
    }

    /// Opens a connection pool with these settings
    pub async fn connect(&self) -> Result<PgPool, DomainError> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(std::time::Duration::from_secs(self.connect_timeout_secs))
            .idle_timeout(std::time::Duration::from_secs(self.idle_timeout_secs))
            .connect(&self.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))
    }
}

/// Entities that can be read back from a PostgreSQL row
pub trait PgEntity: StorageEntity {
    fn from_row(row: &PgRow) -> Result<Self, DomainError>;
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::storage(format!("Failed to read column '{}': {}", name, e)))
}

impl PgEntity for Movie {
    fn from_row(row: &PgRow) -> Result<Self, DomainError> {
        let price = Price::from_cents(column(row, "price_cents")?)?;
        let draft = NewMovie::new(
            column::<String>(row, "title")?,
            column(row, "subtitle")?,
            price,
            column(row, "description")?,
        )?;

        Ok(Movie::from_draft(MovieId::new(column(row, "id")?), draft))
    }
}

impl PgEntity for ApiKey {
    fn from_row(row: &PgRow) -> Result<Self, DomainError> {
        let draft = NewApiKey::new(
            column::<String>(row, "domain")?,
            column::<String>(row, "key_prefix")?,
            column::<String>(row, "public_hash")?,
            column::<String>(row, "secret_hash")?,
        )?;

        Ok(ApiKey::from_draft(ApiKeyId::new(column(row, "id")?), draft))
    }
}

fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: FieldValue,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        FieldValue::Integer(v) => query.bind(v),
        FieldValue::Text(v) => query.bind(v),
        FieldValue::OptionalText(v) => query.bind(v),
    }
}

fn map_write_error(table: &str, action: &str, e: sqlx::Error) -> DomainError {
    let unique_violation = e
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());

    if unique_violation {
        DomainError::conflict(format!("Duplicate value in '{}': {}", table, e))
    } else {
        DomainError::storage(format!("Failed to {} entity: {}", action, e))
    }
}

/// PostgreSQL storage implementation with connection pooling
///
/// Maps each entity onto its own table with one column per field and a
/// `BIGSERIAL` identity. Uniqueness is enforced by the schema (see
/// migrations); constraint violations surface as `Conflict`.
pub struct PostgresStorage<E>
where
    E: StorageEntity,
{
    pool: PgPool,
    _phantom: PhantomData<fn() -> E>,
}

impl<E> Debug for PostgresStorage<E>
where
    E: StorageEntity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresStorage")
            .field("table_name", &E::TABLE)
            .finish()
    }
}

impl<E> PostgresStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new PostgreSQL storage over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _phantom: PhantomData,
        }
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// `OFFSET`/`LIMIT` value, saturating at `BIGINT` range
fn sql_bound(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Builds `col1 IS NOT DISTINCT FROM $n AND ...` starting at placeholder `first`
fn where_clause(filter: &Filter, first: usize) -> String {
    if filter.is_empty() {
        return "TRUE".to_string();
    }

    filter
        .conditions()
        .iter()
        .enumerate()
        .map(|(i, (column, _))| format!("{} IS NOT DISTINCT FROM ${}", column, first + i))
        .collect::<Vec<_>>()
        .join(" AND ")
}

#[async_trait]
impl<E> Storage<E> for PostgresStorage<E>
where
    E: PgEntity + 'static,
{
    async fn get(&self, key: E::Key) -> Result<Option<E>, DomainError> {
        let query = format!("SELECT * FROM {} WHERE id = $1", E::TABLE);

        let row = sqlx::query(&query)
            .bind(key.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get entity: {}", e)))?;

        row.as_ref().map(E::from_row).transpose()
    }

    async fn list(&self, offset: usize, limit: usize) -> Result<Vec<E>, DomainError> {
        let query = format!(
            "SELECT * FROM {} ORDER BY id OFFSET $1 LIMIT $2",
            E::TABLE
        );

        let rows = sqlx::query(&query)
            .bind(sql_bound(offset))
            .bind(sql_bound(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list entities: {}", e)))?;

        rows.iter().map(E::from_row).collect()
    }

    async fn find_first(&self, filter: &Filter) -> Result<Option<E>, DomainError> {
        let query = format!(
            "SELECT * FROM {} WHERE {} ORDER BY id LIMIT 1",
            E::TABLE,
            where_clause(filter, 1)
        );

        let mut q = sqlx::query(&query);
        for (_, value) in filter.conditions() {
            q = bind_value(q, value.clone());
        }

        let row = q
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to query entity: {}", e)))?;

        row.as_ref().map(E::from_row).transpose()
    }

    async fn create(&self, draft: E::Draft) -> Result<E, DomainError> {
        let fields = draft.fields();
        let columns: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
        let placeholders: Vec<String> = (1..=fields.len()).map(|i| format!("${}", i)).collect();

        let query = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING id",
            E::TABLE,
            columns.join(", "),
            placeholders.join(", ")
        );

        let mut q = sqlx::query(&query);
        for (_, value) in fields {
            q = bind_value(q, value);
        }

        let row = q
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(E::TABLE, "create", e))?;

        let id: i64 = column(&row, "id")?;
        Ok(E::from_draft(E::Key::from_raw(id), draft))
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let fields = entity.to_draft().fields();
        let assignments: Vec<String> = fields
            .iter()
            .enumerate()
            .map(|(i, (name, _))| format!("{} = ${}", name, i + 2))
            .collect();

        let query = format!(
            "UPDATE {} SET {} WHERE id = $1",
            E::TABLE,
            assignments.join(", ")
        );

        let mut q = sqlx::query(&query).bind(entity.key().as_i64());
        for (_, value) in fields {
            q = bind_value(q, value);
        }

        let result = q
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(E::TABLE, "update", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Entity '{}' not found in '{}'",
                entity.key(),
                E::TABLE
            )));
        }

        Ok(entity)
    }

    async fn delete(&self, key: E::Key) -> Result<bool, DomainError> {
        let query = format!("DELETE FROM {} WHERE id = $1", E::TABLE);

        let result = sqlx::query(&query)
            .bind(key.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete entity: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let query = format!("SELECT COUNT(*) as count FROM {}", E::TABLE);

        let row = sqlx::query(&query)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count entities: {}", e)))?;

        let count: i64 = column(&row, "count")?;
        Ok(count as usize)
    }
}
