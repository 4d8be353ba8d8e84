//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::StorageEntity;
use super::filter::Filter;

/// Generic storage trait for CRUD operations on any entity type
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves an entity by its identity
    async fn get(&self, key: E::Key) -> Result<Option<E>, DomainError>;

    /// Retrieves one page of entities in identity order
    async fn list(&self, offset: usize, limit: usize) -> Result<Vec<E>, DomainError>;

    /// Retrieves the first entity (lowest identity) matching the filter
    async fn find_first(&self, filter: &Filter) -> Result<Option<E>, DomainError>;

    /// Inserts a new entity and assigns its identity; a unique group
    /// collision is a `Conflict`
    async fn create(&self, draft: E::Draft) -> Result<E, DomainError>;

    /// Replaces an existing entity's values, returns `NotFound` if absent
    async fn update(&self, entity: E) -> Result<E, DomainError>;

    /// Deletes an entity by its identity, returns true if deleted
    async fn delete(&self, key: E::Key) -> Result<bool, DomainError>;

    /// Checks if any entity matches the filter
    async fn exists(&self, filter: &Filter) -> Result<bool, DomainError> {
        Ok(self.find_first(filter).await?.is_some())
    }

    /// Returns the count of entities
    async fn count(&self) -> Result<usize, DomainError>;
}
