//! In-memory storage implementation

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{Fields, Filter, Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

#[derive(Debug)]
struct Table<E> {
    rows: BTreeMap<i64, E>,
    next_id: i64,
}

/// Thread-safe in-memory storage implementation
///
/// Identities are assigned from a per-table sequence starting at 1 and the
/// entity's unique column groups are enforced under the same write lock as
/// the insert, so concurrent duplicates cannot both succeed. Data is lost
/// when the process terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    table: RwLock<Table<E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new empty in-memory storage
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

/// Finds the first unique group that `draft` would violate
fn violated_group<E: StorageEntity>(
    rows: &BTreeMap<i64, E>,
    draft: &E::Draft,
    skip: Option<i64>,
) -> Option<&'static [&'static str]> {
    E::UNIQUE.iter().copied().find(|group| {
        let mut filter = Filter::new();
        for column in group.iter().copied() {
            if let Some(value) = draft.field(column) {
                filter = filter.eq(column, value);
            }
        }

        rows.iter()
            .filter(|(id, _)| Some(**id) != skip)
            .any(|(_, row)| filter.matches(&row.to_draft()))
    })
}

fn conflict<E: StorageEntity>(group: &[&str]) -> DomainError {
    DomainError::conflict(format!(
        "Duplicate value for ({}) in '{}'",
        group.join(", "),
        E::TABLE
    ))
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: E::Key) -> Result<Option<E>, DomainError> {
        let table = self.table.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(table.rows.get(&key.as_i64()).cloned())
    }

    async fn list(&self, offset: usize, limit: usize) -> Result<Vec<E>, DomainError> {
        let table = self.table.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(table.rows.values().skip(offset).take(limit).cloned().collect())
    }

    async fn find_first(&self, filter: &Filter) -> Result<Option<E>, DomainError> {
        let table = self.table.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(table
            .rows
            .values()
            .find(|row| filter.matches(&row.to_draft()))
            .cloned())
    }

    async fn create(&self, draft: E::Draft) -> Result<E, DomainError> {
        let mut table = self.table.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if let Some(group) = violated_group::<E>(&table.rows, &draft, None) {
            return Err(conflict::<E>(group));
        }

        let id = table.next_id;
        table.next_id += 1;

        let entity = E::from_draft(E::Key::from_raw(id), draft);
        table.rows.insert(id, entity.clone());

        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let id = entity.key().as_i64();
        let mut table = self.table.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if !table.rows.contains_key(&id) {
            return Err(DomainError::not_found(format!(
                "Entity '{}' not found in '{}'",
                id,
                E::TABLE
            )));
        }

        if let Some(group) = violated_group::<E>(&table.rows, &entity.to_draft(), Some(id)) {
            return Err(conflict::<E>(group));
        }

        table.rows.insert(id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, key: E::Key) -> Result<bool, DomainError> {
        let mut table = self.table.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(table.rows.remove(&key.as_i64()).is_some())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let table = self.table.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(table.rows.len())
    }
}
