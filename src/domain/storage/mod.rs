//! Storage domain - Generic storage abstraction layer

mod entity;
mod filter;
mod repository;

pub use entity::{FieldValue, Fields, StorageEntity, StorageKey};
pub use filter::Filter;
pub use repository::Storage;

#[cfg(test)]
pub use repository::mock;
