//! Storage entity traits and types

use std::fmt::{Debug, Display};

/// Trait for identity types assigned by the store on creation
pub trait StorageKey: Copy + Debug + Display + Send + Sync + Eq + std::hash::Hash {
    /// Wraps a raw identity produced by the store
    fn from_raw(raw: i64) -> Self;

    /// Returns the raw identity for storage backends
    fn as_i64(&self) -> i64;
}

/// A single column value as seen by the storage backends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
    OptionalText(Option<String>),
}

impl FieldValue {
    /// Equality used by filters and unique groups: a missing optional text
    /// only equals another missing optional text.
    pub fn matches(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Integer(_), _) | (_, Self::Integer(_)) => false,
            _ => self.as_text() == other.as_text(),
        }
    }

    fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::OptionalText(value) => value.as_deref(),
            Self::Integer(_) => None,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        Self::OptionalText(value)
    }
}

/// Column values of a record, in declaration order, excluding the identity
pub trait Fields {
    fn fields(&self) -> Vec<(&'static str, FieldValue)>;

    /// Looks up one column by name
    fn field(&self, column: &str) -> Option<FieldValue> {
        self.fields()
            .into_iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }
}

/// Trait for types that can be stored
pub trait StorageEntity: Clone + Debug + Send + Sync {
    /// The identity type for this entity
    type Key: StorageKey;

    /// The entity's values before the store has assigned an identity
    type Draft: Fields + Clone + Debug + Send + Sync;

    /// Table (or collection) name
    const TABLE: &'static str;

    /// Column groups that must be unique across the table
    const UNIQUE: &'static [&'static [&'static str]];

    /// Returns the entity's identity
    fn key(&self) -> Self::Key;

    /// Builds the entity from its assigned identity and values
    fn from_draft(key: Self::Key, draft: Self::Draft) -> Self;

    /// Returns the entity's values without its identity
    fn to_draft(&self) -> Self::Draft;
}
