//! API Key entity and related types

use serde::{Deserialize, Serialize};

use super::validation::{validate_domain, ApiKeyValidationError};
use crate::domain::storage::{FieldValue, Fields, StorageEntity, StorageKey};

/// API key identifier assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKeyId(i64);

impl ApiKeyId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ApiKeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for ApiKeyId {
    fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    fn as_i64(&self) -> i64 {
        self.0
    }
}

/// A key registration before the store has assigned an identity.
///
/// Neither credential half is kept in the clear: only keyed fingerprints
/// of the public and secret keys are stored, plus a short public prefix
/// for identification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApiKey {
    domain: String,
    key_prefix: String,
    public_hash: String,
    secret_hash: String,
}

impl NewApiKey {
    pub fn new(
        domain: impl Into<String>,
        key_prefix: impl Into<String>,
        public_hash: impl Into<String>,
        secret_hash: impl Into<String>,
    ) -> Result<Self, ApiKeyValidationError> {
        let domain = domain.into();
        validate_domain(&domain)?;

        Ok(Self {
            domain,
            key_prefix: key_prefix.into(),
            public_hash: public_hash.into(),
            secret_hash: secret_hash.into(),
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    pub fn public_hash(&self) -> &str {
        &self.public_hash
    }

    pub fn secret_hash(&self) -> &str {
        &self.secret_hash
    }
}

impl Fields for NewApiKey {
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("domain", self.domain.clone().into()),
            ("key_prefix", self.key_prefix.clone().into()),
            ("public_hash", self.public_hash.clone().into()),
            ("secret_hash", self.secret_hash.clone().into()),
        ]
    }
}

/// A persisted API key registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey {
    id: ApiKeyId,
    data: NewApiKey,
}

impl ApiKey {
    pub fn id(&self) -> ApiKeyId {
        self.id
    }

    pub fn domain(&self) -> &str {
        self.data.domain()
    }

    pub fn key_prefix(&self) -> &str {
        self.data.key_prefix()
    }

    pub fn public_hash(&self) -> &str {
        self.data.public_hash()
    }

    pub fn secret_hash(&self) -> &str {
        self.data.secret_hash()
    }

    /// Moves the registration to another domain
    pub fn set_domain(&mut self, domain: impl Into<String>) -> Result<(), ApiKeyValidationError> {
        let domain = domain.into();
        validate_domain(&domain)?;
        self.data.domain = domain;
        Ok(())
    }
}

impl StorageEntity for ApiKey {
    type Key = ApiKeyId;
    type Draft = NewApiKey;

    const TABLE: &'static str = "api_keys";
    const UNIQUE: &'static [&'static [&'static str]] =
        &[&["domain"], &["public_hash"], &["secret_hash"]];

    fn key(&self) -> Self::Key {
        self.id
    }

    fn from_draft(key: Self::Key, draft: Self::Draft) -> Self {
        Self { id: key, data: draft }
    }

    fn to_draft(&self) -> Self::Draft {
        self.data.clone()
    }
}

/// Outcome of resolving a presented credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResult {
    Authorized(ApiKey),
    Unauthorized,
}

impl AuthResult {
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized(_))
    }
}
