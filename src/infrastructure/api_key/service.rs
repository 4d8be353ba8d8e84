//! API Key service
//!
//! Issues credential pairs per caller domain, resolves presented
//! credentials and manages the stored registrations.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::api_key::validate_domain;
use crate::domain::storage::{Filter, Storage};
use crate::domain::{ApiKey, ApiKeyId, AuthResult, DeleteOutcome, DomainError, NewApiKey};

use super::generator::KeyGenerator;
use super::hasher::KeyHasher;

/// Length of the `Bearer ` scheme prefix stripped from presented tokens
pub const BEARER_PREFIX_LENGTH: usize = 7;

/// Upper bound on regeneration attempts when a candidate key collides
const MAX_GENERATION_ATTEMPTS: usize = 32;

pub const DUPLICATE_DOMAIN_MESSAGE: &str = "Domain already exists!";

/// Result of issuing a new API key
#[derive(Debug)]
pub struct IssuedApiKey {
    /// The stored registration (fingerprints only)
    pub api_key: ApiKey,
    /// The public key, only returned once
    pub public: String,
    /// The secret key, only returned once
    pub secret: String,
}

#[derive(Debug, Clone, Copy)]
enum KeyKind {
    Public,
    Secret,
}

impl KeyKind {
    fn column(self) -> &'static str {
        match self {
            Self::Public => "public_hash",
            Self::Secret => "secret_hash",
        }
    }
}

/// API Key service for issuing and resolving credentials
#[derive(Debug, Clone)]
pub struct ApiKeyService {
    storage: Arc<dyn Storage<ApiKey>>,
    generator: Arc<dyn KeyGenerator>,
    hasher: KeyHasher,
}

impl ApiKeyService {
    pub fn new(
        storage: Arc<dyn Storage<ApiKey>>,
        generator: Arc<dyn KeyGenerator>,
        hasher: KeyHasher,
    ) -> Self {
        Self {
            storage,
            generator,
            hasher,
        }
    }

    /// Issues a fresh credential pair for `domain`
    pub async fn issue(&self, domain: &str) -> Result<IssuedApiKey, DomainError> {
        validate_domain(domain)?;

        if self.get_by_domain(domain).await?.is_some() {
            return Err(DomainError::conflict(DUPLICATE_DOMAIN_MESSAGE));
        }

        let (public, public_hash) = self.unique_key(KeyKind::Public).await?;
        let (secret, secret_hash) = self.unique_key(KeyKind::Secret).await?;

        let draft = NewApiKey::new(domain, KeyHasher::prefix(&public), public_hash, secret_hash)?;

        let api_key = self.storage.create(draft).await.map_err(|e| match e {
            DomainError::Conflict { .. } => DomainError::conflict(DUPLICATE_DOMAIN_MESSAGE),
            other => other,
        })?;

        info!(id = %api_key.id(), domain = %api_key.domain(), "API key issued");

        Ok(IssuedApiKey {
            api_key,
            public,
            secret,
        })
    }

    /// Draws candidates until one is not yet registered, returning the
    /// plain value and its fingerprint
    async fn unique_key(&self, kind: KeyKind) -> Result<(String, String), DomainError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let candidate = match kind {
                KeyKind::Public => self.generator.public_key(),
                KeyKind::Secret => self.generator.secret_key(),
            };
            let fingerprint = self.hasher.fingerprint(&candidate)?;

            let filter = Filter::new().eq(kind.column(), fingerprint.clone());
            if !self.storage.exists(&filter).await? {
                return Ok((candidate, fingerprint));
            }

            warn!(?kind, attempt, "Generated key collides with an existing one");
        }

        Err(DomainError::internal(format!(
            "Could not generate a unique {:?} key after {} attempts",
            kind, MAX_GENERATION_ATTEMPTS
        )))
    }

    /// Resolves the raw `Authorization` header value. The first
    /// [`BEARER_PREFIX_LENGTH`] characters are dropped and the remainder
    /// is looked up as a public key.
    pub async fn authorize(&self, token: &str) -> Result<AuthResult, DomainError> {
        let public = match token.get(BEARER_PREFIX_LENGTH..) {
            Some(rest) if !rest.is_empty() => rest,
            _ => {
                debug!("Presented token too short to carry a key");
                return Ok(AuthResult::Unauthorized);
            }
        };

        match self.get_by_public(public).await? {
            Some(api_key) => {
                debug!(id = %api_key.id(), "Credential authorized");
                Ok(AuthResult::Authorized(api_key))
            }
            None => {
                debug!("No key matches the presented credential");
                Ok(AuthResult::Unauthorized)
            }
        }
    }

    pub async fn get(&self, id: ApiKeyId) -> Result<Option<ApiKey>, DomainError> {
        self.storage.get(id).await
    }

    pub async fn get_by_domain(&self, domain: &str) -> Result<Option<ApiKey>, DomainError> {
        self.storage
            .find_first(&Filter::new().eq("domain", domain))
            .await
    }

    pub async fn get_by_public(&self, public: &str) -> Result<Option<ApiKey>, DomainError> {
        let fingerprint = self.hasher.fingerprint(public)?;
        self.storage
            .find_first(&Filter::new().eq("public_hash", fingerprint))
            .await
    }

    pub async fn get_by_secret(&self, secret: &str) -> Result<Option<ApiKey>, DomainError> {
        let fingerprint = self.hasher.fingerprint(secret)?;
        self.storage
            .find_first(&Filter::new().eq("secret_hash", fingerprint))
            .await
    }

    /// Removes the registration for `domain`
    pub async fn delete(&self, domain: &str) -> Result<DeleteOutcome, DomainError> {
        let Some(api_key) = self.get_by_domain(domain).await? else {
            return Ok(DeleteOutcome::NotFound);
        };

        let outcome = DeleteOutcome::from_deleted(self.storage.delete(api_key.id()).await?);
        if outcome == DeleteOutcome::Deleted {
            info!(id = %api_key.id(), domain, "API key deleted");
        }

        Ok(outcome)
    }

    /// Moves the registration for `domain` to `new_domain`
    pub async fn update_domain(
        &self,
        domain: &str,
        new_domain: &str,
    ) -> Result<ApiKey, DomainError> {
        let mut api_key = self
            .get_by_domain(domain)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("API key for '{}' not found", domain)))?;

        validate_domain(new_domain)?;

        if new_domain == domain {
            return Ok(api_key);
        }

        if self.get_by_domain(new_domain).await?.is_some() {
            return Err(DomainError::conflict(DUPLICATE_DOMAIN_MESSAGE));
        }

        api_key.set_domain(new_domain)?;

        let updated = self.storage.update(api_key).await.map_err(|e| match e {
            DomainError::Conflict { .. } => DomainError::conflict(DUPLICATE_DOMAIN_MESSAGE),
            other => other,
        })?;

        info!(id = %updated.id(), from = domain, to = new_domain, "API key domain changed");
        Ok(updated)
    }
}
