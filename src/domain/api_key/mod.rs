//! API Key domain
//!
//! This module provides domain types for API key registrations, one per
//! caller domain, and the outcome of authorizing a presented credential.

mod entity;
mod validation;

pub use entity::{ApiKey, ApiKeyId, AuthResult, NewApiKey};
pub use validation::{validate_domain, ApiKeyValidationError, MAX_DOMAIN_LENGTH};
