//! API Key infrastructure implementations
//!
//! This module provides credential generation, fingerprinting and the
//! service that issues and resolves API keys.

mod generator;
mod hasher;
mod service;

pub use generator::{KeyGenerator, RandomKeyGenerator, PUBLIC_KEY_BYTES, SECRET_KEY_LENGTH};
pub use hasher::{KeyHasher, KEY_PREFIX_LENGTH};
pub use service::{ApiKeyService, IssuedApiKey, BEARER_PREFIX_LENGTH, DUPLICATE_DOMAIN_MESSAGE};

#[cfg(test)]
pub use generator::scripted;
