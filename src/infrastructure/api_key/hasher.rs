//! Keyed fingerprints of credential values
//!
//! Credentials are never stored in the clear. Each value is reduced to an
//! HMAC-SHA256 fingerprint under a server-side pepper; lookups fingerprint
//! the presented value and compare digests.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::domain::DomainError;

type HmacSha256 = Hmac<Sha256>;

/// Number of leading public-key characters kept for identification
pub const KEY_PREFIX_LENGTH: usize = 8;

#[derive(Clone)]
pub struct KeyHasher {
    pepper: Vec<u8>,
}

impl std::fmt::Debug for KeyHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyHasher")
            .field("pepper", &"[REDACTED]")
            .finish()
    }
}

impl KeyHasher {
    pub fn new(pepper: impl Into<Vec<u8>>) -> Self {
        Self {
            pepper: pepper.into(),
        }
    }

    /// Returns the lowercase hex HMAC-SHA256 of `value`
    pub fn fingerprint(&self, value: &str) -> Result<String, DomainError> {
        let mut mac = HmacSha256::new_from_slice(&self.pepper)
            .map_err(|e| DomainError::internal(format!("Invalid key pepper: {}", e)))?;
        mac.update(value.as_bytes());

        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// The identifying prefix shown for a public key
    pub fn prefix(public_key: &str) -> String {
        public_key.chars().take(KEY_PREFIX_LENGTH).collect()
    }
}
