//! API key validation

use thiserror::Error;

/// Maximum registered domain length
pub const MAX_DOMAIN_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiKeyValidationError {
    #[error("Domain cannot be empty")]
    EmptyDomain,

    #[error("Domain exceeds maximum length of {max} characters (got {actual})")]
    DomainTooLong { max: usize, actual: usize },

    #[error("Domain cannot contain whitespace")]
    WhitespaceInDomain,
}

/// Validates a caller domain (URL or origin)
pub fn validate_domain(domain: &str) -> Result<(), ApiKeyValidationError> {
    if domain.is_empty() {
        return Err(ApiKeyValidationError::EmptyDomain);
    }

    let actual = domain.chars().count();

    if actual > MAX_DOMAIN_LENGTH {
        return Err(ApiKeyValidationError::DomainTooLong {
            max: MAX_DOMAIN_LENGTH,
            actual,
        });
    }

    if domain.chars().any(char::is_whitespace) {
        return Err(ApiKeyValidationError::WhitespaceInDomain);
    }

    Ok(())
}
