//! Domain layer - Core business logic and entities

pub mod api_key;
pub mod error;
pub mod movie;
pub mod outcome;
pub mod storage;

pub use api_key::{ApiKey, ApiKeyId, ApiKeyValidationError, AuthResult, NewApiKey};
pub use error::DomainError;
pub use movie::{Movie, MovieId, MovieValidationError, NewMovie, Price};
pub use outcome::DeleteOutcome;
pub use storage::{FieldValue, Fields, Filter, Storage, StorageEntity, StorageKey};

impl From<MovieValidationError> for DomainError {
    fn from(error: MovieValidationError) -> Self {
        DomainError::validation(error.to_string())
    }
}

impl From<ApiKeyValidationError> for DomainError {
    fn from(error: ApiKeyValidationError) -> Self {
        DomainError::validation(error.to_string())
    }
}
