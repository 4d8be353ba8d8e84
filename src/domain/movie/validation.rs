//! Movie validation rules

use thiserror::Error;

/// Maximum title length
pub const MAX_TITLE_LENGTH: usize = 100;

/// Maximum subtitle length
pub const MAX_SUBTITLE_LENGTH: usize = 150;

/// Maximum description length
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MovieValidationError {
    #[error("Movie title cannot be empty")]
    EmptyTitle,

    #[error("Movie {field} exceeds maximum length of {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("Price must be a finite, non-negative amount")]
    InvalidPrice,

    #[error("Price is too large")]
    PriceOutOfRange,
}

pub fn validate_title(title: &str) -> Result<(), MovieValidationError> {
    if title.trim().is_empty() {
        return Err(MovieValidationError::EmptyTitle);
    }

    check_length("title", title, MAX_TITLE_LENGTH)
}

pub fn validate_subtitle(subtitle: Option<&str>) -> Result<(), MovieValidationError> {
    subtitle.map_or(Ok(()), |s| check_length("subtitle", s, MAX_SUBTITLE_LENGTH))
}

pub fn validate_description(description: Option<&str>) -> Result<(), MovieValidationError> {
    description.map_or(Ok(()), |d| {
        check_length("description", d, MAX_DESCRIPTION_LENGTH)
    })
}

fn check_length(field: &'static str, value: &str, max: usize) -> Result<(), MovieValidationError> {
    let actual = value.chars().count();

    if actual > max {
        return Err(MovieValidationError::TooLong { field, max, actual });
    }

    Ok(())
}
