//! Movie domain
//!
//! Movie records, their fixed-point price and input validation rules.

mod entity;
mod validation;

pub use entity::{Movie, MovieId, NewMovie, Price};
pub use validation::{
    MovieValidationError, MAX_DESCRIPTION_LENGTH, MAX_SUBTITLE_LENGTH, MAX_TITLE_LENGTH,
};
