//! Infrastructure services

mod movie_service;

pub use movie_service::{MovieService, DEFAULT_PAGE_LIMIT, DUPLICATE_MOVIE_MESSAGE, MAX_PAGE_LIMIT};
