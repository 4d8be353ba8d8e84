//! Movie service - CRUD operations for movie records

use std::sync::Arc;

use tracing::info;

use crate::domain::storage::{Filter, Storage};
use crate::domain::{DeleteOutcome, DomainError, Movie, MovieId, NewMovie};

pub const DUPLICATE_MOVIE_MESSAGE: &str = "Movie already exists!";

/// Default page size for listings
pub const DEFAULT_PAGE_LIMIT: usize = 50;

/// Largest page a caller may request
pub const MAX_PAGE_LIMIT: usize = 100;

/// Movie service for CRUD operations
#[derive(Debug, Clone)]
pub struct MovieService {
    storage: Arc<dyn Storage<Movie>>,
}

fn duplicate_movie(e: DomainError) -> DomainError {
    match e {
        DomainError::Conflict { .. } => DomainError::conflict(DUPLICATE_MOVIE_MESSAGE),
        other => other,
    }
}

impl MovieService {
    pub fn new(storage: Arc<dyn Storage<Movie>>) -> Self {
        Self { storage }
    }

    fn same_title_and_subtitle(movie: &NewMovie) -> Filter {
        Filter::new()
            .eq("title", movie.title())
            .eq("subtitle", movie.subtitle().map(String::from))
    }

    /// Create a new movie; the title and subtitle pair must be free
    pub async fn create(&self, movie: NewMovie) -> Result<Movie, DomainError> {
        if self
            .storage
            .exists(&Self::same_title_and_subtitle(&movie))
            .await?
        {
            return Err(DomainError::conflict(DUPLICATE_MOVIE_MESSAGE));
        }

        let created = self.storage.create(movie).await.map_err(duplicate_movie)?;

        info!(id = %created.id(), title = %created.title(), "Movie created");
        Ok(created)
    }

    /// List one page of movies in identity order
    pub async fn list(&self, offset: usize, limit: usize) -> Result<Vec<Movie>, DomainError> {
        self.storage.list(offset, limit).await
    }

    /// Get a movie by ID
    pub async fn get(&self, id: MovieId) -> Result<Option<Movie>, DomainError> {
        self.storage.get(id).await
    }

    /// Get the first movie carrying exactly this title
    pub async fn get_by_title(&self, title: &str) -> Result<Option<Movie>, DomainError> {
        self.storage
            .find_first(&Filter::new().eq("title", title))
            .await
    }

    /// Replace all values of an existing movie
    pub async fn update(&self, id: MovieId, values: NewMovie) -> Result<Movie, DomainError> {
        let mut movie = self
            .storage
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Movie '{}' not found", id)))?;

        if let Some(other) = self
            .storage
            .find_first(&Self::same_title_and_subtitle(&values))
            .await?
        {
            if other.id() != id {
                return Err(DomainError::conflict(DUPLICATE_MOVIE_MESSAGE));
            }
        }

        movie.replace(values);
        let updated = self.storage.update(movie).await.map_err(duplicate_movie)?;

        info!(id = %updated.id(), "Movie updated");
        Ok(updated)
    }

    /// Number of stored movies
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }

    /// Delete a movie by ID
    pub async fn delete(&self, id: MovieId) -> Result<DeleteOutcome, DomainError> {
        let outcome = DeleteOutcome::from_deleted(self.storage.delete(id).await?);

        if outcome == DeleteOutcome::Deleted {
            info!(id = %id, "Movie deleted");
        }

        Ok(outcome)
    }
}
