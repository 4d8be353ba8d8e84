//! Movie endpoints

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::api::middleware::RequireApiKey;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{DeleteOutcome, DomainError, Movie, MovieId, NewMovie, Price};
use crate::infrastructure::services::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

pub const MOVIE_DELETED_MESSAGE: &str = "Movie deleted successfully!";

/// Body of `POST /movies` and `PUT /movies/{id}`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MovieRequest {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 150, message = "must be at most 150 characters"))]
    pub subtitle: Option<String>,
    pub price: Price,
    #[serde(default)]
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub description: Option<String>,
}

impl TryFrom<MovieRequest> for NewMovie {
    type Error = DomainError;

    fn try_from(request: MovieRequest) -> Result<Self, Self::Error> {
        Ok(NewMovie::new(
            request.title,
            request.subtitle,
            request.price,
            request.description,
        )?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieResponse {
    pub id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub price: Price,
    pub description: Option<String>,
}

impl From<&Movie> for MovieResponse {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id().value(),
            title: movie.title().to_string(),
            subtitle: movie.subtitle().map(String::from),
            price: movie.price(),
            description: movie.description().map(String::from),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMoviesQuery {
    /// Exact title to look up; at most one movie is returned. An empty
    /// value lists the catalogue.
    pub title: Option<String>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

fn parse_movie_id(raw: &str) -> Result<MovieId, ApiError> {
    raw.parse::<i64>()
        .map(MovieId::new)
        .map_err(|_| ApiError::unprocessable(format!("Invalid movie id '{}'", raw)))
}

fn movie_not_found(id: MovieId) -> ApiError {
    ApiError::not_found(format!("Movie '{}' not found", id))
}

/// GET /movies and GET /
pub async fn list_movies(
    State(state): State<AppState>,
    query: Result<Query<ListMoviesQuery>, QueryRejection>,
) -> Result<Json<Vec<MovieResponse>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::unprocessable(e.body_text()))?;

    if let Some(title) = query.title.filter(|title| !title.is_empty()) {
        debug!(title = %title, "Looking up movie by title");

        let movie = state.movie_service.get_by_title(&title).await?;
        return Ok(Json(movie.iter().map(MovieResponse::from).collect()));
    }

    let offset = query.offset.unwrap_or(0);
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_LIMIT)
        .clamp(1, MAX_PAGE_LIMIT);

    let movies = state.movie_service.list(offset, limit).await?;
    Ok(Json(movies.iter().map(MovieResponse::from).collect()))
}

/// GET /movies/{id}
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MovieResponse>, ApiError> {
    let id = parse_movie_id(&id)?;

    let movie = state
        .movie_service
        .get(id)
        .await?
        .ok_or_else(|| movie_not_found(id))?;

    Ok(Json(MovieResponse::from(&movie)))
}

/// POST /movies
pub async fn create_movie(
    State(state): State<AppState>,
    RequireApiKey(api_key): RequireApiKey,
    Json(request): Json<MovieRequest>,
) -> Result<(StatusCode, Json<MovieResponse>), ApiError> {
    debug!(domain = %api_key.domain(), title = %request.title, "Creating movie");

    let movie = state.movie_service.create(request.try_into()?).await?;

    Ok((StatusCode::CREATED, Json(MovieResponse::from(&movie))))
}

/// PUT /movies/{id}
///
/// An unknown id is reported as `400`.
pub async fn update_movie(
    State(state): State<AppState>,
    RequireApiKey(api_key): RequireApiKey,
    Path(id): Path<String>,
    Json(request): Json<MovieRequest>,
) -> Result<Json<MovieResponse>, ApiError> {
    let id = parse_movie_id(&id)?;
    debug!(domain = %api_key.domain(), id = %id, "Updating movie");

    let movie = state
        .movie_service
        .update(id, request.try_into()?)
        .await
        .map_err(|e| ApiError::from(e).not_found_as_bad_request())?;

    Ok(Json(MovieResponse::from(&movie)))
}

/// DELETE /movies/{id}
pub async fn delete_movie(
    State(state): State<AppState>,
    RequireApiKey(api_key): RequireApiKey,
    Path(id): Path<String>,
) -> Result<Json<&'static str>, ApiError> {
    let id = parse_movie_id(&id)?;
    debug!(domain = %api_key.domain(), id = %id, "Deleting movie");

    match state.movie_service.delete(id).await? {
        DeleteOutcome::Deleted => Ok(Json(MOVIE_DELETED_MESSAGE)),
        DeleteOutcome::NotFound => Err(movie_not_found(id)),
    }
}

pub fn create_movies_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_movies).post(create_movie))
        .route(
            "/{id}",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
}
