//! Syndication feed endpoints

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};
use chrono::Utc;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::infrastructure::feed::{self, FEED_PAGE_SIZE};

/// GET /feeds/rss
pub async fn rss_feed(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let movies = state.movie_service.list(0, FEED_PAGE_SIZE).await?;
    let body = feed::rss::render(&state.feed, &movies);

    Ok(([(header::CONTENT_TYPE, feed::rss::CONTENT_TYPE)], body))
}

/// GET /feeds/atom
pub async fn atom_feed(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let movies = state.movie_service.list(0, FEED_PAGE_SIZE).await?;
    let body = feed::atom::render(&state.feed, &movies, Utc::now().fixed_offset());

    Ok(([(header::CONTENT_TYPE, feed::atom::CONTENT_TYPE)], body))
}

pub fn create_feeds_router() -> Router<AppState> {
    Router::new()
        .route("/rss", get(rss_feed))
        .route("/atom", get(atom_feed))
}
