#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use movie_api::api::{create_router, AppState};
use movie_api::config::FeedConfig;
use movie_api::domain::{DomainError, Filter, Movie, MovieId, NewMovie, Storage};
use movie_api::infrastructure::api_key::{KeyHasher, RandomKeyGenerator};
use movie_api::infrastructure::storage::{InMemoryStorage, StorageFactory, Stores};

pub const CORS_ORIGIN: &str = "http://localhost:4200";

/// State over fresh in-memory stores
pub fn test_state() -> AppState {
    state_over(StorageFactory::in_memory())
}

pub fn state_over(stores: Stores) -> AppState {
    AppState::new(
        stores,
        Arc::new(RandomKeyGenerator::new()),
        KeyHasher::new("integration-pepper"),
        FeedConfig::default(),
    )
}

/// Build the full application router with all middleware layers
pub fn build_test_app(state: AppState) -> Router {
    create_router(state, &[CORS_ORIGIN.to_string()])
}

pub fn test_app() -> Router {
    build_test_app(test_state())
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn request(method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
    }

    match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, request(Method::GET, uri, None, None)).await
}

/// Issues a key for `domain`, returning `(public, secret)`
pub async fn issue_key(app: &Router, domain: &str) -> (String, String) {
    let response = send(
        app,
        request(
            Method::POST,
            "/keys",
            Some(serde_json::json!({ "domain": domain })),
            None,
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let json = response.json();
    (
        json["public"].as_str().unwrap().to_string(),
        json["secret"].as_str().unwrap().to_string(),
    )
}

pub fn mission_impossible() -> Value {
    serde_json::json!({
        "title": "Mission Impossible",
        "subtitle": "Beyond Missions",
        "price": 345.00,
        "description": "This is"
    })
}

/// Movie store that fails every call, for the `Execution Failed` path
#[derive(Debug)]
pub struct BrokenMovieStorage;

fn broken<T>() -> Result<T, DomainError> {
    Err(DomainError::storage("connection refused"))
}

#[async_trait]
impl Storage<Movie> for BrokenMovieStorage {
    async fn get(&self, _key: MovieId) -> Result<Option<Movie>, DomainError> {
        broken()
    }

    async fn list(&self, _offset: usize, _limit: usize) -> Result<Vec<Movie>, DomainError> {
        broken()
    }

    async fn find_first(&self, _filter: &Filter) -> Result<Option<Movie>, DomainError> {
        broken()
    }

    async fn create(&self, _draft: NewMovie) -> Result<Movie, DomainError> {
        broken()
    }

    async fn update(&self, _entity: Movie) -> Result<Movie, DomainError> {
        broken()
    }

    async fn delete(&self, _key: MovieId) -> Result<bool, DomainError> {
        broken()
    }

    async fn count(&self) -> Result<usize, DomainError> {
        broken()
    }
}

/// Stores whose movie table is broken while keys keep working
pub fn broken_movie_stores() -> Stores {
    let mut stores = StorageFactory::in_memory();
    stores.movies = Arc::new(BrokenMovieStorage);
    stores
}

/// Movie store whose listing panics; every other call is served in memory
#[derive(Debug, Default)]
pub struct PanickingMovieStorage {
    inner: InMemoryStorage<Movie>,
}

#[async_trait]
impl Storage<Movie> for PanickingMovieStorage {
    async fn get(&self, key: MovieId) -> Result<Option<Movie>, DomainError> {
        self.inner.get(key).await
    }

    async fn list(&self, _offset: usize, _limit: usize) -> Result<Vec<Movie>, DomainError> {
        panic!("movie index corrupted");
    }

    async fn find_first(&self, filter: &Filter) -> Result<Option<Movie>, DomainError> {
        self.inner.find_first(filter).await
    }

    async fn create(&self, draft: NewMovie) -> Result<Movie, DomainError> {
        self.inner.create(draft).await
    }

    async fn update(&self, entity: Movie) -> Result<Movie, DomainError> {
        self.inner.update(entity).await
    }

    async fn delete(&self, key: MovieId) -> Result<bool, DomainError> {
        self.inner.delete(key).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        self.inner.count().await
    }
}

pub fn panicking_movie_stores() -> Stores {
    let mut stores = StorageFactory::in_memory();
    stores.movies = Arc::new(PanickingMovieStorage::default());
    stores
}
