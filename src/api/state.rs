//! Application state for shared services

use std::sync::Arc;

use crate::config::FeedConfig;
use crate::infrastructure::api_key::{ApiKeyService, KeyGenerator, KeyHasher};
use crate::infrastructure::services::MovieService;
use crate::infrastructure::storage::Stores;

/// Services and settings shared by every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub movie_service: MovieService,
    pub api_key_service: ApiKeyService,
    pub feed: Arc<FeedConfig>,
    /// Whether failure details are appended to `Execution Failed` messages
    pub expose_error_details: bool,
}

impl AppState {
    /// Wires the services over the given stores
    pub fn new(
        stores: Stores,
        generator: Arc<dyn KeyGenerator>,
        hasher: KeyHasher,
        feed: FeedConfig,
    ) -> Self {
        Self {
            movie_service: MovieService::new(stores.movies),
            api_key_service: ApiKeyService::new(stores.api_keys, generator, hasher),
            feed: Arc::new(feed),
            expose_error_details: false,
        }
    }

    pub fn with_error_details(mut self, expose: bool) -> Self {
        self.expose_error_details = expose;
        self
    }
}
