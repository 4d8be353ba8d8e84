//! Movie API
//!
//! A small REST service over a movie catalogue with:
//! - Movie CRUD, mutations gated by API key
//! - API key issuance per caller domain
//! - RSS and Atom feeds of the catalogue

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use api::state::AppState;
use infrastructure::api_key::{KeyHasher, RandomKeyGenerator};
use infrastructure::storage::StorageFactory;

/// Builds the application state from configuration, connecting and
/// migrating the configured storage backend
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = config
        .storage
        .to_storage_config()
        .map_err(anyhow::Error::msg)?;

    info!(backend = ?storage_config.storage_type(), "Initializing storage");

    let stores = StorageFactory::create(&storage_config)
        .await
        .context("Failed to initialize storage")?;

    if config.security.uses_default_pepper() {
        warn!("security.key_pepper is the built-in placeholder; set APP__SECURITY__KEY_PEPPER");
    }

    let state = AppState::new(
        stores,
        Arc::new(RandomKeyGenerator::new()),
        KeyHasher::new(config.security.key_pepper.as_bytes()),
        config.feed.clone(),
    )
    .with_error_details(config.server.expose_error_details);

    Ok(state)
}
