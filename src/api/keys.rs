//! API key endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::api::middleware::RequireApiKey;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{ApiKey, ApiKeyId, DeleteOutcome};

pub const KEY_DELETED_MESSAGE: &str = "Key deleted successfully!";

/// Body of `POST /keys` and `PUT /keys/{domain}`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DomainRequest {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub domain: String,
}

/// Issued credential pair; the only time either key is returned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedKeyResponse {
    pub domain: String,
    pub public: String,
    pub secret: String,
}

/// Stored registration; credentials are only identified by their prefix
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiKeyResponse {
    pub id: i64,
    pub domain: String,
    pub key_prefix: String,
}

impl From<&ApiKey> for ApiKeyResponse {
    fn from(api_key: &ApiKey) -> Self {
        Self {
            id: api_key.id().value(),
            domain: api_key.domain().to_string(),
            key_prefix: api_key.key_prefix().to_string(),
        }
    }
}

fn key_not_found(key: &str) -> ApiError {
    ApiError::not_found(format!("Key '{}' not found", key))
}

/// POST /keys
pub async fn issue_key(
    State(state): State<AppState>,
    Json(request): Json<DomainRequest>,
) -> Result<(StatusCode, Json<IssuedKeyResponse>), ApiError> {
    debug!(domain = %request.domain, "Issuing API key");

    let issued = state.api_key_service.issue(&request.domain).await?;

    Ok((
        StatusCode::CREATED,
        Json(IssuedKeyResponse {
            domain: issued.api_key.domain().to_string(),
            public: issued.public,
            secret: issued.secret,
        }),
    ))
}

/// GET /keys/{key}
///
/// A segment that parses as an integer is looked up as an id, anything
/// else as a domain.
pub async fn get_key(
    State(state): State<AppState>,
    RequireApiKey(_caller): RequireApiKey,
    Path(key): Path<String>,
) -> Result<Json<ApiKeyResponse>, ApiError> {
    let api_key = match key.parse::<i64>() {
        Ok(id) => state.api_key_service.get(ApiKeyId::new(id)).await?,
        Err(_) => state.api_key_service.get_by_domain(&key).await?,
    };

    let api_key = api_key.ok_or_else(|| key_not_found(&key))?;
    Ok(Json(ApiKeyResponse::from(&api_key)))
}

/// DELETE /keys/{domain}
pub async fn delete_key(
    State(state): State<AppState>,
    RequireApiKey(caller): RequireApiKey,
    Path(domain): Path<String>,
) -> Result<Json<&'static str>, ApiError> {
    debug!(caller = %caller.domain(), domain = %domain, "Deleting API key");

    match state.api_key_service.delete(&domain).await? {
        DeleteOutcome::Deleted => Ok(Json(KEY_DELETED_MESSAGE)),
        DeleteOutcome::NotFound => Err(key_not_found(&domain)),
    }
}

/// PUT /keys/{domain}
///
/// Moves the registration to the domain in the body. An unknown domain is
/// reported as `400`.
pub async fn update_key(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    Json(request): Json<DomainRequest>,
) -> Result<Json<ApiKeyResponse>, ApiError> {
    debug!(from = %domain, to = %request.domain, "Updating API key domain");

    let api_key = state
        .api_key_service
        .update_domain(&domain, &request.domain)
        .await
        .map_err(|e| ApiError::from(e).not_found_as_bad_request())?;

    Ok(Json(ApiKeyResponse::from(&api_key)))
}

pub fn create_keys_router() -> Router<AppState> {
    Router::new()
        .route("/", post(issue_key))
        .route("/{key}", get(get_key).put(update_key).delete(delete_key))
}
