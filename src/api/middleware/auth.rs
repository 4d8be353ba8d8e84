//! API key authorization extractor

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::{ApiKey, AuthResult};

pub const NO_AUTHORIZATION_MESSAGE: &str = "No authorization found";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Could not validate credentials";

/// Extractor that requires a known public key in the `Authorization`
/// header (`Bearer <public key>`)
///
/// Place it before any `Path` or `Json` extractor so an unauthorized
/// request is rejected before the handler touches any record.
#[derive(Debug, Clone)]
pub struct RequireApiKey(pub ApiKey);

impl FromRequestParts<AppState> for RequireApiKey {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_authorization(&parts.headers)?;

        match state.api_key_service.authorize(token).await? {
            AuthResult::Authorized(api_key) => {
                debug!(key_prefix = %api_key.key_prefix(), "Request authorized");
                Ok(RequireApiKey(api_key))
            }
            AuthResult::Unauthorized => Err(ApiError::forbidden(INVALID_CREDENTIALS_MESSAGE)),
        }
    }
}

fn extract_authorization(headers: &axum::http::HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::forbidden(NO_AUTHORIZATION_MESSAGE))?;

    let value = value
        .to_str()
        .map_err(|_| ApiError::forbidden(INVALID_CREDENTIALS_MESSAGE))?;

    if value.is_empty() {
        return Err(ApiError::forbidden(NO_AUTHORIZATION_MESSAGE));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, StatusCode};

    use super::*;

    #[test]
    fn test_extract_authorization() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer abc".parse().unwrap());

        assert_eq!(extract_authorization(&headers).unwrap(), "Bearer abc");
    }

    #[test]
    fn test_missing_or_empty_header() {
        let err = extract_authorization(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.response.error.message, NO_AUTHORIZATION_MESSAGE);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(""));
        let err = extract_authorization(&headers).unwrap_err();
        assert_eq!(err.response.error.message, NO_AUTHORIZATION_MESSAGE);
    }

    #[test]
    fn test_non_ascii_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xff\xfe").unwrap(),
        );

        let err = extract_authorization(&headers).unwrap_err();
        assert_eq!(err.response.error.message, INVALID_CREDENTIALS_MESSAGE);
    }
}
