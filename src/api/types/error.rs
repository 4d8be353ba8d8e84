//! API error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Error categories reported in the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    ValidationError,
    PermissionError,
    NotFoundError,
    ExecutionError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::ValidationError => write!(f, "validation_error"),
            Self::PermissionError => write!(f, "permission_error"),
            Self::NotFoundError => write!(f, "not_found_error"),
            Self::ExecutionError => write!(f, "execution_error"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
}

/// Detail of a storage or internal failure, carried as a response
/// extension until the failure middleware renders the final message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionFailure(pub String);

/// Prefix of the message reported for storage and internal failures
pub const EXECUTION_FAILED: &str = "Execution Failed";

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
    failure: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                },
            },
            failure: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiErrorType::InvalidRequestError, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            ApiErrorType::ValidationError,
            message,
        )
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, ApiErrorType::PermissionError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, message)
    }

    /// Storage or unexpected failure, reported as `400 Execution Failed`
    pub fn execution_failed(detail: impl Into<String>) -> Self {
        let mut error = Self::new(
            StatusCode::BAD_REQUEST,
            ApiErrorType::ExecutionError,
            EXECUTION_FAILED,
        );
        error.failure = Some(detail.into());
        error
    }

    /// Reports a missing record as `400` instead of `404`
    pub fn not_found_as_bad_request(self) -> Self {
        if self.status == StatusCode::NOT_FOUND {
            Self::new(
                StatusCode::BAD_REQUEST,
                ApiErrorType::InvalidRequestError,
                self.response.error.message,
            )
        } else {
            self
        }
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.response)).into_response();
        if let Some(detail) = self.failure {
            response.extensions_mut().insert(ExecutionFailure(detail));
        }
        response
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Conflict { message } => Self::bad_request(message),
            DomainError::Validation { message } => Self::unprocessable(message),
            DomainError::Unauthorized { message } => Self::forbidden(message),
            DomainError::Storage { message } | DomainError::Internal { message } => {
                Self::execution_failed(message)
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_conversion() {
        let cases = [
            (DomainError::not_found("gone"), StatusCode::NOT_FOUND),
            (DomainError::conflict("Movie already exists!"), StatusCode::BAD_REQUEST),
            (DomainError::validation("too long"), StatusCode::UNPROCESSABLE_ENTITY),
            (DomainError::unauthorized("nope"), StatusCode::FORBIDDEN),
            (DomainError::storage("db down"), StatusCode::BAD_REQUEST),
            (DomainError::internal("bug"), StatusCode::BAD_REQUEST),
        ];

        for (domain_err, status) in cases {
            let api_err: ApiError = domain_err.into();
            assert_eq!(api_err.status, status);
        }
    }

    #[test]
    fn test_conflict_keeps_message() {
        let api_err: ApiError = DomainError::conflict("Domain already exists!").into();
        assert_eq!(api_err.response.error.message, "Domain already exists!");
        assert!(api_err.failure().is_none());
    }

    #[test]
    fn test_storage_failure_hides_detail_in_body() {
        let api_err: ApiError = DomainError::storage("password authentication failed").into();

        assert_eq!(api_err.response.error.message, EXECUTION_FAILED);
        assert_eq!(api_err.failure(), Some("password authentication failed"));

        let response = api_err.into_response();
        let failure = response.extensions().get::<ExecutionFailure>().unwrap();
        assert_eq!(failure.0, "password authentication failed");
    }

    #[test]
    fn test_not_found_as_bad_request() {
        let err = ApiError::not_found("Movie '4' not found").not_found_as_bad_request();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error.message, "Movie '4' not found");

        let err = ApiError::forbidden("x").not_found_as_bad_request();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::forbidden("Could not validate credentials");
        let json = serde_json::to_value(&err.response).unwrap();

        assert_eq!(json["error"]["type"], "permission_error");
        assert_eq!(json["error"]["message"], "Could not validate credentials");
    }
}
