//! Rendering of storage and internal failures
//!
//! Handlers report such failures as `ApiError::execution_failed`, which
//! leaves the detail in an `ExecutionFailure` response extension. This
//! middleware, which sees the original request line, turns that into the
//! final `Execution Failed: {METHOD}: {URL}` message and logs the detail.
//! Panics caught by `CatchPanicLayer` are turned into the same failure
//! through [`panic_response`].

use std::any::Any;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::api::state::AppState;
use crate::api::types::error::{ApiError, ExecutionFailure, EXECUTION_FAILED};

/// Builds the client-facing message for a failed request
pub fn execution_failed_message(method: &str, url: &str, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("{}: {}: {}. Detail: {}", EXECUTION_FAILED, method, url, detail),
        None => format!("{}: {}: {}", EXECUTION_FAILED, method, url),
    }
}

/// Renders a caught panic as an execution failure carrying the panic
/// message, to be rewritten by [`failure_middleware`]
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "handler panicked".to_string()
    };

    ApiError::execution_failed(detail).into_response()
}

pub async fn failure_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let url = request.uri().to_string();

    let response = next.run(request).await;

    let Some(ExecutionFailure(detail)) = response.extensions().get::<ExecutionFailure>().cloned()
    else {
        return response;
    };

    error!(method = %method, url = %url, detail = %detail, "Request execution failed");

    let shown = state.expose_error_details.then_some(detail.as_str());
    let mut rendered = ApiError::execution_failed(detail.clone());
    rendered.response.error.message = execution_failed_message(&method, &url, shown);

    let mut response = rendered.into_response();
    response.extensions_mut().remove::<ExecutionFailure>();
    response
}
