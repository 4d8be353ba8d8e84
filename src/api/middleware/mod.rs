//! API middleware components

pub mod auth;
pub mod failure;
pub mod logging;

pub use auth::{RequireApiKey, INVALID_CREDENTIALS_MESSAGE, NO_AUTHORIZATION_MESSAGE};
pub use failure::{failure_middleware, panic_response};
pub use logging::logging_middleware;
