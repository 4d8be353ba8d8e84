use axum::{
    http::HeaderValue,
    middleware,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::feeds;
use super::health;
use super::keys;
use super::middleware::{failure_middleware, logging_middleware, panic_response};
use super::movies;
use super::state::AppState;

/// CORS for the given origins with credentials; methods and headers are
/// mirrored from the preflight request
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Create the full router with application state
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(movies::list_movies))
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .nest("/movies", movies::create_movies_router())
        .nest("/keys", keys::create_keys_router())
        .nest("/feeds", feeds::create_feeds_router())
        // Must stay inside the failure middleware, which renders caught panics
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(state.clone(), failure_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors_layer(cors_origins)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_skips_invalid_origins() {
        // Construction must not panic on a malformed entry
        let _ = cors_layer(&[
            "http://localhost:4200".to_string(),
            "bad\norigin".to_string(),
        ]);
    }
}
