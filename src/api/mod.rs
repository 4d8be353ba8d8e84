//! API layer - HTTP endpoints and middleware

pub mod feeds;
pub mod health;
pub mod keys;
pub mod middleware;
pub mod movies;
pub mod router;
pub mod state;
pub mod types;

pub use middleware::RequireApiKey;
pub use router::{cors_layer, create_router};
pub use state::AppState;
