use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

pub mod handlers;
pub mod types;

/// JSON API under `/api`, open to any origin.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/generate", post(handlers::generate))
        .route("/api/health", get(handlers::health))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
}
