//! The web routing and orchestration layer for Inkcap.

#[cfg(feature = "web-axum")]
pub mod error;
#[cfg(feature = "web-axum")]
pub mod extract;
#[cfg(feature = "web-axum")]
pub mod handlers;
#[cfg(feature = "web-axum")]
pub mod middleware;
#[cfg(feature = "web-axum")]
pub mod state;

#[cfg(feature = "web-axum")]
pub use middleware::cors_policy;
#[cfg(feature = "web-axum")]
pub use state::AppState;

#[cfg(feature = "web-axum")]
use std::path::Path;

#[cfg(feature = "web-axum")]
use axum::{extract::DefaultBodyLimit, routing::get, Router};
#[cfg(feature = "web-axum")]
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Assembles the full application router: the JSON API, static serving of
/// uploaded covers, and the cross-cutting layers.
#[cfg(feature = "web-axum")]
pub fn router(
    state: AppState,
    cors: CorsLayer,
    media_root: &Path,
    max_upload_bytes: usize,
) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(handlers::auth::routes())
        .merge(handlers::posts::routes())
        .merge(handlers::bookmarks::routes())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .nest_service("/uploads", ServeDir::new(media_root))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(feature = "web-axum")]
async fn health() -> &'static str {
    "OK"
}
