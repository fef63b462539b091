//! Cross-cutting request middleware.

use axum::http::header::{InvalidHeaderValue, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;

/// CORS for the browser client: one trusted origin, cookies allowed.
///
/// Credentials and a wildcard origin are mutually exclusive, so the origin
/// must be configured explicitly.
pub fn cors_policy(client_origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin = client_origin.parse::<HeaderValue>()?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]))
}
