//! Cookie-based authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use domains::{AppError, AuthClaims};

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the session cookie, as the browser client expects it.
pub const TOKEN_COOKIE: &str = "token";

/// The verified caller, extracted from the `token` cookie.
///
/// Any handler taking this parameter is a protected route: requests
/// without a valid token are rejected with 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthClaims);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                ApiError::App(AppError::Unauthorized("missing token cookie".to_string()))
            })?;

        let claims = state.auth.authenticate(&token).map_err(ApiError::App)?;
        Ok(CurrentUser(claims))
    }
}
