//! `/register`, `/login`, `/profile`, and `/logout`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::Result;
use crate::extract::{CurrentUser, TOKEN_COOKIE};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/profile", get(profile))
}

#[derive(Debug, Deserialize)]
struct CredentialsBody {
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct UserBody {
    id: Uuid,
    username: String,
}

async fn register(
    State(state): State<AppState>,
    Json(body): Json<CredentialsBody>,
) -> Result<(StatusCode, Json<UserBody>)> {
    let user = state.auth.register(&body.username, &body.password).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserBody {
            id: user.id,
            username: user.username,
        }),
    ))
}

async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<CredentialsBody>,
) -> Result<(CookieJar, Json<UserBody>)> {
    let (user, token) = state.auth.login(&body.username, &body.password).await?;

    let mut cookie = Cookie::new(TOKEN_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);

    Ok((
        jar.add(cookie),
        Json(UserBody {
            id: user.id,
            username: user.username,
        }),
    ))
}

async fn profile(user: CurrentUser) -> Json<UserBody> {
    Json(UserBody {
        id: user.0.sub,
        username: user.0.username,
    })
}

async fn logout(jar: CookieJar) -> (CookieJar, Json<serde_json::Value>) {
    let mut stale = Cookie::new(TOKEN_COOKIE, "");
    stale.set_path("/");
    (jar.remove(stale), Json(json!({ "message": "logged out" })))
}
