//! `/bookmark/{id}` toggling and the `/bookmarked-posts` listing.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;
use crate::extract::CurrentUser;
use crate::handlers::PostBody;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookmark/{id}", post(toggle))
        .route("/bookmarked-posts", get(list))
}

#[derive(Debug, Serialize)]
struct BookmarkBody {
    bookmarked: bool,
    bookmarks: Vec<Uuid>,
}

async fn toggle(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<BookmarkBody>> {
    let outcome = state.bookmarks.toggle(user.0.sub, id).await?;
    Ok(Json(BookmarkBody {
        bookmarked: outcome.bookmarked,
        bookmarks: outcome.bookmarks,
    }))
}

async fn list(State(state): State<AppState>, user: CurrentUser) -> Result<Json<Vec<PostBody>>> {
    let posts = state.bookmarks.bookmarked_posts(user.0.sub).await?;
    Ok(Json(posts.into_iter().map(PostBody::from).collect()))
}
