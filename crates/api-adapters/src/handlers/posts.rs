//! `/post`: multipart create and update, public listing and fetch,
//! author-only delete.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use mime_guess::mime::Mime;
use serde_json::json;
use uuid::Uuid;

use domains::{AppError, CoverUpload, PostDraft};

use crate::error::{ApiError, Result};
use crate::extract::CurrentUser;
use crate::handlers::PostBody;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/post", get(list).post(create).put(update))
        .route("/post/{id}", get(fetch).delete(remove))
}

async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<PostBody>)> {
    let form = PostForm::read(multipart).await?;
    let draft = form.draft()?;
    let cover = form.cover.ok_or_else(|| missing_field("file"))?;

    let created = state.posts.create(user.0.sub, draft, cover).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    multipart: Multipart,
) -> Result<Json<PostBody>> {
    let form = PostForm::read(multipart).await?;
    let id = form.id.ok_or_else(|| missing_field("id"))?;
    let draft = form.draft()?;

    let updated = state.posts.update(user.0.sub, id, draft, form.cover).await?;
    Ok(Json(updated.into()))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<PostBody>>> {
    let posts = state.posts.list_recent().await?;
    Ok(Json(posts.into_iter().map(PostBody::from).collect()))
}

async fn fetch(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<PostBody>> {
    let post = state.posts.fetch(id).await?;
    Ok(Json(post.into()))
}

async fn remove(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    state.posts.delete(user.0.sub, id).await?;
    Ok(Json(json!({ "message": "post deleted" })))
}

/// The fields of the `/post` multipart form. Create and update share the
/// shape; update additionally carries `id`, and its `file` is optional.
#[derive(Default)]
struct PostForm {
    id: Option<Uuid>,
    title: Option<String>,
    summary: Option<String>,
    content: Option<String>,
    cover: Option<CoverUpload>,
}

impl PostForm {
    async fn read(mut multipart: Multipart) -> Result<Self> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match name.as_str() {
                "id" => {
                    let raw = field.text().await.map_err(multipart_error)?;
                    let id = Uuid::parse_str(raw.trim()).map_err(|_| {
                        ApiError::App(AppError::Validation(format!(
                            "'{raw}' is not a valid post id"
                        )))
                    })?;
                    form.id = Some(id);
                }
                "title" => form.title = Some(field.text().await.map_err(multipart_error)?),
                "summary" => form.summary = Some(field.text().await.map_err(multipart_error)?),
                "content" => form.content = Some(field.text().await.map_err(multipart_error)?),
                "file" => {
                    let filename = field.file_name().unwrap_or("cover").to_string();
                    let content_type = field.content_type().and_then(|raw| raw.parse::<Mime>().ok());
                    let data = field.bytes().await.map_err(multipart_error)?;
                    form.cover = Some(CoverUpload {
                        data,
                        filename,
                        content_type,
                    });
                }
                // Unknown fields are ignored, like any HTML form handler.
                _ => {}
            }
        }
        Ok(form)
    }

    fn draft(&self) -> Result<PostDraft> {
        Ok(PostDraft {
            title: self.title.clone().ok_or_else(|| missing_field("title"))?,
            summary: self.summary.clone().ok_or_else(|| missing_field("summary"))?,
            content: self.content.clone().ok_or_else(|| missing_field("content"))?,
        })
    }
}

fn missing_field(name: &str) -> ApiError {
    ApiError::App(AppError::Validation(format!("missing form field '{name}'")))
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::PayloadTooLarge;
    }
    ApiError::App(AppError::Validation(format!(
        "malformed multipart body: {err}"
    )))
}
