//! Request handlers, grouped by API area, plus the response shapes shared
//! between them.

pub mod auth;
pub mod bookmarks;
pub mod posts;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use domains::PostWithAuthor;

/// A post as returned to the browser client.
#[derive(Debug, Serialize)]
pub struct PostBody {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub cover: String,
    pub author: AuthorBody,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct AuthorBody {
    pub id: Uuid,
    pub username: String,
}

impl From<PostWithAuthor> for PostBody {
    fn from(joined: PostWithAuthor) -> Self {
        Self {
            id: joined.post.id,
            title: joined.post.title,
            summary: joined.post.summary,
            content: joined.post.content,
            cover: joined.post.cover,
            author: AuthorBody {
                id: joined.author.id,
                username: joined.author.username,
            },
            created_at: joined.post.created_at,
            updated_at: joined.post.updated_at,
        }
    }
}
