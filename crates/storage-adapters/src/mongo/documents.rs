//! Document shapes for the `users` and `posts` collections, plus the
//! conversions between them and the domain models.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domains::{AppError, Post, Result, User};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UserDocument {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub bookmarks: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PostDocument {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub cover: String,
    pub author_id: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl UserDocument {
    pub(crate) fn from_user(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            bookmarks: user.bookmarks.iter().map(Uuid::to_string).collect(),
        }
    }

    pub(crate) fn into_user(self) -> Result<User> {
        let bookmarks = self
            .bookmarks
            .iter()
            .map(|raw| parse_id(raw))
            .collect::<Result<HashSet<Uuid>>>()?;
        Ok(User {
            id: parse_id(&self.id)?,
            username: self.username,
            password_hash: self.password_hash,
            bookmarks,
        })
    }
}

impl PostDocument {
    pub(crate) fn from_post(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            summary: post.summary.clone(),
            content: post.content.clone(),
            cover: post.cover.clone(),
            author_id: post.author_id.to_string(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }

    pub(crate) fn into_post(self) -> Result<Post> {
        Ok(Post {
            id: parse_id(&self.id)?,
            title: self.title,
            summary: self.summary,
            content: self.content,
            cover: self.cover,
            author_id: parse_id(&self.author_id)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::Internal(format!("malformed id in document: {raw}")))
}
