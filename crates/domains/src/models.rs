//! # Domain Models
//!
//! These structs represent the core entities of Inkcap.
//! We use UUID v7 for time-ordered, globally unique identification.

use std::collections::HashSet;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use mime::Mime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Unique handle, at least four characters.
    pub username: String,
    /// Argon2id hash in PHC string format.
    pub password_hash: String,
    /// Ids of posts this user has bookmarked. Order is irrelevant.
    pub bookmarks: HashSet<Uuid>,
}

/// A published blog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    /// Rich-text payload, stored opaquely as produced by the editor.
    pub content: String,
    /// File name of the cover image under the media root.
    pub cover: String,
    /// Immutable once set; only this user may mutate or delete the post.
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The author fields exposed alongside a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorRef {
    pub id: Uuid,
    pub username: String,
}

/// A post joined with its author for API responses.
#[derive(Debug, Clone)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: AuthorRef,
}

/// Text fields of a post as submitted by a client.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub summary: String,
    pub content: String,
}

/// An uploaded cover image prior to storage.
#[derive(Debug, Clone)]
pub struct CoverUpload {
    pub data: Bytes,
    /// Client-supplied file name, used only as a fallback for type sniffing.
    pub filename: String,
    pub content_type: Option<Mime>,
}

/// Claims carried by a verified token.
#[derive(Debug, Clone)]
pub struct AuthClaims {
    pub sub: Uuid,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}
