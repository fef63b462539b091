//! # Core Traits (Ports)
//!
//! Any adapter must implement these traits to be used by the binary.

use async_trait::async_trait;
#[cfg(any(test, feature = "testing"))]
use mockall::automock;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{AuthClaims, CoverUpload, Post, User};

/// Persistence contract for user accounts and their bookmark sets.
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user. Fails with `Conflict` when the username is taken.
    async fn insert(&self, user: User) -> Result<()>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn find_many(&self, ids: Vec<Uuid>) -> Result<Vec<User>>;
    /// Replaces the stored password hash.
    async fn set_password_hash(&self, user_id: Uuid, hash: &str) -> Result<()>;

    async fn add_bookmark(&self, user_id: Uuid, post_id: Uuid) -> Result<()>;
    async fn remove_bookmark(&self, user_id: Uuid, post_id: Uuid) -> Result<()>;
    /// Pulls `post_id` out of every user's bookmark set.
    async fn clear_bookmark_refs(&self, post_id: Uuid) -> Result<()>;
}

/// Persistence contract for posts.
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn insert(&self, post: Post) -> Result<()>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>>;
    async fn find_many(&self, ids: Vec<Uuid>) -> Result<Vec<Post>>;
    /// Newest first by creation time.
    async fn list_recent(&self, limit: i64) -> Result<Vec<Post>>;
    /// Persists the mutable fields of an existing post.
    async fn update(&self, post: Post) -> Result<()>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Storage contract for uploaded cover images.
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Persists a cover image and returns the stored file name.
    async fn save_cover(&self, upload: CoverUpload) -> Result<String>;
    /// Removes a stored cover. Missing files are not an error.
    async fn delete_cover(&self, name: &str) -> Result<()>;
}

/// Password hashing contract.
#[cfg_attr(any(test, feature = "testing"), automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String>;
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Signed-token contract for the auth cookie.
#[cfg_attr(any(test, feature = "testing"), automock)]
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user_id: Uuid, username: &str) -> Result<String>;
    fn verify(&self, token: &str) -> Result<AuthClaims>;
}
