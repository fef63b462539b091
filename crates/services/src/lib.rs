//! Business logic over the domain ports.
//!
//! Each service owns one area of the API surface and is handed its
//! collaborators as trait objects, so the binary decides which adapters
//! actually back them.

pub mod auth;
pub mod bookmarks;
pub mod posts;

pub use auth::AuthService;
pub use bookmarks::{BookmarkService, BookmarkToggle};
pub use posts::PostService;
