//! State shared across all request handlers.

use services::{AuthService, BookmarkService, PostService};

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub posts: PostService,
    pub bookmarks: BookmarkService,
}
