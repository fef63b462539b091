//! Bookmark toggling and the bookmarked-posts listing.

use std::sync::Arc;

use uuid::Uuid;

use domains::{AppError, PostStore, PostWithAuthor, Result, UserStore};

use crate::posts::join_authors;

/// Outcome of a toggle: whether the post is now bookmarked, and the full
/// set afterwards (the shape the browser client keys on).
#[derive(Debug, Clone)]
pub struct BookmarkToggle {
    pub bookmarked: bool,
    pub bookmarks: Vec<Uuid>,
}

#[derive(Clone)]
pub struct BookmarkService {
    users: Arc<dyn UserStore>,
    posts: Arc<dyn PostStore>,
}

impl BookmarkService {
    pub fn new(users: Arc<dyn UserStore>, posts: Arc<dyn PostStore>) -> Self {
        Self { users, posts }
    }

    /// Adds the post to the caller's bookmarks, or removes it when already
    /// present. The store mutation is a set operation, so a replayed toggle
    /// cannot duplicate an entry.
    pub async fn toggle(&self, user_id: Uuid, post_id: Uuid) -> Result<BookmarkToggle> {
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(AppError::not_found("post", post_id));
        }
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("user", user_id))?;

        let bookmarked = !user.bookmarks.contains(&post_id);
        if bookmarked {
            self.users.add_bookmark(user_id, post_id).await?;
        } else {
            self.users.remove_bookmark(user_id, post_id).await?;
        }
        tracing::debug!(%user_id, %post_id, bookmarked, "toggled bookmark");

        let mut bookmarks: Vec<Uuid> = user.bookmarks.into_iter().collect();
        if bookmarked {
            bookmarks.push(post_id);
        } else {
            bookmarks.retain(|id| *id != post_id);
        }
        Ok(BookmarkToggle {
            bookmarked,
            bookmarks,
        })
    }

    /// The caller's bookmarked posts, authors populated.
    ///
    /// Posts deleted since the delete cascade ran cannot appear here, so no
    /// tombstone filtering is needed.
    pub async fn bookmarked_posts(&self, user_id: Uuid) -> Result<Vec<PostWithAuthor>> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("user", user_id))?;

        let ids: Vec<Uuid> = user.bookmarks.into_iter().collect();
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let posts = self.posts.find_many(ids).await?;
        join_authors(&self.users, posts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domains::{MockPostStore, MockUserStore, Post, User};

    fn stored_post(id: Uuid, author_id: Uuid) -> Post {
        let now = Utc::now();
        Post {
            id,
            title: "title".to_string(),
            summary: "summary".to_string(),
            content: "content".to_string(),
            cover: "cover.png".to_string(),
            author_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn stored_user(id: Uuid, bookmarks: &[Uuid]) -> User {
        User {
            id,
            username: "hazel".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            bookmarks: bookmarks.iter().copied().collect(),
        }
    }

    #[tokio::test]
    async fn toggle_on_adds_the_bookmark() {
        let user_id = Uuid::now_v7();
        let post_id = Uuid::now_v7();

        let mut posts = MockPostStore::new();
        posts
            .expect_find_by_id()
            .returning(move |id| Ok(Some(stored_post(id, Uuid::now_v7()))));
        let mut users = MockUserStore::new();
        users
            .expect_find_by_id()
            .returning(move |id| Ok(Some(stored_user(id, &[]))));
        users
            .expect_add_bookmark()
            .withf(move |u, p| *u == user_id && *p == post_id)
            .times(1)
            .returning(|_, _| Ok(()));

        let service = BookmarkService::new(Arc::new(users), Arc::new(posts));
        let outcome = service.toggle(user_id, post_id).await.unwrap();
        assert!(outcome.bookmarked);
        assert_eq!(outcome.bookmarks, vec![post_id]);
    }

    #[tokio::test]
    async fn toggle_off_removes_the_bookmark() {
        let user_id = Uuid::now_v7();
        let post_id = Uuid::now_v7();

        let mut posts = MockPostStore::new();
        posts
            .expect_find_by_id()
            .returning(move |id| Ok(Some(stored_post(id, Uuid::now_v7()))));
        let mut users = MockUserStore::new();
        users
            .expect_find_by_id()
            .returning(move |id| Ok(Some(stored_user(id, &[post_id]))));
        users
            .expect_remove_bookmark()
            .times(1)
            .returning(|_, _| Ok(()));

        let service = BookmarkService::new(Arc::new(users), Arc::new(posts));
        let outcome = service.toggle(user_id, post_id).await.unwrap();
        assert!(!outcome.bookmarked);
        assert!(outcome.bookmarks.is_empty());
    }

    #[tokio::test]
    async fn toggle_on_missing_post_is_not_found() {
        let mut posts = MockPostStore::new();
        posts.expect_find_by_id().returning(|_| Ok(None));

        let service = BookmarkService::new(Arc::new(MockUserStore::new()), Arc::new(posts));
        let err = service
            .toggle(Uuid::now_v7(), Uuid::now_v7())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(..)));
    }

    #[tokio::test]
    async fn bookmarked_posts_joins_authors() {
        let user_id = Uuid::now_v7();
        let author_id = Uuid::now_v7();
        let post_id = Uuid::now_v7();

        let mut users = MockUserStore::new();
        users
            .expect_find_by_id()
            .returning(move |id| Ok(Some(stored_user(id, &[post_id]))));
        users
            .expect_find_many()
            .returning(move |ids| {
                Ok(ids
                    .into_iter()
                    .map(|id| stored_user(id, &[]))
                    .collect())
            });
        let mut posts = MockPostStore::new();
        posts
            .expect_find_many()
            .withf(move |ids: &Vec<Uuid>| ids == &vec![post_id])
            .returning(move |ids| {
                Ok(ids
                    .into_iter()
                    .map(|id| stored_post(id, author_id))
                    .collect())
            });

        let service = BookmarkService::new(Arc::new(users), Arc::new(posts));
        let listed = service.bookmarked_posts(user_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].post.id, post_id);
        assert_eq!(listed[0].author.id, author_id);
    }

    #[tokio::test]
    async fn bookmarked_posts_with_empty_set_skips_the_store() {
        let user_id = Uuid::now_v7();
        let mut users = MockUserStore::new();
        users
            .expect_find_by_id()
            .returning(move |id| Ok(Some(stored_user(id, &[]))));

        // No find_many expectation on either store: a call would panic.
        let service =
            BookmarkService::new(Arc::new(users), Arc::new(MockPostStore::new()));
        assert!(service.bookmarked_posts(user_id).await.unwrap().is_empty());
    }
}
