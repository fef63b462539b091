//! In-memory implementations of the persistence ports, so the API suite
//! runs without a database.

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use domains::{AppError, Post, PostStore, Result, User, UserStore};

#[derive(Default)]
pub struct MemoryUserStore(Mutex<Vec<User>>);

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: User) -> Result<()> {
        let mut guard = self.0.lock().await;
        if guard.iter().any(|u| u.username == user.username) {
            return Err(AppError::Conflict(format!(
                "username '{}' is already taken",
                user.username
            )));
        }
        guard.push(user);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.0.lock().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .0
            .lock()
            .await
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_many(&self, ids: Vec<Uuid>) -> Result<Vec<User>> {
        Ok(self
            .0
            .lock()
            .await
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn set_password_hash(&self, user_id: Uuid, hash: &str) -> Result<()> {
        let mut guard = self.0.lock().await;
        let user = guard
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AppError::not_found("user", user_id))?;
        user.password_hash = hash.to_string();
        Ok(())
    }

    async fn add_bookmark(&self, user_id: Uuid, post_id: Uuid) -> Result<()> {
        let mut guard = self.0.lock().await;
        let user = guard
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AppError::not_found("user", user_id))?;
        user.bookmarks.insert(post_id);
        Ok(())
    }

    async fn remove_bookmark(&self, user_id: Uuid, post_id: Uuid) -> Result<()> {
        let mut guard = self.0.lock().await;
        let user = guard
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AppError::not_found("user", user_id))?;
        user.bookmarks.remove(&post_id);
        Ok(())
    }

    async fn clear_bookmark_refs(&self, post_id: Uuid) -> Result<()> {
        for user in self.0.lock().await.iter_mut() {
            user.bookmarks.remove(&post_id);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryPostStore(Mutex<Vec<Post>>);

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn insert(&self, post: Post) -> Result<()> {
        self.0.lock().await.push(post);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>> {
        Ok(self.0.lock().await.iter().find(|p| p.id == id).cloned())
    }

    async fn find_many(&self, ids: Vec<Uuid>) -> Result<Vec<Post>> {
        Ok(self
            .0
            .lock()
            .await
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Post>> {
        let mut posts: Vec<Post> = self.0.lock().await.clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.truncate(limit as usize);
        Ok(posts)
    }

    async fn update(&self, post: Post) -> Result<()> {
        let mut guard = self.0.lock().await;
        let slot = guard
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or_else(|| AppError::not_found("post", post.id))?;
        *slot = post;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut guard = self.0.lock().await;
        let before = guard.len();
        guard.retain(|p| p.id != id);
        if guard.len() == before {
            return Err(AppError::not_found("post", id));
        }
        Ok(())
    }
}
