//! Post CRUD with the author-only invariant and the delete cascade.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use domains::{
    AppError, AuthorRef, CoverUpload, MediaStore, Post, PostDraft, PostStore, PostWithAuthor,
    Result, User, UserStore,
};

/// How many posts the index listing returns.
const RECENT_POSTS_LIMIT: i64 = 20;

#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostStore>,
    users: Arc<dyn UserStore>,
    media: Arc<dyn MediaStore>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostStore>,
        users: Arc<dyn UserStore>,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        Self {
            posts,
            users,
            media,
        }
    }

    pub async fn create(
        &self,
        author_id: Uuid,
        draft: PostDraft,
        cover: CoverUpload,
    ) -> Result<PostWithAuthor> {
        validate_draft(&draft)?;
        let cover = self.media.save_cover(cover).await?;

        let now = Utc::now();
        let post = Post {
            id: Uuid::now_v7(),
            title: draft.title,
            summary: draft.summary,
            content: draft.content,
            cover,
            author_id,
            created_at: now,
            updated_at: now,
        };
        self.posts.insert(post.clone()).await?;
        tracing::info!(post_id = %post.id, "created post");
        self.with_author(post).await
    }

    /// Rewrites the text fields and, when a new cover arrives, swaps the
    /// stored file. Author-only.
    pub async fn update(
        &self,
        caller: Uuid,
        id: Uuid,
        draft: PostDraft,
        cover: Option<CoverUpload>,
    ) -> Result<PostWithAuthor> {
        validate_draft(&draft)?;
        let mut post = self.require(id).await?;
        if post.author_id != caller {
            return Err(AppError::Forbidden(
                "only the author may edit a post".to_string(),
            ));
        }

        let old_cover = post.cover.clone();
        if let Some(upload) = cover {
            post.cover = self.media.save_cover(upload).await?;
        }
        post.title = draft.title;
        post.summary = draft.summary;
        post.content = draft.content;
        post.updated_at = Utc::now();

        self.posts.update(post.clone()).await?;
        if post.cover != old_cover {
            // The replaced file has no remaining references.
            self.media.delete_cover(&old_cover).await?;
        }
        self.with_author(post).await
    }

    pub async fn fetch(&self, id: Uuid) -> Result<PostWithAuthor> {
        let post = self.require(id).await?;
        self.with_author(post).await
    }

    pub async fn list_recent(&self) -> Result<Vec<PostWithAuthor>> {
        let posts = self.posts.list_recent(RECENT_POSTS_LIMIT).await?;
        join_authors(&self.users, posts).await
    }

    /// Deletes a post and everything that references it: the cover file on
    /// disk and the post's entry in every user's bookmark set.
    pub async fn delete(&self, caller: Uuid, id: Uuid) -> Result<()> {
        let post = self.require(id).await?;
        if post.author_id != caller {
            return Err(AppError::Forbidden(
                "only the author may delete a post".to_string(),
            ));
        }

        self.media.delete_cover(&post.cover).await?;
        self.users.clear_bookmark_refs(id).await?;
        self.posts.delete(id).await?;
        tracing::info!(post_id = %id, "deleted post");
        Ok(())
    }

    async fn require(&self, id: Uuid) -> Result<Post> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("post", id))
    }

    async fn with_author(&self, post: Post) -> Result<PostWithAuthor> {
        let author = self
            .users
            .find_by_id(post.author_id)
            .await?
            .map(author_ref)
            .ok_or_else(|| AppError::not_found("user", post.author_id))?;
        Ok(PostWithAuthor { post, author })
    }
}

/// Joins a batch of posts with their authors in one store round trip.
pub(crate) async fn join_authors(
    users: &Arc<dyn UserStore>,
    posts: Vec<Post>,
) -> Result<Vec<PostWithAuthor>> {
    let author_ids: Vec<Uuid> = posts
        .iter()
        .map(|post| post.author_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let authors: HashMap<Uuid, AuthorRef> = users
        .find_many(author_ids)
        .await?
        .into_iter()
        .map(|user| (user.id, author_ref(user)))
        .collect();

    posts
        .into_iter()
        .map(|post| {
            let author = authors
                .get(&post.author_id)
                .cloned()
                .ok_or_else(|| AppError::not_found("user", post.author_id))?;
            Ok(PostWithAuthor { post, author })
        })
        .collect()
}

fn author_ref(user: User) -> AuthorRef {
    AuthorRef {
        id: user.id,
        username: user.username,
    }
}

fn validate_draft(draft: &PostDraft) -> Result<()> {
    for (field, value) in [
        ("title", &draft.title),
        ("summary", &draft.summary),
        ("content", &draft.content),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} must not be empty")));
        }
    }
    Ok(())
}
