//! MongoDB implementations of the persistence ports.
//!
//! Documents keep ids as strings so filters stay trivial (`{ "id": ... }`)
//! and index definitions are created with `createIndexes` at startup.
//! Username uniqueness is enforced by the server; the duplicate-key write
//! error (code 11000) is surfaced as a `Conflict`.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, DateTime as BsonDateTime, Document};
use mongodb::options::FindOptions;
use mongodb::{Client, Collection, Database};
use uuid::Uuid;

use domains::{AppError, Post, PostStore, Result, User, UserStore};

mod documents;
use documents::{PostDocument, UserDocument};

/// Opens the database and fails fast when the server is unreachable.
pub async fn connect(uri: &str, name: &str) -> anyhow::Result<Database> {
    let client = Client::with_uri_str(uri).await?;
    let db = client.database(name);
    db.run_command(doc! { "ping": 1 }, None).await?;
    Ok(db)
}

pub struct MongoUserStore {
    coll: Collection<UserDocument>,
}

impl MongoUserStore {
    /// Creates the collection handle and its unique username index.
    pub async fn new_with(db: &Database) -> anyhow::Result<Self> {
        db.run_command(
            doc! {
                "createIndexes": "users",
                "indexes": [{
                    "name": "unique_username",
                    "key": { "username": 1 },
                    "unique": true,
                }],
            },
            None,
        )
        .await?;

        Ok(Self {
            coll: db.collection("users"),
        })
    }
}

pub struct MongoPostStore {
    coll: Collection<PostDocument>,
}

impl MongoPostStore {
    /// Creates the collection handle and the index backing the recency sort.
    pub async fn new_with(db: &Database) -> anyhow::Result<Self> {
        db.run_command(
            doc! {
                "createIndexes": "posts",
                "indexes": [{
                    "name": "created_at_desc",
                    "key": { "created_at": -1 },
                }],
            },
            None,
        )
        .await?;

        Ok(Self {
            coll: db.collection("posts"),
        })
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn insert(&self, user: User) -> Result<()> {
        match self.coll.insert_one(UserDocument::from_user(&user), None).await {
            Ok(_) => Ok(()),
            Err(err) if is_duplicate_key(&err) => Err(AppError::Conflict(format!(
                "username '{}' is already taken",
                user.username
            ))),
            Err(err) => Err(AppError::internal(err)),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        self.find_one(doc! { "id": id.to_string() }).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        self.find_one(doc! { "username": username }).await
    }

    async fn find_many(&self, ids: Vec<Uuid>) -> Result<Vec<User>> {
        let ids: Vec<String> = ids.iter().map(Uuid::to_string).collect();
        let docs: Vec<UserDocument> = self
            .coll
            .find(doc! { "id": { "$in": ids } }, None)
            .await
            .map_err(AppError::internal)?
            .try_collect()
            .await
            .map_err(AppError::internal)?;

        docs.into_iter().map(UserDocument::into_user).collect()
    }

    async fn set_password_hash(&self, user_id: Uuid, hash: &str) -> Result<()> {
        let outcome = self
            .coll
            .update_one(
                doc! { "id": user_id.to_string() },
                doc! { "$set": { "password_hash": hash } },
                None,
            )
            .await
            .map_err(AppError::internal)?;
        if outcome.matched_count == 0 {
            return Err(AppError::not_found("user", user_id));
        }
        Ok(())
    }

    async fn add_bookmark(&self, user_id: Uuid, post_id: Uuid) -> Result<()> {
        self.mutate_bookmarks(user_id, doc! { "$addToSet": { "bookmarks": post_id.to_string() } })
            .await
    }

    async fn remove_bookmark(&self, user_id: Uuid, post_id: Uuid) -> Result<()> {
        self.mutate_bookmarks(user_id, doc! { "$pull": { "bookmarks": post_id.to_string() } })
            .await
    }

    async fn clear_bookmark_refs(&self, post_id: Uuid) -> Result<()> {
        let post_id = post_id.to_string();
        self.coll
            .update_many(
                doc! { "bookmarks": &post_id },
                doc! { "$pull": { "bookmarks": &post_id } },
                None,
            )
            .await
            .map_err(AppError::internal)?;
        Ok(())
    }
}

impl MongoUserStore {
    async fn find_one(&self, filter: Document) -> Result<Option<User>> {
        match self
            .coll
            .find_one(filter, None)
            .await
            .map_err(AppError::internal)?
        {
            Some(doc) => Ok(Some(doc.into_user()?)),
            None => Ok(None),
        }
    }

    async fn mutate_bookmarks(&self, user_id: Uuid, update: Document) -> Result<()> {
        let outcome = self
            .coll
            .update_one(doc! { "id": user_id.to_string() }, update, None)
            .await
            .map_err(AppError::internal)?;
        if outcome.matched_count == 0 {
            return Err(AppError::not_found("user", user_id));
        }
        Ok(())
    }
}

#[async_trait]
impl PostStore for MongoPostStore {
    async fn insert(&self, post: Post) -> Result<()> {
        self.coll
            .insert_one(PostDocument::from_post(&post), None)
            .await
            .map_err(AppError::internal)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>> {
        match self
            .coll
            .find_one(doc! { "id": id.to_string() }, None)
            .await
            .map_err(AppError::internal)?
        {
            Some(doc) => Ok(Some(doc.into_post()?)),
            None => Ok(None),
        }
    }

    async fn find_many(&self, ids: Vec<Uuid>) -> Result<Vec<Post>> {
        let ids: Vec<String> = ids.iter().map(Uuid::to_string).collect();
        let docs: Vec<PostDocument> = self
            .coll
            .find(doc! { "id": { "$in": ids } }, None)
            .await
            .map_err(AppError::internal)?
            .try_collect()
            .await
            .map_err(AppError::internal)?;

        docs.into_iter().map(PostDocument::into_post).collect()
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Post>> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .build();
        let docs: Vec<PostDocument> = self
            .coll
            .find(None, options)
            .await
            .map_err(AppError::internal)?
            .try_collect()
            .await
            .map_err(AppError::internal)?;

        docs.into_iter().map(PostDocument::into_post).collect()
    }

    async fn update(&self, post: Post) -> Result<()> {
        let outcome = self
            .coll
            .update_one(
                doc! { "id": post.id.to_string() },
                doc! { "$set": {
                    "title": &post.title,
                    "summary": &post.summary,
                    "content": &post.content,
                    "cover": &post.cover,
                    "updated_at": BsonDateTime::from_chrono(post.updated_at),
                }},
                None,
            )
            .await
            .map_err(AppError::internal)?;
        if outcome.matched_count == 0 {
            return Err(AppError::not_found("post", post.id));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let outcome = self
            .coll
            .delete_one(doc! { "id": id.to_string() }, None)
            .await
            .map_err(AppError::internal)?;
        if outcome.deleted_count == 0 {
            return Err(AppError::not_found("post", id));
        }
        Ok(())
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};
    matches!(
        &*err.kind,
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == 11000
    )
}
