//! The central domain logic and interface definitions for Inkcap.

pub mod error;
pub mod models;
pub mod ports;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use ports::*;

#[cfg(test)]
mod tests {
    use super::models::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn post_creation_v7() {
        let id = Uuid::now_v7();
        let author_id = Uuid::now_v7();
        let post = Post {
            id,
            title: "Hello Rust!".to_string(),
            summary: "a first post".to_string(),
            content: "<p>body</p>".to_string(),
            cover: "ab12cd.png".to_string(),
            author_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(post.id, id);
        assert_eq!(post.author_id, author_id);
    }

    #[test]
    fn bookmark_set_semantics() {
        let mut user = User {
            id: Uuid::now_v7(),
            username: "hazel".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            bookmarks: Default::default(),
        };
        let post_id = Uuid::now_v7();
        assert!(user.bookmarks.insert(post_id));
        // inserting twice never duplicates
        assert!(!user.bookmarks.insert(post_id));
        assert_eq!(user.bookmarks.len(), 1);
        assert!(user.bookmarks.remove(&post_id));
        assert!(user.bookmarks.is_empty());
    }
}
