//! Storage adapters: MongoDB persistence and local cover-image storage.

#[cfg(feature = "media-local")]
pub mod media;
#[cfg(feature = "db-mongo")]
pub mod mongo;
