//! Shared support for the end-to-end API tests: in-memory implementations
//! of the persistence ports and a fully assembled router over them.

mod memory;

pub use memory::{MemoryPostStore, MemoryUserStore};

#[cfg(feature = "web-axum")]
mod harness;

#[cfg(feature = "web-axum")]
pub use harness::*;
