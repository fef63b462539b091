//! Centralized error handling for the Inkcap ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Post, User)
    #[error("{0} not found with id {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., username too short, upload not an image)
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing or unverifiable credentials
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed (e.g., not the post's author)
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Resource already exists (e.g., duplicate username)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Infrastructure failure (e.g., database down, disk full)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    /// Wraps an adapter-level failure whose detail only matters in logs.
    pub fn internal(err: impl std::fmt::Display) -> Self {
        AppError::Internal(err.to_string())
    }

    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        AppError::NotFound(entity.to_string(), id.to_string())
    }
}

/// A specialized Result type for Inkcap logic.
pub type Result<T> = std::result::Result<T, AppError>;
