//! Error types for the admin authentication layer.

use thiserror::Error;

/// Authentication-specific errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid credentials.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Administrator not found.
    #[error("administrator not found")]
    AdministratorNotFound,

    /// Session not found or expired.
    #[error("session not found or expired")]
    SessionNotFound,

    /// Role or permission not found.
    #[error("role or permission not found")]
    GrantNotFound,

    /// Permission denied.
    #[error("permission denied")]
    PermissionDenied,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHashError,

    /// Validation error.
    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type alias for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;
