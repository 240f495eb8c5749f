//! Error types for the admin panel.

use thiserror::Error;

/// Admin panel errors.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Form layer error.
    #[error("form error: {0}")]
    Form(#[from] ferric_forms::FormError),

    /// Authentication layer error.
    #[error("auth error: {0}")]
    Auth(#[from] ferric_auth::AuthError),
}

/// Result type alias for admin operations.
pub type Result<T> = std::result::Result<T, AdminError>;
