//! # ferric-auth
//!
//! Administrator accounts, roles, permissions, and sessions for the
//! admin panel.
//!
//! This crate provides:
//! - The [`Administrator`] account model with Argon2 password hashing
//! - [`Role`] and [`Permission`] models with the `administrator`
//!   superuser role
//! - [`AdminSession`] with CSRF tokens and one-shot flash values
//! - [`AdminBackend`] for authenticating against the database
//!
//! ## Quick Start
//!
//! ```rust
//! use ferric_auth::{hash_password, verify_password, Administrator};
//!
//! // Create an administrator with a hashed password
//! let admin = Administrator::create("admin", "Administrator", "secret1")
//!     .expect("valid account");
//!
//! // Verify the password
//! assert!(admin.check_password("secret1"));
//! assert!(!admin.check_password("wrong"));
//! ```
//!
//! For the full async workflow with database persistence, see the
//! [`AdminBackend`] documentation.
//!
//! ## Authorization
//!
//! Administrators hold slugged roles; roles and administrators hold
//! slugged permissions, optionally scoped to HTTP methods and path
//! patterns. Holders of the `administrator` role pass every check.
//! See [`administrator_can`], [`roles_of`], and [`permissions_of`].

mod administrator;
mod backend;
mod error;
mod password;
mod role;
mod session;
mod storage;

pub use administrator::{
    create_admin_users_table, Administrator, CREATE_ADMIN_USERS_TABLE_SQL, DEFAULT_AVATAR,
};
pub use backend::AdminBackend;
pub use error::{AuthError, Result};
pub use password::{hash_password, validate_password, verify_password, MIN_PASSWORD_LENGTH};
pub use role::{
    administrator_can, assign_role, create_role_tables, grant_permission, is_administrator,
    permissions_of, retract_role, revoke_permission, roles_of, Permission, Role,
    ADMINISTRATOR_SLUG,
};
pub use session::{create_admin_sessions_table, AdminSession, SessionData};
pub use storage::{DiskStorage, Storage};

use sqlx::SqlitePool;

/// Creates all admin authentication tables.
///
/// Call during application setup to ensure the schema exists.
pub async fn create_tables(pool: &SqlitePool) -> Result<()> {
    create_admin_users_table(pool).await?;
    create_admin_sessions_table(pool).await?;
    create_role_tables(pool).await?;
    Ok(())
}
