//! Database authentication backend for the admin panel.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::administrator::Administrator;
use crate::error::{AuthError, Result};
use crate::session::AdminSession;

/// Authenticates administrators against the database by username and
/// password, and manages their sessions.
pub struct AdminBackend;

impl AdminBackend {
    /// Authenticates an administrator by username and password.
    ///
    /// Returns the account if authentication succeeds, `None` if the
    /// credentials are invalid.
    pub async fn authenticate(
        pool: &SqlitePool,
        username: &str,
        password: &str,
    ) -> Result<Option<Administrator>> {
        let admin = match Administrator::get_by_username(pool, username).await {
            Ok(a) => a,
            Err(AuthError::AdministratorNotFound) => {
                debug!(username, "login attempt for unknown administrator");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if !admin.check_password(password) {
            warn!(username, "failed login attempt");
            return Ok(None);
        }

        Ok(Some(admin))
    }

    /// Authenticates and logs in an administrator, creating a session.
    pub async fn login(
        pool: &SqlitePool,
        username: &str,
        password: &str,
    ) -> Result<(Administrator, AdminSession)> {
        let mut admin = Self::authenticate(pool, username, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        admin.last_login = Some(Utc::now());
        admin.save(pool).await?;

        let session = AdminSession::for_administrator(&admin);
        session.save(pool).await?;

        info!(username, admin_id = admin.id, "administrator logged in");
        Ok((admin, session))
    }

    /// Logs out a session.
    pub async fn logout(pool: &SqlitePool, session_key: &str) -> Result<()> {
        let session = AdminSession::get_by_key(pool, session_key).await?;
        session.delete(pool).await?;
        debug!("session logged out");
        Ok(())
    }

    /// Logs out every session of an administrator.
    pub async fn logout_all(pool: &SqlitePool, user_id: i64) -> Result<u64> {
        AdminSession::delete_for_administrator(pool, user_id).await
    }

    /// Resolves a session key to its administrator.
    pub async fn current_administrator(
        pool: &SqlitePool,
        session_key: &str,
    ) -> Result<Option<Administrator>> {
        let session = match AdminSession::get_by_key(pool, session_key).await {
            Ok(s) => s,
            Err(AuthError::SessionNotFound) => return Ok(None),
            Err(e) => return Err(e),
        };

        if session.is_expired() {
            session.delete(pool).await?;
            return Ok(None);
        }

        match session.user_id {
            Some(user_id) => Ok(Some(Administrator::get(pool, user_id).await?)),
            None => Ok(None),
        }
    }

    /// Validates a session key and returns the live session.
    pub async fn get_session(pool: &SqlitePool, session_key: &str) -> Result<AdminSession> {
        let session = AdminSession::get_by_key(pool, session_key).await?;

        if session.is_expired() {
            session.delete(pool).await?;
            return Err(AuthError::SessionNotFound);
        }

        Ok(session)
    }

    /// Changes an administrator's password, checking the old one.
    pub async fn change_password(
        pool: &SqlitePool,
        user_id: i64,
        old_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let mut admin = Administrator::get(pool, user_id).await?;

        if !admin.check_password(old_password) {
            return Err(AuthError::InvalidCredentials);
        }

        admin.set_password(new_password)?;
        admin.save(pool).await?;
        info!(admin_id = user_id, "password changed");

        Ok(())
    }

    /// Sets an administrator's password directly (for superuser use).
    pub async fn set_password(pool: &SqlitePool, user_id: i64, new_password: &str) -> Result<()> {
        let mut admin = Administrator::get(pool, user_id).await?;
        admin.set_password(new_password)?;
        admin.save(pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .expect("in-memory pool");
        crate::create_tables(&pool).await.expect("tables");
        pool
    }

    #[tokio::test]
    async fn test_login_round_trip() {
        let pool = pool().await;

        let mut admin = Administrator::create("admin", "Administrator", "secret1").unwrap();
        admin.save(&pool).await.unwrap();

        let (admin, session) = AdminBackend::login(&pool, "admin", "secret1").await.unwrap();
        assert!(admin.last_login.is_some());
        assert_eq!(session.user_id, Some(admin.id));

        let current = AdminBackend::current_administrator(&pool, &session.session_key)
            .await
            .unwrap()
            .expect("session resolves");
        assert_eq!(current.id, admin.id);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let pool = pool().await;

        let mut admin = Administrator::create("admin", "Administrator", "secret1").unwrap();
        admin.save(&pool).await.unwrap();

        assert!(matches!(
            AdminBackend::login(&pool, "admin", "wrong-1").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            AdminBackend::login(&pool, "ghost", "secret1").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_logout_invalidates_session() {
        let pool = pool().await;

        let mut admin = Administrator::create("admin", "Administrator", "secret1").unwrap();
        admin.save(&pool).await.unwrap();

        let (_, session) = AdminBackend::login(&pool, "admin", "secret1").await.unwrap();
        AdminBackend::logout(&pool, &session.session_key).await.unwrap();

        assert!(AdminBackend::current_administrator(&pool, &session.session_key)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_change_password() {
        let pool = pool().await;

        let mut admin = Administrator::create("admin", "Administrator", "secret1").unwrap();
        admin.save(&pool).await.unwrap();

        AdminBackend::change_password(&pool, admin.id, "secret1", "changed1")
            .await
            .unwrap();

        assert!(AdminBackend::authenticate(&pool, "admin", "changed1")
            .await
            .unwrap()
            .is_some());
        assert!(AdminBackend::authenticate(&pool, "admin", "secret1")
            .await
            .unwrap()
            .is_none());
    }
}
