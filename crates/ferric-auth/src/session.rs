//! Admin session management.
//!
//! Sessions carry the authenticated administrator, a per-session CSRF
//! token, and one-shot flash values used to redisplay a submitted form
//! with its errors and old input after a redirect.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Row, SqlitePool};
use std::collections::HashMap;

use crate::administrator::Administrator;
use crate::error::{AuthError, Result};

/// Session payload stored as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionData {
    /// Administrator ID if authenticated.
    pub user_id: Option<i64>,
    /// One-shot values, consumed on first read.
    #[serde(default)]
    pub flash: HashMap<String, serde_json::Value>,
    /// Durable session values.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// A session for the admin panel.
#[derive(Debug, Clone, FromRow)]
pub struct AdminSession {
    /// Unique session key (64 character hex string).
    pub session_key: String,
    /// Per-session CSRF token (64 character hex string).
    pub csrf_token: String,
    /// JSON-encoded session payload.
    pub session_data: String,
    /// Session expiration timestamp.
    pub expire_date: DateTime<Utc>,
    /// Associated administrator ID (if authenticated).
    pub user_id: Option<i64>,
}

impl AdminSession {
    /// Default session expiration time (2 weeks).
    pub const DEFAULT_EXPIRY_DAYS: i64 = 14;

    /// Creates a new anonymous session.
    pub fn new() -> Self {
        Self {
            session_key: generate_token(),
            csrf_token: generate_token(),
            session_data: serde_json::to_string(&SessionData::default()).unwrap_or_default(),
            expire_date: Utc::now() + Duration::days(Self::DEFAULT_EXPIRY_DAYS),
            user_id: None,
        }
    }

    /// Creates a new session for an administrator.
    pub fn for_administrator(admin: &Administrator) -> Self {
        let data = SessionData {
            user_id: Some(admin.id),
            ..SessionData::default()
        };

        Self {
            session_key: generate_token(),
            csrf_token: generate_token(),
            session_data: serde_json::to_string(&data).unwrap_or_default(),
            expire_date: Utc::now() + Duration::days(Self::DEFAULT_EXPIRY_DAYS),
            user_id: Some(admin.id),
        }
    }

    /// Returns whether this session has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expire_date
    }

    /// Returns the decoded session payload.
    pub fn data(&self) -> SessionData {
        serde_json::from_str(&self.session_data).unwrap_or_default()
    }

    /// Replaces the session payload.
    pub fn set_data(&mut self, data: SessionData) {
        self.session_data = serde_json::to_string(&data).unwrap_or_default();
        self.user_id = data.user_id;
    }

    /// Checks a submitted CSRF token against this session's token.
    pub fn verify_csrf(&self, token: &str) -> bool {
        !self.csrf_token.is_empty() && self.csrf_token == token
    }

    /// Issues a fresh CSRF token, invalidating the old one.
    pub fn rotate_csrf(&mut self) -> &str {
        self.csrf_token = generate_token();
        &self.csrf_token
    }

    /// Gets a durable value from the session payload.
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        self.data()
            .extra
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Sets a durable value in the session payload.
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) {
        let mut data = self.data();
        if let Ok(value) = serde_json::to_value(value) {
            data.extra.insert(key.to_string(), value);
        }
        self.set_data(data);
    }

    /// Removes a durable value from the session payload.
    pub fn remove(&mut self, key: &str) {
        let mut data = self.data();
        data.extra.remove(key);
        self.set_data(data);
    }

    /// Stores a one-shot value, surviving exactly one redirect.
    pub fn flash<T: Serialize>(&mut self, key: &str, value: T) {
        let mut data = self.data();
        if let Ok(value) = serde_json::to_value(value) {
            data.flash.insert(key.to_string(), value);
        }
        self.set_data(data);
    }

    /// Consumes a one-shot value.
    pub fn take_flash<T: for<'de> Deserialize<'de>>(&mut self, key: &str) -> Option<T> {
        let mut data = self.data();
        let value = data.flash.remove(key)?;
        self.set_data(data);
        serde_json::from_value(value).ok()
    }

    /// Extends the session expiration.
    pub fn extend(&mut self, days: i64) {
        self.expire_date = Utc::now() + Duration::days(days);
    }

    /// Saves the session to the database.
    pub async fn save(&self, pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO admin_sessions (session_key, csrf_token, session_data, expire_date, user_id)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(session_key) DO UPDATE SET
                csrf_token = excluded.csrf_token,
                session_data = excluded.session_data,
                expire_date = excluded.expire_date,
                user_id = excluded.user_id
            "#,
        )
        .bind(&self.session_key)
        .bind(&self.csrf_token)
        .bind(&self.session_data)
        .bind(self.expire_date)
        .bind(self.user_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Deletes the session from the database.
    pub async fn delete(&self, pool: &SqlitePool) -> Result<()> {
        sqlx::query("DELETE FROM admin_sessions WHERE session_key = ?")
            .bind(&self.session_key)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Finds a live session by its key.
    pub async fn get_by_key(pool: &SqlitePool, session_key: &str) -> Result<Self> {
        let session = sqlx::query_as::<_, AdminSession>(
            "SELECT * FROM admin_sessions WHERE session_key = ? AND expire_date > ?",
        )
        .bind(session_key)
        .bind(Utc::now())
        .fetch_optional(pool)
        .await?
        .ok_or(AuthError::SessionNotFound)?;

        Ok(session)
    }

    /// Deletes all sessions for an administrator.
    pub async fn delete_for_administrator(pool: &SqlitePool, user_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM admin_sessions WHERE user_id = ?")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Deletes all expired sessions.
    pub async fn clear_expired(pool: &SqlitePool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM admin_sessions WHERE expire_date < ?")
            .bind(Utc::now())
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Returns the count of active sessions.
    pub async fn count(pool: &SqlitePool) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) FROM admin_sessions WHERE expire_date > ?")
            .bind(Utc::now())
            .fetch_one(pool)
            .await?;
        Ok(row.get(0))
    }
}

impl Default for AdminSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates a cryptographically secure 64-character hex token.
fn generate_token() -> String {
    use rand::RngExt;
    let mut rng = rand::rng();
    let mut bytes = [0u8; 32];
    rng.fill(&mut bytes);
    hex::encode(&bytes)
}

/// Helper module for hex encoding (avoiding external dependency).
mod hex {
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

/// SQL to create the admin_sessions table.
pub const CREATE_ADMIN_SESSIONS_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS admin_sessions (
    session_key VARCHAR(64) PRIMARY KEY,
    csrf_token VARCHAR(64) NOT NULL,
    session_data TEXT NOT NULL,
    expire_date TIMESTAMP NOT NULL,
    user_id INTEGER REFERENCES admin_users(id) ON DELETE CASCADE
)
"#;

/// Creates the admin_sessions table if it doesn't exist.
pub async fn create_admin_sessions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(CREATE_ADMIN_SESSIONS_TABLE_SQL)
        .execute(pool)
        .await?;
    Ok(())
}
