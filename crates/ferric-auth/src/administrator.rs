//! Administrator account model.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, Row, SqlitePool};

use crate::error::{AuthError, Result};
use crate::password::{hash_password, validate_password, verify_password};
use crate::storage::Storage;

/// Avatar served when an administrator has not uploaded one.
pub const DEFAULT_AVATAR: &str = "/static/admin/img/user-default.png";

/// An administrator account for the admin panel.
#[derive(Debug, Clone, FromRow)]
pub struct Administrator {
    /// Primary key.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Argon2 password hash.
    #[sqlx(rename = "password_hash")]
    password_hash: String,
    /// Avatar: an absolute URL or a path inside upload storage.
    pub avatar: Option<String>,
    /// Last login timestamp.
    pub last_login: Option<DateTime<Utc>>,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Administrator {
    /// Creates a new administrator with the given credentials.
    ///
    /// The password is validated and hashed.
    pub fn create(username: &str, name: &str, password: &str) -> Result<Self> {
        validate_password(password)?;
        let password_hash = hash_password(password)?;
        let now = Utc::now();

        Ok(Self {
            id: 0, // Will be set by database
            username: username.to_string(),
            name: name.to_string(),
            password_hash,
            avatar: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Checks the given password against this account's hash.
    pub fn check_password(&self, password: &str) -> bool {
        verify_password(password, &self.password_hash)
    }

    /// Sets a new password, validating and hashing it.
    pub fn set_password(&mut self, password: &str) -> Result<()> {
        validate_password(password)?;
        self.password_hash = hash_password(password)?;
        Ok(())
    }

    /// Resolves the avatar to a servable URL.
    ///
    /// Absolute http(s) avatars pass through untouched; stored paths go
    /// through the upload storage; accounts without an avatar get the
    /// default image.
    pub fn avatar_url(&self, storage: &impl Storage) -> String {
        match self.avatar.as_deref() {
            Some(avatar) if avatar.starts_with("http://") || avatar.starts_with("https://") => {
                avatar.to_string()
            }
            Some(avatar) => storage.url(avatar),
            None => DEFAULT_AVATAR.to_string(),
        }
    }

    /// Saves the administrator to the database.
    pub async fn save(&mut self, pool: &SqlitePool) -> Result<()> {
        self.updated_at = Utc::now();

        if self.id == 0 {
            let result = sqlx::query(
                r#"
                INSERT INTO admin_users (username, name, password_hash, avatar,
                    last_login, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&self.username)
            .bind(&self.name)
            .bind(&self.password_hash)
            .bind(&self.avatar)
            .bind(self.last_login)
            .bind(self.created_at)
            .bind(self.updated_at)
            .execute(pool)
            .await?;

            self.id = result.last_insert_rowid();
        } else {
            sqlx::query(
                r#"
                UPDATE admin_users
                SET username = ?, name = ?, password_hash = ?, avatar = ?,
                    last_login = ?, updated_at = ?
                WHERE id = ?
                "#,
            )
            .bind(&self.username)
            .bind(&self.name)
            .bind(&self.password_hash)
            .bind(&self.avatar)
            .bind(self.last_login)
            .bind(self.updated_at)
            .bind(self.id)
            .execute(pool)
            .await?;
        }

        Ok(())
    }

    /// Deletes the administrator from the database.
    pub async fn delete(&self, pool: &SqlitePool) -> Result<()> {
        sqlx::query("DELETE FROM admin_users WHERE id = ?")
            .bind(self.id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Finds an administrator by ID.
    pub async fn get(pool: &SqlitePool, id: i64) -> Result<Self> {
        let admin = sqlx::query_as::<_, Administrator>("SELECT * FROM admin_users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or(AuthError::AdministratorNotFound)?;

        Ok(admin)
    }

    /// Finds an administrator by username.
    pub async fn get_by_username(pool: &SqlitePool, username: &str) -> Result<Self> {
        let admin =
            sqlx::query_as::<_, Administrator>("SELECT * FROM admin_users WHERE username = ?")
                .bind(username)
                .fetch_optional(pool)
                .await?
                .ok_or(AuthError::AdministratorNotFound)?;

        Ok(admin)
    }

    /// Returns all administrators.
    pub async fn all(pool: &SqlitePool) -> Result<Vec<Self>> {
        let admins = sqlx::query_as::<_, Administrator>("SELECT * FROM admin_users")
            .fetch_all(pool)
            .await?;
        Ok(admins)
    }

    /// Returns the count of all administrators.
    pub async fn count(pool: &SqlitePool) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) FROM admin_users")
            .fetch_one(pool)
            .await?;
        Ok(row.get(0))
    }
}

/// SQL to create the admin_users table.
pub const CREATE_ADMIN_USERS_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS admin_users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username VARCHAR(190) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    password_hash TEXT NOT NULL,
    avatar VARCHAR(255),
    last_login TIMESTAMP,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

/// Creates the admin_users table if it doesn't exist.
pub async fn create_admin_users_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(CREATE_ADMIN_USERS_TABLE_SQL).execute(pool).await?;
    Ok(())
}
