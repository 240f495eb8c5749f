//! Role and permission models for admin authorization.
//!
//! Administrators hold roles; roles and administrators hold slugged
//! permissions. The `administrator` role slug is the superuser
//! short-circuit: holders pass every permission check.

use sqlx::{FromRow, SqlitePool};

use crate::error::{AuthError, Result};

/// Role slug that passes every permission check.
pub const ADMINISTRATOR_SLUG: &str = "administrator";

/// A role grouping permissions.
#[derive(Debug, Clone, FromRow)]
pub struct Role {
    /// Primary key.
    pub id: i64,
    /// Human-readable name.
    pub name: String,
    /// Unique slug.
    pub slug: String,
}

impl Role {
    /// Creates a new role.
    pub fn new(name: &str, slug: &str) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            slug: slug.to_string(),
        }
    }

    /// Saves the role to the database.
    pub async fn save(&mut self, pool: &SqlitePool) -> Result<()> {
        if self.id == 0 {
            let result = sqlx::query("INSERT INTO admin_roles (name, slug) VALUES (?, ?)")
                .bind(&self.name)
                .bind(&self.slug)
                .execute(pool)
                .await?;

            self.id = result.last_insert_rowid();
        } else {
            sqlx::query("UPDATE admin_roles SET name = ?, slug = ? WHERE id = ?")
                .bind(&self.name)
                .bind(&self.slug)
                .bind(self.id)
                .execute(pool)
                .await?;
        }
        Ok(())
    }

    /// Deletes the role from the database.
    pub async fn delete(&self, pool: &SqlitePool) -> Result<()> {
        sqlx::query("DELETE FROM admin_roles WHERE id = ?")
            .bind(self.id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Finds a role by slug.
    pub async fn get_by_slug(pool: &SqlitePool, slug: &str) -> Result<Self> {
        let role = sqlx::query_as::<_, Role>("SELECT * FROM admin_roles WHERE slug = ?")
            .bind(slug)
            .fetch_optional(pool)
            .await?
            .ok_or(AuthError::GrantNotFound)?;
        Ok(role)
    }

    /// Returns all roles.
    pub async fn all(pool: &SqlitePool) -> Result<Vec<Self>> {
        let roles = sqlx::query_as::<_, Role>("SELECT * FROM admin_roles")
            .fetch_all(pool)
            .await?;
        Ok(roles)
    }

    /// Grants a permission to this role.
    pub async fn grant(&self, pool: &SqlitePool, permission_id: i64) -> Result<()> {
        sqlx::query(
            "INSERT OR IGNORE INTO admin_role_permissions (role_id, permission_id) VALUES (?, ?)",
        )
        .bind(self.id)
        .bind(permission_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Revokes a permission from this role.
    pub async fn revoke(&self, pool: &SqlitePool, permission_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM admin_role_permissions WHERE role_id = ? AND permission_id = ?")
            .bind(self.id)
            .bind(permission_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Returns all permissions granted to this role.
    pub async fn permissions(&self, pool: &SqlitePool) -> Result<Vec<Permission>> {
        let perms = sqlx::query_as::<_, Permission>(
            r#"
            SELECT p.* FROM admin_permissions p
            JOIN admin_role_permissions rp ON p.id = rp.permission_id
            WHERE rp.role_id = ?
            "#,
        )
        .bind(self.id)
        .fetch_all(pool)
        .await?;
        Ok(perms)
    }
}

/// A slugged permission, optionally scoped to HTTP methods and paths.
#[derive(Debug, Clone, FromRow)]
pub struct Permission {
    /// Primary key.
    pub id: i64,
    /// Human-readable name.
    pub name: String,
    /// Unique slug.
    pub slug: String,
    /// Comma-separated HTTP methods this permission covers; empty
    /// covers all.
    pub http_method: Option<String>,
    /// Newline-separated path patterns; a trailing `*` matches any
    /// suffix.
    pub http_path: String,
}

impl Permission {
    /// Creates a new permission covering every method and path.
    pub fn new(name: &str, slug: &str) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            slug: slug.to_string(),
            http_method: None,
            http_path: "*".to_string(),
        }
    }

    /// Scopes the permission to HTTP methods.
    #[must_use]
    pub fn methods(mut self, methods: &[&str]) -> Self {
        self.http_method = Some(methods.join(","));
        self
    }

    /// Scopes the permission to path patterns.
    #[must_use]
    pub fn paths(mut self, paths: &[&str]) -> Self {
        self.http_path = paths.join("\n");
        self
    }

    /// Returns whether this permission covers a request.
    pub fn covers(&self, method: &str, path: &str) -> bool {
        let method_ok = match self.http_method.as_deref() {
            None | Some("") => true,
            Some(methods) => methods
                .split(',')
                .any(|m| m.trim().eq_ignore_ascii_case(method)),
        };
        if !method_ok {
            return false;
        }

        self.http_path.split('\n').any(|pattern| {
            let pattern = pattern.trim();
            match pattern.strip_suffix('*') {
                Some(prefix) => path.starts_with(prefix),
                None => path == pattern,
            }
        })
    }

    /// Saves the permission to the database.
    pub async fn save(&mut self, pool: &SqlitePool) -> Result<()> {
        if self.id == 0 {
            let result = sqlx::query(
                "INSERT INTO admin_permissions (name, slug, http_method, http_path) VALUES (?, ?, ?, ?)",
            )
            .bind(&self.name)
            .bind(&self.slug)
            .bind(&self.http_method)
            .bind(&self.http_path)
            .execute(pool)
            .await?;

            self.id = result.last_insert_rowid();
        } else {
            sqlx::query(
                "UPDATE admin_permissions SET name = ?, slug = ?, http_method = ?, http_path = ? WHERE id = ?",
            )
            .bind(&self.name)
            .bind(&self.slug)
            .bind(&self.http_method)
            .bind(&self.http_path)
            .bind(self.id)
            .execute(pool)
            .await?;
        }
        Ok(())
    }

    /// Deletes the permission from the database.
    pub async fn delete(&self, pool: &SqlitePool) -> Result<()> {
        sqlx::query("DELETE FROM admin_permissions WHERE id = ?")
            .bind(self.id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Finds a permission by slug.
    pub async fn get_by_slug(pool: &SqlitePool, slug: &str) -> Result<Self> {
        let perm = sqlx::query_as::<_, Permission>("SELECT * FROM admin_permissions WHERE slug = ?")
            .bind(slug)
            .fetch_optional(pool)
            .await?
            .ok_or(AuthError::GrantNotFound)?;
        Ok(perm)
    }

    /// Returns all permissions.
    pub async fn all(pool: &SqlitePool) -> Result<Vec<Self>> {
        let perms = sqlx::query_as::<_, Permission>("SELECT * FROM admin_permissions")
            .fetch_all(pool)
            .await?;
        Ok(perms)
    }
}

/// Assigns a role to an administrator.
pub async fn assign_role(pool: &SqlitePool, user_id: i64, role_id: i64) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO admin_role_users (role_id, user_id) VALUES (?, ?)")
        .bind(role_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Removes a role from an administrator.
pub async fn retract_role(pool: &SqlitePool, user_id: i64, role_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM admin_role_users WHERE role_id = ? AND user_id = ?")
        .bind(role_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Grants a permission directly to an administrator.
pub async fn grant_permission(pool: &SqlitePool, user_id: i64, permission_id: i64) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO admin_user_permissions (user_id, permission_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(permission_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Revokes a directly granted permission from an administrator.
pub async fn revoke_permission(pool: &SqlitePool, user_id: i64, permission_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM admin_user_permissions WHERE user_id = ? AND permission_id = ?")
        .bind(user_id)
        .bind(permission_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Returns all roles held by an administrator.
pub async fn roles_of(pool: &SqlitePool, user_id: i64) -> Result<Vec<Role>> {
    let roles = sqlx::query_as::<_, Role>(
        r#"
        SELECT r.* FROM admin_roles r
        JOIN admin_role_users ru ON r.id = ru.role_id
        WHERE ru.user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(roles)
}

/// Returns all permissions held by an administrator, directly or
/// through roles.
pub async fn permissions_of(pool: &SqlitePool, user_id: i64) -> Result<Vec<Permission>> {
    let perms = sqlx::query_as::<_, Permission>(
        r#"
        SELECT DISTINCT p.* FROM admin_permissions p
        LEFT JOIN admin_user_permissions up ON p.id = up.permission_id AND up.user_id = ?
        LEFT JOIN admin_role_permissions rp ON p.id = rp.permission_id
        LEFT JOIN admin_role_users ru ON rp.role_id = ru.role_id AND ru.user_id = ?
        WHERE up.user_id IS NOT NULL OR ru.user_id IS NOT NULL
        "#,
    )
    .bind(user_id)
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(perms)
}

/// Returns whether an administrator holds the `administrator` role.
pub async fn is_administrator(pool: &SqlitePool, user_id: i64) -> Result<bool> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM admin_roles r
        JOIN admin_role_users ru ON r.id = ru.role_id
        WHERE ru.user_id = ? AND r.slug = ?
        "#,
    )
    .bind(user_id)
    .bind(ADMINISTRATOR_SLUG)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

/// Returns whether an administrator holds a permission slug.
///
/// Holders of the `administrator` role pass every check.
pub async fn administrator_can(pool: &SqlitePool, user_id: i64, slug: &str) -> Result<bool> {
    if is_administrator(pool, user_id).await? {
        return Ok(true);
    }

    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM admin_permissions p
        LEFT JOIN admin_user_permissions up ON p.id = up.permission_id AND up.user_id = ?
        LEFT JOIN admin_role_permissions rp ON p.id = rp.permission_id
        LEFT JOIN admin_role_users ru ON rp.role_id = ru.role_id AND ru.user_id = ?
        WHERE p.slug = ? AND (up.user_id IS NOT NULL OR ru.user_id IS NOT NULL)
        "#,
    )
    .bind(user_id)
    .bind(user_id)
    .bind(slug)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

/// SQL to create the role and permission tables.
pub const CREATE_ROLE_TABLES_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS admin_roles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(50) NOT NULL,
    slug VARCHAR(50) NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS admin_permissions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(50) NOT NULL,
    slug VARCHAR(50) NOT NULL UNIQUE,
    http_method VARCHAR(255),
    http_path TEXT NOT NULL DEFAULT '*'
);

CREATE TABLE IF NOT EXISTS admin_role_users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    role_id INTEGER NOT NULL REFERENCES admin_roles(id) ON DELETE CASCADE,
    user_id INTEGER NOT NULL REFERENCES admin_users(id) ON DELETE CASCADE,
    UNIQUE(role_id, user_id)
);

CREATE TABLE IF NOT EXISTS admin_role_permissions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    role_id INTEGER NOT NULL REFERENCES admin_roles(id) ON DELETE CASCADE,
    permission_id INTEGER NOT NULL REFERENCES admin_permissions(id) ON DELETE CASCADE,
    UNIQUE(role_id, permission_id)
);

CREATE TABLE IF NOT EXISTS admin_user_permissions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES admin_users(id) ON DELETE CASCADE,
    permission_id INTEGER NOT NULL REFERENCES admin_permissions(id) ON DELETE CASCADE,
    UNIQUE(user_id, permission_id)
);
"#;

/// Creates the role and permission tables if they don't exist.
pub async fn create_role_tables(pool: &SqlitePool) -> Result<()> {
    // SQLite doesn't support multiple statements in one query, so split them
    for statement in CREATE_ROLE_TABLES_SQL.split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(pool).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_creation() {
        let role = Role::new("Operator", "operator");
        assert_eq!(role.slug, "operator");
        assert_eq!(role.id, 0);
    }

    #[test]
    fn test_permission_covers_any_by_default() {
        let perm = Permission::new("All access", "all-access");
        assert!(perm.covers("GET", "/admin/users"));
        assert!(perm.covers("DELETE", "/anything"));
    }

    #[test]
    fn test_permission_method_scope() {
        let perm = Permission::new("Read users", "users.read").methods(&["GET", "HEAD"]);
        assert!(perm.covers("get", "/admin/users"));
        assert!(!perm.covers("POST", "/admin/users"));
    }

    #[test]
    fn test_permission_path_patterns() {
        let perm = Permission::new("Users", "users").paths(&["/admin/users", "/admin/users/*"]);
        assert!(perm.covers("GET", "/admin/users"));
        assert!(perm.covers("GET", "/admin/users/3/edit"));
        assert!(!perm.covers("GET", "/admin/roles"));
    }
}
