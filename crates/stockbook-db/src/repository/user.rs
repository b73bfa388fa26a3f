//! # User Repository
//!
//! Minimal user identity storage.
//!
//! Authentication and sessions are handled outside this system. This
//! repository exists so products and sales can carry an accountable
//! `added_by` / `sold_by` reference, and so removing a user nullifies
//! those references instead of destroying bookkeeping history.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use stockbook_core::User;

/// Repository for user identity operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new user.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - username already exists
    pub async fn insert(&self, username: &str) -> DbResult<User> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.trim().to_string(),
            created_at: Utc::now(),
        };

        debug!(id = %user.id, username = %user.username, "Inserting user");

        sqlx::query("INSERT INTO users (id, username, created_at) VALUES (?1, ?2, ?3)")
            .bind(&user.id)
            .bind(&user.username)
            .bind(user.created_at)
            .execute(&self.pool)
            .await?;

        Ok(user)
    }

    /// Gets a user by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, created_at FROM users WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by username.
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, created_at FROM users WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Deletes a user.
    ///
    /// Products and sales that reference the user keep their rows; the
    /// references become NULL (FK `ON DELETE SET NULL`).
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting user");

        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
