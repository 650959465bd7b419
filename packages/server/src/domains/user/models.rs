use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domains::role::models::RoleWithPermissions;

/// User model - SQL persistence layer
///
/// `password` holds the salted hash, never the plaintext.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub mobile_number: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for inserting a new user (password already hashed).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub mobile_number: String,
    pub email: String,
    pub password: String,
}

/// Partial update for a user. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub mobile_number: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A user together with roles and their permission sets, loaded in one
/// fetch. Authorization checks always work from this snapshot rather
/// than from token claims.
#[derive(Debug, Clone)]
pub struct UserWithRoles {
    pub user: User,
    pub roles: Vec<RoleWithPermissions>,
}

impl User {
    /// Find user by ID
    pub async fn find_by_id(id: i64, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find user by email
    pub async fn find_by_email(email: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find user by username
    pub async fn find_by_username(username: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find all users, oldest first
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users ORDER BY id")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert new user
    pub async fn insert(new: NewUser, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO users (
                first_name,
                last_name,
                username,
                mobile_number,
                email,
                password
             )
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.username)
        .bind(&new.mobile_number)
        .bind(&new.email)
        .bind(&new.password)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Apply a partial update, returning the updated row if it exists
    pub async fn update(id: i64, changes: UserChanges, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE users
             SET first_name = COALESCE($2, first_name),
                 last_name = COALESCE($3, last_name),
                 username = COALESCE($4, username),
                 mobile_number = COALESCE($5, mobile_number),
                 email = COALESCE($6, email),
                 password = COALESCE($7, password)
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(changes.first_name)
        .bind(changes.last_name)
        .bind(changes.username)
        .bind(changes.mobile_number)
        .bind(changes.email)
        .bind(changes.password)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete a user. Role associations and internships cascade.
    pub async fn delete(id: i64, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Fetch one page of users matching a case-insensitive substring
    /// search over first name, last name, and email.
    ///
    /// Fetches `limit` rows after the cursor id; the caller passes
    /// limit + 1 to detect whether more pages remain.
    pub async fn search_page(
        search: &str,
        after: Option<i64>,
        limit: i64,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let pattern = format!("%{}%", search);
        sqlx::query_as::<_, Self>(
            "SELECT * FROM users
             WHERE (first_name ILIKE $1 OR last_name ILIKE $1 OR email ILIKE $1)
               AND id > $2
             ORDER BY id
             LIMIT $3",
        )
        .bind(pattern)
        .bind(after.unwrap_or(0))
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Replace the user's role assignments
    pub async fn assign_roles(user_id: i64, role_ids: &[i64], pool: &PgPool) -> Result<()> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        for role_id in role_ids {
            sqlx::query("INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2)")
                .bind(user_id)
                .bind(role_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Fetch a user with roles and permissions eagerly loaded.
    ///
    /// Always reads live state; authorization decisions must never be
    /// made from a stale snapshot.
    pub async fn find_with_roles(id: i64, pool: &PgPool) -> Result<Option<UserWithRoles>> {
        let Some(user) = Self::find_by_id(id, pool).await? else {
            return Ok(None);
        };

        let roles = RoleWithPermissions::find_for_user(id, pool).await?;

        Ok(Some(UserWithRoles { user, roles }))
    }
}
