//! User repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use task_manager_shared::PublicUser;
use uuid::Uuid;

use super::TaskRepository;

/// User record from database
///
/// The avatar column is loaded separately through [`UserRepository::get_avatar`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRecord> for PublicUser {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            age: user.age,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub age: i32,
}

/// Input for updating a user; `None` leaves the column unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub age: Option<i32>,
}

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user
    pub async fn create(pool: &PgPool, input: CreateUser) -> Result<UserRecord> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (name, email, password_hash, age)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, age, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(input.age)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, email, password_hash, age, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, email, password_hash, age, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Update profile columns
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        updates: UpdateUser,
    ) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                age = COALESCE($5, age),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, password_hash, age, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(updates.name)
        .bind(updates.email)
        .bind(updates.password_hash)
        .bind(updates.age)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Delete a user together with every task they own
    ///
    /// Tokens go with the user row through `ON DELETE CASCADE`.
    pub async fn delete_with_tasks(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>> {
        let mut tx = pool.begin().await?;

        TaskRepository::delete_all_for_owner(&mut tx, id).await?;

        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            DELETE FROM users
            WHERE id = $1
            RETURNING id, name, email, password_hash, age, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(user)
    }

    /// Replace or clear the avatar
    ///
    /// Returns false if the user does not exist.
    pub async fn set_avatar(pool: &PgPool, id: Uuid, avatar: Option<Vec<u8>>) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users SET avatar = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(avatar)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Load the avatar bytes; `None` if the user or the avatar is missing
    pub async fn get_avatar(pool: &PgPool, id: Uuid) -> Result<Option<Vec<u8>>> {
        let avatar = sqlx::query_scalar::<_, Option<Vec<u8>>>(
            r#"
            SELECT avatar FROM users WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(avatar.flatten())
    }

    /// Check if an email is registered to any user other than `except`
    pub async fn email_taken(pool: &PgPool, email: &str, except: Option<Uuid>) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(except)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }
}
