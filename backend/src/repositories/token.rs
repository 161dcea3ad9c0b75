//! Session token repository
//!
//! Each row is one active token of one user; row ids preserve issuance order.

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use super::UserRecord;

/// Session token repository for database operations
pub struct TokenRepository;

impl TokenRepository {
    /// Append a token to a user's token set
    pub async fn insert(pool: &PgPool, user_id: Uuid, token: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_tokens (user_id, token)
            VALUES ($1, $2)
            "#,
        )
        .bind(user_id)
        .bind(token)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Find the user owning `token`, if the token is still in their set
    ///
    /// User existence and token membership are checked in one statement.
    pub async fn find_user_with_token(
        pool: &PgPool,
        user_id: Uuid,
        token: &str,
    ) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT u.id, u.name, u.email, u.password_hash, u.age, u.created_at, u.updated_at
            FROM users u
            JOIN user_tokens t ON t.user_id = u.id
            WHERE u.id = $1 AND t.token = $2
            "#,
        )
        .bind(user_id)
        .bind(token)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// List a user's active tokens in issuance order
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<String>> {
        let tokens = sqlx::query_scalar::<_, String>(
            r#"
            SELECT token FROM user_tokens
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tokens)
    }

    /// Remove one token; returns whether it was present
    pub async fn delete_one(pool: &PgPool, user_id: Uuid, token: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM user_tokens
            WHERE user_id = $1 AND token = $2
            "#,
        )
        .bind(user_id)
        .bind(token)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove every token of a user; returns how many were removed
    pub async fn delete_all(pool: &PgPool, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM user_tokens
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}
