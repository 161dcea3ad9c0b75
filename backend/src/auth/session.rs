//! Session lifecycle
//!
//! A session token is only valid while it is signed by us AND still listed
//! in its user's token set. Removing a row from `user_tokens` therefore
//! revokes the session immediately, whatever the signature says.

use crate::auth::JwtService;
use crate::error::ApiError;
use crate::repositories::{TokenRepository, UserRecord};
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

/// Session token issuance, validation and revocation
pub struct SessionService;

impl SessionService {
    /// Sign a new token for `user_id` and append it to the user's token set
    pub async fn issue(pool: &PgPool, jwt: &JwtService, user_id: Uuid) -> Result<String, ApiError> {
        let token = jwt.issue_token(user_id).map_err(ApiError::Internal)?;

        TokenRepository::insert(pool, user_id, &token)
            .await
            .map_err(ApiError::Internal)?;

        debug!(%user_id, "Session token issued");
        Ok(token)
    }

    /// Resolve a token to its live user
    ///
    /// Fails with 401 when the signature is invalid, the user no longer
    /// exists, or the token has been revoked.
    pub async fn validate(
        pool: &PgPool,
        jwt: &JwtService,
        token: &str,
    ) -> Result<UserRecord, ApiError> {
        let claims = jwt.validate_token(token).map_err(|e| {
            debug!(error = %e, "Rejected session token");
            ApiError::unauthenticated()
        })?;

        let user_id = claims.user_id().map_err(|_| ApiError::unauthenticated())?;

        TokenRepository::find_user_with_token(pool, user_id, token)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| {
                debug!(%user_id, "Session token not in active set");
                ApiError::unauthenticated()
            })
    }

    /// Revoke a single session
    pub async fn revoke_one(pool: &PgPool, user_id: Uuid, token: &str) -> Result<bool, ApiError> {
        let removed = TokenRepository::delete_one(pool, user_id, token)
            .await
            .map_err(ApiError::Internal)?;

        info!(%user_id, "Session revoked");
        Ok(removed)
    }

    /// Revoke every session of a user
    pub async fn revoke_all(pool: &PgPool, user_id: Uuid) -> Result<u64, ApiError> {
        let removed = TokenRepository::delete_all(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;

        info!(%user_id, count = removed, "All sessions revoked");
        Ok(removed)
    }
}
