//! User service for authentication and profile management
//!
//! # Performance Optimizations
//!
//! - Password hashing/verification runs on blocking thread pool
//! - JWT service is passed by reference (pre-computed keys)
//! - Database queries use connection pooling

use crate::auth::{JwtService, PasswordService, SessionService, DUMMY_HASH};
use crate::error::ApiError;
use crate::notify::Notifier;
use crate::repositories::{CreateUser, UpdateUser, UserRecord, UserRepository};
use serde_json::Value;
use sqlx::PgPool;
use task_manager_shared::validation::{
    normalize_email, validate_age, validate_email, validate_name, validate_password,
};
use task_manager_shared::{
    check_keys, AuthResponse, FieldError, LoginRequest, PublicUser, SignupRequest,
    UpdateUserRequest, UserField,
};
use tracing::info;
use uuid::Uuid;

/// User service for account operations
pub struct UserService;

impl UserService {
    /// Register a new user and open their first session
    ///
    /// The welcome email is dispatched in the background; its outcome does
    /// not affect the response.
    pub async fn signup(
        pool: &PgPool,
        jwt: &JwtService,
        notifier: &Notifier,
        req: SignupRequest,
    ) -> Result<AuthResponse, ApiError> {
        let name = req.name.trim().to_string();
        validate_name(&name).map_err(|m| FieldError::new("name", m))?;

        let email = normalize_email(&req.email);
        validate_email(&email).map_err(|m| FieldError::new("email", m))?;

        let password = req.password.trim().to_string();
        validate_password(&password).map_err(|m| FieldError::new("password", m))?;

        let age = req.age.unwrap_or(0);
        validate_age(age).map_err(|m| FieldError::new("age", m))?;

        Self::ensure_email_available(pool, &email, None).await?;

        let password_hash = PasswordService::hash_async(password)
            .await
            .map_err(ApiError::Internal)?;

        let user = UserRepository::create(
            pool,
            CreateUser {
                name,
                email,
                password_hash,
                age,
            },
        )
        .await
        .map_err(ApiError::from_store)?;

        let token = SessionService::issue(pool, jwt, user.id).await?;

        info!(user_id = %user.id, "User signed up");
        notifier.send_welcome(&user.email, &user.name);

        Ok(AuthResponse {
            user: user.into(),
            token,
        })
    }

    /// Login with email and password
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn login(
        pool: &PgPool,
        jwt: &JwtService,
        req: LoginRequest,
    ) -> Result<AuthResponse, ApiError> {
        let found = UserRepository::find_by_email(pool, &normalize_email(&req.email))
            .await
            .map_err(ApiError::Internal)?;

        // Unknown accounts still pay for a verify
        let hash = found
            .as_ref()
            .map_or_else(|| DUMMY_HASH.to_string(), |user| user.password_hash.clone());
        let valid = PasswordService::verify_async(req.password, hash)
            .await
            .map_err(ApiError::Internal)?;

        let user = match found {
            Some(user) if valid => user,
            _ => return Err(ApiError::InvalidCredentials),
        };

        let token = SessionService::issue(pool, jwt, user.id).await?;

        info!(user_id = %user.id, "User logged in");
        Ok(AuthResponse {
            user: user.into(),
            token,
        })
    }

    /// Apply a profile patch
    ///
    /// Any key outside [`UserField`] rejects the whole patch before anything
    /// is validated or written.
    pub async fn update_profile(
        pool: &PgPool,
        user_id: Uuid,
        body: Value,
    ) -> Result<PublicUser, ApiError> {
        check_keys::<UserField>(&body)?;

        let req: UpdateUserRequest = serde_json::from_value(body)
            .map_err(|e| ApiError::Validation(format!("Invalid update: {}", e)))?;

        let mut updates = UpdateUser::default();

        if let Some(name) = req.name {
            let name = name.trim().to_string();
            validate_name(&name).map_err(|m| FieldError::new("name", m))?;
            updates.name = Some(name);
        }

        if let Some(email) = req.email {
            let email = normalize_email(&email);
            validate_email(&email).map_err(|m| FieldError::new("email", m))?;
            Self::ensure_email_available(pool, &email, Some(user_id)).await?;
            updates.email = Some(email);
        }

        if let Some(age) = req.age {
            validate_age(age).map_err(|m| FieldError::new("age", m))?;
            updates.age = Some(age);
        }

        if let Some(password) = req.password {
            let password = password.trim().to_string();
            validate_password(&password).map_err(|m| FieldError::new("password", m))?;
            let hash = PasswordService::hash_async(password)
                .await
                .map_err(ApiError::Internal)?;
            updates.password_hash = Some(hash);
        }

        let user = UserRepository::update(pool, user_id, updates)
            .await
            .map_err(ApiError::from_store)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        info!(%user_id, "Profile updated");
        Ok(user.into())
    }

    /// Delete an account with all of its tasks and sessions
    pub async fn delete_account(
        pool: &PgPool,
        notifier: &Notifier,
        user_id: Uuid,
    ) -> Result<PublicUser, ApiError> {
        let user: UserRecord = UserRepository::delete_with_tasks(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        info!(%user_id, "Account deleted");
        notifier.send_cancellation(&user.email, &user.name);

        Ok(user.into())
    }

    async fn ensure_email_available(
        pool: &PgPool,
        email: &str,
        except: Option<Uuid>,
    ) -> Result<(), ApiError> {
        let taken = UserRepository::email_taken(pool, email, except)
            .await
            .map_err(ApiError::Internal)?;

        if taken {
            return Err(FieldError::new("email", "Email is already in use").into());
        }
        Ok(())
    }
}
