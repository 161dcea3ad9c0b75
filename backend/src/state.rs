//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! The state is built once in `main` from the loaded configuration and is
//! read-only afterwards. Dropping the last clone closes the pool.

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::notify::Notifier;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
///
/// All fields are cheap to clone: the pool, the JWT keys and the mailer are
/// reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    /// Best-effort account email dispatch
    pub notifier: Notifier,
}

impl AppState {
    /// Create a new application state, choosing the mail transport from config
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        let notifier = Notifier::from_config(&config.email);
        Self::with_notifier(db, config, notifier)
    }

    /// Create a new application state with an explicit notifier
    pub fn with_notifier(db: PgPool, config: AppConfig, notifier: Notifier) -> Self {
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.token_ttl_secs);

        Self {
            db,
            config: Arc::new(config),
            jwt,
            notifier,
        }
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the JWT service
    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    /// Get a reference to the notifier
    #[inline]
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }
}
