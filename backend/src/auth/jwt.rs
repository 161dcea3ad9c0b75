//! JWT session token signing and verification
//!
//! Tokens carry the user id as `sub` and a random `jti`, so every issued
//! token is a distinct string even within the same second. Without a
//! configured TTL no `exp` claim is written and tokens stay valid until
//! they are removed from the user's token set.

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Unique token id
    pub jti: String,
    /// Expiration time (Unix timestamp), absent for non-expiring tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Parse the subject as a user id
    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| anyhow::anyhow!("Invalid user ID in token"))
    }
}

/// Pre-computed JWT keys for efficient token operations
/// These are expensive to create, so we cache them in AppState
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    /// This should be called once at startup
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// JWT service for token operations
///
/// Keys and the validation policy are built once and shared through `Arc`.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    validation: Arc<Validation>,
    token_ttl_secs: Option<i64>,
}

impl JwtService {
    /// Create a new JWT service with pre-computed keys
    ///
    /// # Performance Note
    /// Call this once at application startup and store in AppState.
    /// Do NOT create per-request.
    pub fn new(secret: &str, token_ttl_secs: Option<i64>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        match token_ttl_secs {
            Some(_) => {
                validation.required_spec_claims = HashSet::from(["exp".to_string()]);
                validation.validate_exp = true;
            }
            None => {
                validation.required_spec_claims = HashSet::new();
                validation.validate_exp = false;
            }
        }

        Self {
            keys: JwtKeys::new(secret),
            validation: Arc::new(validation),
            token_ttl_secs,
        }
    }

    /// Sign a new session token for a user
    pub fn issue_token(&self, user_id: Uuid) -> Result<String> {
        let now = Utc::now();

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
            exp: self
                .token_ttl_secs
                .map(|ttl| (now + Duration::seconds(ttl)).timestamp()),
        };

        encode(&Header::default(), &claims, self.keys.encoding())
            .map_err(|e| anyhow::anyhow!("Failed to sign session token: {}", e))
    }

    /// Verify a token's signature (and expiry, when a TTL is configured)
    #[inline]
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, self.keys.decoding(), &self.validation)
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;

        Ok(token_data.claims)
    }
}
