//! Request extractors with API-shaped rejections

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// JSON body extractor whose rejections are 400 [`ApiError`]s
///
/// Syntax errors, a missing content type and values of the wrong type all
/// surface in the same error envelope as every other validation failure.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

        let inner = serde_json::from_value(value)
            .map_err(|e| ApiError::Validation(format!("Invalid request body: {}", e)))?;

        Ok(Self(inner))
    }
}
