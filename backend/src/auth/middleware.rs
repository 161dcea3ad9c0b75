//! Authentication middleware
//!
//! [`require_auth`] guards whole routers: it validates the bearer token and
//! stores an [`AuthUser`] in the request extensions, or answers 401 without
//! calling the handler. Handlers receive the context through the
//! [`AuthUser`] extractor.

use crate::auth::SessionService;
use crate::error::ApiError;
use crate::repositories::UserRecord;
use crate::state::AppState;
use axum::{
    extract::{FromRef, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Authenticated caller
///
/// Carries the resolved user and the exact token that authenticated this
/// request, so logout can revoke only the current session.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: UserRecord,
    pub token: String,
}

impl AuthUser {
    #[inline]
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }
}

/// Extract the bearer token from the Authorization header
fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(ApiError::unauthenticated)?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(ApiError::unauthenticated)
}

async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthUser, ApiError> {
    let token = bearer_token(headers)?;
    let user = SessionService::validate(state.db(), state.jwt(), token).await?;

    Ok(AuthUser {
        user,
        token: token.to_string(),
    })
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Already validated by `require_auth`
        if let Some(auth) = parts.extensions.get::<AuthUser>() {
            return Ok(auth.clone());
        }

        let app_state = AppState::from_ref(state);
        authenticate(&app_state, &parts.headers).await
    }
}

/// Middleware rejecting unauthenticated requests
///
/// Apply with `axum::middleware::from_fn_with_state(state, require_auth)`.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth = authenticate(&state, request.headers()).await?;

    request.extensions_mut().insert(auth);

    Ok(next.run(request).await)
}
