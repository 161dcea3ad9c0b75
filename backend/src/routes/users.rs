//! User routes
//!
//! Account lifecycle, session management, profile and avatar endpoints.
//! Signup, login and avatar fetch are public; everything else sits behind
//! [`require_auth`].

use crate::auth::{require_auth, AuthUser, SessionService};
use crate::error::{ApiError, ApiResult};
use crate::routes::extract::ApiJson;
use crate::services::{AvatarService, UserService};
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use task_manager_shared::{AuthResponse, LoginRequest, PublicUser, SignupRequest};

/// Room for multipart boundaries and part headers on top of the file itself
const MULTIPART_OVERHEAD_BYTES: usize = 16 * 1024;

/// Create user routes
pub fn user_routes(state: &AppState) -> Router<AppState> {
    let body_limit = state.config().upload.max_avatar_bytes + MULTIPART_OVERHEAD_BYTES;

    let protected = Router::new()
        .route("/logout", post(logout))
        .route("/logoutAll", post(logout_all))
        .route(
            "/me",
            get(get_profile).patch(update_profile).delete(delete_profile),
        )
        .route(
            "/me/avatar",
            post(upload_avatar)
                .layer(DefaultBodyLimit::max(body_limit))
                .delete(delete_avatar),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/", post(signup))
        .route("/login", post(login))
        .route("/:id/avatar", get(get_avatar))
        .merge(protected)
}

/// Register a new user
///
/// POST /users
async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let response = UserService::signup(state.db(), state.jwt(), state.notifier(), req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with email and password
///
/// POST /users/login
async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let response = UserService::login(state.db(), state.jwt(), req).await?;
    Ok(Json(response))
}

/// Revoke the token that authenticated this request
///
/// POST /users/logout
async fn logout(State(state): State<AppState>, auth: AuthUser) -> ApiResult<StatusCode> {
    SessionService::revoke_one(state.db(), auth.user_id(), &auth.token).await?;
    Ok(StatusCode::OK)
}

/// Revoke every token of the caller
///
/// POST /users/logoutAll
async fn logout_all(State(state): State<AppState>, auth: AuthUser) -> ApiResult<StatusCode> {
    SessionService::revoke_all(state.db(), auth.user_id()).await?;
    Ok(StatusCode::OK)
}

/// GET /users/me
async fn get_profile(auth: AuthUser) -> Json<PublicUser> {
    Json(auth.user.into())
}

/// PATCH /users/me
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<Json<PublicUser>> {
    let user = UserService::update_profile(state.db(), auth.user_id(), body).await?;
    Ok(Json(user))
}

/// DELETE /users/me
async fn delete_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<PublicUser>> {
    let user = UserService::delete_account(state.db(), state.notifier(), auth.user_id()).await?;
    Ok(Json(user))
}

/// Upload or replace the caller's avatar
///
/// POST /users/me/avatar (multipart, file field `avatar`)
async fn upload_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<StatusCode> {
    let multipart = multipart.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    let upload = &state.config().upload;

    let bytes = AvatarService::read_upload(multipart, upload.max_avatar_bytes).await?;
    AvatarService::upload(state.db(), auth.user_id(), bytes, upload.avatar_size_px).await?;

    Ok(StatusCode::OK)
}

/// DELETE /users/me/avatar
async fn delete_avatar(State(state): State<AppState>, auth: AuthUser) -> ApiResult<StatusCode> {
    AvatarService::remove(state.db(), auth.user_id()).await?;
    Ok(StatusCode::OK)
}

/// Serve a user's avatar as PNG
///
/// GET /users/:id/avatar
async fn get_avatar(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Response> {
    let png = AvatarService::fetch(state.db(), &id).await?;
    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}
