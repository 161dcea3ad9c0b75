//! Task routes
//!
//! Every route requires authentication and only ever sees the caller's own
//! tasks.

use crate::auth::{require_auth, AuthUser};
use crate::error::{ApiError, ApiResult};
use crate::routes::extract::ApiJson;
use crate::services::task::parse_task_id;
use crate::services::TaskService;
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use task_manager_shared::{CreateTaskRequest, ListTasksParams, TaskListQuery, TaskResponse};

/// Create task routes
pub fn task_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_task).get(list_tasks))
        .route(
            "/:id",
            get(get_task).patch(update_task).delete(delete_task),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

/// POST /tasks
async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let task = TaskService::create(state.db(), auth.user_id(), req).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// List the caller's tasks
///
/// GET /tasks?completed=true&limit=10&skip=0&sortBy=createdAt:desc
async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    params: Result<Query<ListTasksParams>, QueryRejection>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let Query(params) = params.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    let query = TaskListQuery::from_params(&params);

    let tasks = TaskService::list(state.db(), auth.user_id(), &query).await?;
    Ok(Json(tasks))
}

/// GET /tasks/:id
async fn get_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<TaskResponse>> {
    let id = parse_task_id(&id)?;
    let task = TaskService::get(state.db(), auth.user_id(), id).await?;
    Ok(Json(task))
}

/// PATCH /tasks/:id
async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<Json<TaskResponse>> {
    let id = parse_task_id(&id)?;
    let task = TaskService::update(state.db(), auth.user_id(), id, body).await?;
    Ok(Json(task))
}

/// DELETE /tasks/:id
async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<TaskResponse>> {
    let id = parse_task_id(&id)?;
    let task = TaskService::delete(state.db(), auth.user_id(), id).await?;
    Ok(Json(task))
}
