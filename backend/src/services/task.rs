//! Task service
//!
//! All operations are scoped to the authenticated owner.

use crate::error::ApiError;
use crate::repositories::{CreateTask, TaskRepository, UpdateTask};
use serde_json::Value;
use sqlx::PgPool;
use task_manager_shared::validation::validate_description;
use task_manager_shared::{
    check_keys, CreateTaskRequest, FieldError, TaskField, TaskListQuery, TaskResponse,
    UpdateTaskRequest,
};
use tracing::debug;
use uuid::Uuid;

/// Task service for per-owner task operations
pub struct TaskService;

impl TaskService {
    /// Create a task owned by `owner_id`
    pub async fn create(
        pool: &PgPool,
        owner_id: Uuid,
        req: CreateTaskRequest,
    ) -> Result<TaskResponse, ApiError> {
        let description = req.description.trim().to_string();
        validate_description(&description).map_err(|m| FieldError::new("description", m))?;

        let task = TaskRepository::create(
            pool,
            CreateTask {
                owner_id,
                description,
                completed: req.completed,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        debug!(task_id = %task.id, %owner_id, "Task created");
        Ok(task.into())
    }

    /// List the owner's tasks
    pub async fn list(
        pool: &PgPool,
        owner_id: Uuid,
        query: &TaskListQuery,
    ) -> Result<Vec<TaskResponse>, ApiError> {
        let tasks = TaskRepository::list_for_owner(pool, owner_id, query)
            .await
            .map_err(ApiError::Internal)?;

        Ok(tasks.into_iter().map(Into::into).collect())
    }

    /// Get one of the owner's tasks
    pub async fn get(pool: &PgPool, owner_id: Uuid, id: Uuid) -> Result<TaskResponse, ApiError> {
        TaskRepository::find_owned(pool, id, owner_id)
            .await
            .map_err(ApiError::Internal)?
            .map(Into::into)
            .ok_or_else(task_not_found)
    }

    /// Apply a patch to one of the owner's tasks
    ///
    /// Keys are checked against [`TaskField`] first, then ownership, then
    /// value types.
    pub async fn update(
        pool: &PgPool,
        owner_id: Uuid,
        id: Uuid,
        body: Value,
    ) -> Result<TaskResponse, ApiError> {
        check_keys::<TaskField>(&body)?;

        TaskRepository::find_owned(pool, id, owner_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(task_not_found)?;

        let req: UpdateTaskRequest = serde_json::from_value(body)
            .map_err(|e| ApiError::Validation(format!("Invalid update: {}", e)))?;

        let description = match req.description {
            Some(description) => {
                let description = description.trim().to_string();
                validate_description(&description)
                    .map_err(|m| FieldError::new("description", m))?;
                Some(description)
            }
            None => None,
        };

        let updates = UpdateTask {
            description,
            completed: req.completed,
        };

        // The row may have been deleted since the lookup
        let task = TaskRepository::update_owned(pool, id, owner_id, updates)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(task_not_found)?;

        debug!(task_id = %task.id, %owner_id, "Task updated");
        Ok(task.into())
    }

    /// Delete one of the owner's tasks, returning it
    pub async fn delete(
        pool: &PgPool,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<TaskResponse, ApiError> {
        let task = TaskRepository::delete_owned(pool, id, owner_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(task_not_found)?;

        debug!(task_id = %task.id, %owner_id, "Task deleted");
        Ok(task.into())
    }
}

fn task_not_found() -> ApiError {
    ApiError::NotFound("Task not found".to_string())
}

/// Parse a task id from a path segment
///
/// A malformed id cannot name any task, so it is reported as not found.
pub fn parse_task_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| task_not_found())
}
