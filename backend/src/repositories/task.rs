//! Task repository for database operations
//!
//! Every query that reads or mutates a single task takes both the task id
//! and the owner id, so a task owned by someone else behaves exactly like a
//! missing one.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use task_manager_shared::{SortDirection, SortField, TaskListQuery, TaskResponse};
use uuid::Uuid;

const TASK_COLUMNS: &str = "id, description, completed, owner_id, created_at, updated_at";

/// Task record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TaskRecord {
    pub id: Uuid,
    pub description: String,
    pub completed: bool,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TaskRecord> for TaskResponse {
    fn from(task: TaskRecord) -> Self {
        Self {
            id: task.id,
            description: task.description,
            completed: task.completed,
            owner: task.owner_id,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// Input for creating a task
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub owner_id: Uuid,
    pub description: String,
    pub completed: bool,
}

/// Input for updating a task; `None` leaves the column unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// Task repository for database operations
pub struct TaskRepository;

impl TaskRepository {
    /// Create a new task
    pub async fn create(pool: &PgPool, input: CreateTask) -> Result<TaskRecord> {
        let task = sqlx::query_as::<_, TaskRecord>(&format!(
            r#"
            INSERT INTO tasks (owner_id, description, completed)
            VALUES ($1, $2, $3)
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(input.owner_id)
        .bind(&input.description)
        .bind(input.completed)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// List an owner's tasks with filter, sort and pagination applied
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: Uuid,
        query: &TaskListQuery,
    ) -> Result<Vec<TaskRecord>> {
        let mut builder = Self::list_query(owner_id, query);
        let tasks = builder
            .build_query_as::<TaskRecord>()
            .fetch_all(pool)
            .await?;

        Ok(tasks)
    }

    fn list_query(owner_id: Uuid, query: &TaskListQuery) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE owner_id = "
        ));
        builder.push_bind(owner_id);

        if let Some(completed) = query.completed {
            builder.push(" AND completed = ").push_bind(completed);
        }

        // Ties fall back to id so pages stay stable
        match query.sort {
            Some(sort) => {
                let direction = sort_direction(sort.direction);
                builder.push(format!(
                    " ORDER BY {} {direction}, id {direction}",
                    sort_column(sort.field)
                ));
            }
            None => {
                builder.push(" ORDER BY created_at ASC, id ASC");
            }
        }

        if let Some(limit) = query.limit {
            builder.push(" LIMIT ").push_bind(limit);
        }
        if let Some(skip) = query.skip {
            builder.push(" OFFSET ").push_bind(skip);
        }

        builder
    }

    /// Find a task by id, only if owned by `owner_id`
    pub async fn find_owned(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<TaskRecord>> {
        let task = sqlx::query_as::<_, TaskRecord>(&format!(
            r#"
            SELECT {TASK_COLUMNS}
            FROM tasks
            WHERE id = $1 AND owner_id = $2
            "#
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Update a task, only if owned by `owner_id`
    pub async fn update_owned(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
        updates: UpdateTask,
    ) -> Result<Option<TaskRecord>> {
        let task = sqlx::query_as::<_, TaskRecord>(&format!(
            r#"
            UPDATE tasks SET
                description = COALESCE($3, description),
                completed = COALESCE($4, completed),
                updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(owner_id)
        .bind(updates.description)
        .bind(updates.completed)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Delete a task, only if owned by `owner_id`
    pub async fn delete_owned(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<TaskRecord>> {
        let task = sqlx::query_as::<_, TaskRecord>(&format!(
            r#"
            DELETE FROM tasks
            WHERE id = $1 AND owner_id = $2
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Delete every task of an owner inside an open transaction
    pub async fn delete_all_for_owner(conn: &mut PgConnection, owner_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM tasks WHERE owner_id = $1")
            .bind(owner_id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }
}

fn sort_column(field: SortField) -> &'static str {
    match field {
        SortField::CreatedAt => "created_at",
        SortField::UpdatedAt => "updated_at",
        SortField::Description => "description",
        SortField::Completed => "completed",
    }
}

fn sort_direction(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    }
}
