//! API request and response types
//!
//! Field names follow the public wire format: camelCase keys and `_id`
//! as the identity key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// User Types
// ============================================================================

/// Public view of a user account
///
/// Never carries the password hash, the session tokens or the avatar bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Signup and login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: PublicUser,
    pub token: String,
}

/// Signup request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub age: Option<i32>,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Profile update request
///
/// Only keys listed in [`crate::patch::UserField`] may appear in the payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
}

// ============================================================================
// Task Types
// ============================================================================

/// Task response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub description: String,
    pub completed: bool,
    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Task creation request
///
/// Any `owner` key in the payload is ignored; the owner is always the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// Task update request
///
/// Only keys listed in [`crate::patch::TaskField`] may appear in the payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Raw query string of `GET /tasks`
///
/// Values are kept as strings so that malformed numbers are ignored
/// instead of rejecting the request. See [`crate::query::TaskListQuery`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListTasksParams {
    pub completed: Option<String>,
    pub limit: Option<String>,
    pub skip: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_public_user_wire_format() {
        let user = PublicUser {
            id: Uuid::new_v4(),
            name: "Thai".to_string(),
            email: "thai@ex.com".to_string(),
            age: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("_id").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("password").is_none());
        assert!(value.get("tokens").is_none());
        assert!(value.get("avatar").is_none());
    }

    #[test]
    fn test_create_task_ignores_owner() {
        let req: CreateTaskRequest = serde_json::from_value(json!({
            "description": "From test",
            "owner": Uuid::new_v4(),
        }))
        .unwrap();

        assert_eq!(req.description, "From test");
        assert!(!req.completed);
    }

    #[test]
    fn test_create_task_rejects_object_description() {
        let result = serde_json::from_value::<CreateTaskRequest>(json!({ "description": {} }));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_task_rejects_string_completed() {
        let result =
            serde_json::from_value::<UpdateTaskRequest>(json!({ "completed": "completed" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_list_params_sort_by_key() {
        let params: ListTasksParams =
            serde_json::from_value(json!({ "sortBy": "createdAt:desc" })).unwrap();
        assert_eq!(params.sort_by.as_deref(), Some("createdAt:desc"));
        assert!(params.completed.is_none());
    }
}
