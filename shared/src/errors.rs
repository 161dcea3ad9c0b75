//! Error types for the Task Manager application

use thiserror::Error;

/// Errors raised while checking an update payload against an allow-list
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("Update payload must be a JSON object")]
    NotAnObject,

    #[error("Invalid updates: field '{0}' cannot be updated")]
    UnknownField(String),
}

/// A field-level validation failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}
