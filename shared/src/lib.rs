//! Task Manager Shared Library
//!
//! This crate contains the wire types, input validation, update allow-lists
//! and task list query parsing shared by the backend and its clients.

pub mod errors;
pub mod patch;
pub mod query;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use patch::{check_keys, PatchField, TaskField, UserField};
pub use query::{SortDirection, SortField, TaskListQuery, TaskSort};
pub use types::*;
