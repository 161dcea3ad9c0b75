//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod task;
pub mod token;
pub mod user;

pub use task::{CreateTask, TaskRecord, TaskRepository, UpdateTask};
pub use token::TokenRepository;
pub use user::{CreateUser, UpdateUser, UserRecord, UserRepository};
