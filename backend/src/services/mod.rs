//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and external systems.

pub mod avatar;
pub mod task;
pub mod user;

pub use avatar::AvatarService;
pub use task::TaskService;
pub use user::UserService;
