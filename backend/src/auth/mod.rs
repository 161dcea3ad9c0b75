//! Authentication module
//!
//! JWT session tokens checked against a live per-user token set, and
//! argon2 password hashing.

mod jwt;
mod middleware;
mod password;
mod session;

pub use jwt::{Claims, JwtService};
pub use middleware::{require_auth, AuthUser};
pub use password::{PasswordService, DUMMY_HASH};
pub use session::SessionService;
