//! Authentication models

pub mod role;
pub mod session;
pub mod user;

// Re-export for convenience
pub use role::Role;
pub use session::{Identity, SessionClaims};
pub use user::{LoginCredentials, NewUser, User};
