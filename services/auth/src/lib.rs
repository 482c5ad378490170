//! Authentication library for the Attendify application
//!
//! Roles and user accounts, password hashing, signed session tokens, the
//! role-based access policy and credential validation.

pub mod credential;
pub mod error;
pub mod models;
pub mod policy;
pub mod repositories;
pub mod session;
pub mod validation;

pub use error::{AuthError, AuthResult};
pub use models::{Identity, Role, User};
pub use policy::{Authorization, authorize};
pub use session::{SessionConfig, SessionManager};
