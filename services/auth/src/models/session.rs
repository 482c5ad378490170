//! Session claims and the identity resolved from them

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Role, User};

/// Claims carried by a signed session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID
    pub sub: Uuid,
    /// Role at the time of login
    pub role: Role,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// The authenticated identity making the current request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
    pub student_id: Option<Uuid>,
}

impl Identity {
    /// Student record this identity may see its own data for
    ///
    /// `None` for staff and for student accounts that have not been linked yet.
    pub fn linked_student(&self) -> Option<Uuid> {
        match self.role {
            Role::Student => self.student_id,
            _ => None,
        }
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
            student_id: user.student_id,
        }
    }
}
