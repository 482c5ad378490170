//! Role model and related functionality

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AuthError;

/// Role of a user account
///
/// Admin passes every role check; see [`crate::policy::authorize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Professor,
    Student,
}

impl Role {
    /// Roles a visitor may pick on the registration form
    pub const SELF_REGISTRABLE: [Role; 2] = [Role::Student, Role::Professor];

    /// Get the role name as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Professor => "professor",
            Role::Student => "student",
        }
    }

    /// Professors and admins manage courses, students and attendance
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Professor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "professor" => Ok(Role::Professor),
            "student" => Ok(Role::Student),
            other => Err(AuthError::UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names_round_trip_through_storage_form() {
        for role in [Role::Admin, Role::Professor, Role::Student] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!(matches!(
            "Admin".parse::<Role>(),
            Err(AuthError::UnknownRole(name)) if name == "Admin"
        ));
    }

    #[test]
    fn test_admin_cannot_self_register() {
        assert!(!Role::SELF_REGISTRABLE.contains(&Role::Admin));
        assert!(Role::Professor.is_staff());
        assert!(!Role::Student.is_staff());
    }
}
