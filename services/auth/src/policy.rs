//! Role-based access policy

use crate::models::{Identity, Role};

/// Roles allowed to manage courses, students and attendance (admin is implied)
pub const STAFF: &[Role] = &[Role::Professor];

/// Outcome of an access check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Allowed,
    /// No identity is attached to the request
    Unauthenticated,
    /// The identity's role is not among the required roles
    Forbidden,
}

impl Authorization {
    pub fn is_allowed(self) -> bool {
        self == Authorization::Allowed
    }
}

/// Decide whether `identity` may perform an action restricted to `required_roles`
///
/// Admin is allowed everywhere. An empty `required_roles` only requires login.
pub fn authorize(identity: Option<&Identity>, required_roles: &[Role]) -> Authorization {
    let Some(identity) = identity else {
        return Authorization::Unauthenticated;
    };

    if identity.role == Role::Admin
        || required_roles.is_empty()
        || required_roles.contains(&identity.role)
    {
        Authorization::Allowed
    } else {
        Authorization::Forbidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn identity(role: Role) -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            username: role.as_str().to_string(),
            role,
            student_id: None,
        }
    }

    #[test]
    fn test_unauthenticated_is_always_denied() {
        assert_eq!(authorize(None, STAFF), Authorization::Unauthenticated);
        assert_eq!(authorize(None, &[]), Authorization::Unauthenticated);
    }

    #[test]
    fn test_admin_is_allowed_everywhere() {
        let admin = identity(Role::Admin);
        assert!(authorize(Some(&admin), STAFF).is_allowed());
        assert!(authorize(Some(&admin), &[Role::Student]).is_allowed());
        assert!(authorize(Some(&admin), &[]).is_allowed());
    }

    #[test]
    fn test_student_is_forbidden_on_staff_actions() {
        let student = identity(Role::Student);
        assert_eq!(authorize(Some(&student), STAFF), Authorization::Forbidden);
        assert!(authorize(Some(&student), &[]).is_allowed());
    }

    #[test]
    fn test_professor_is_allowed_on_staff_actions() {
        let professor = identity(Role::Professor);
        assert!(authorize(Some(&professor), STAFF).is_allowed());
        assert_eq!(
            authorize(Some(&professor), &[Role::Student]),
            Authorization::Forbidden
        );
    }
}
