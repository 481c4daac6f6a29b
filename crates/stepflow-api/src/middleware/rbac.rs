//! Role checks for guarded routes.
//!
//! Each handler that requires a role declares it with one of these helpers
//! as its first statement. An empty allowed set means any authenticated
//! identity is sufficient.

use stepflow_core::error::AppError;
use stepflow_entity::user::Role;

use crate::extractors::AuthUser;

/// Checks that the authenticated user holds the Admin role.
pub fn require_admin(auth: &AuthUser) -> Result<(), AppError> {
    require_any(auth, &[Role::Admin])
}

/// Checks that the authenticated user's role is in the allowed set.
pub fn require_any(auth: &AuthUser, allowed: &[Role]) -> Result<(), AppError> {
    if !allowed.is_empty() && !allowed.contains(&auth.role) {
        return Err(AppError::forbidden("Insufficient role for this operation"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::AuthContext;
    use stepflow_core::error::ErrorKind;
    use uuid::Uuid;

    fn auth(role: Role) -> AuthUser {
        AuthUser(AuthContext {
            user_id: Uuid::new_v4(),
            role,
        })
    }

    #[test]
    fn test_admin_gate() {
        assert!(require_admin(&auth(Role::Admin)).is_ok());
        let err = require_admin(&auth(Role::User)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[test]
    fn test_empty_set_allows_everyone() {
        assert!(require_any(&auth(Role::User), &[]).is_ok());
    }
}
