//! Access roles.
//!
//! Stored as strings in `users.role` (matching the CHECK constraint in the
//! schema) and carried through JWT claims; parsed into [`Role`] at the
//! authentication boundary so handlers compare variants, not strings.

use crate::error::CoreError;

/// Database string for the administrator role.
pub const ROLE_ADMIN: &str = "admin";

/// Database string for the employee role.
pub const ROLE_EMPLOYEE: &str = "employee";

/// A user's access role.
///
/// Administrators manage patterns, rotations, and time adjustments;
/// employees view their schedule and receive notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    /// Database / claims string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Employee => ROLE_EMPLOYEE,
        }
    }

    /// Parse a stored role string back into a [`Role`].
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            ROLE_ADMIN => Ok(Self::Admin),
            ROLE_EMPLOYEE => Ok(Self::Employee),
            other => Err(CoreError::Validation(format!("Unknown role: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_db_string() {
        for role in [Role::Admin, Role::Employee] {
            assert_eq!(Role::parse(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(Role::parse("superuser").is_err());
        assert!(Role::parse("").is_err());
    }
}
