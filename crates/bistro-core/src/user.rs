//! User account types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// The role assigned to a user.
///
/// Every user starts as `Default`; only an existing admin can promote a
/// user to `Admin`. The role is always read back from storage when a
/// privileged operation is authorized — it is never carried inside a
/// credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A regular customer.
    Default,
    /// An administrator with access to menu mutation and stats.
    Admin,
}

impl Role {
    /// Check whether this role grants admin access.
    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// A registered user.
///
/// Users are created on first sign-in with insert-only-if-absent semantics
/// keyed by email: a second registration for the same email is a no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,

    /// Email address. Unique across all users.
    pub email: String,

    /// Display name, if provided at sign-in.
    pub name: Option<String>,

    /// Current role.
    pub role: Role,

    /// When the user was first registered.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the default role.
    #[must_use]
    pub fn new(email: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id: UserId::generate(),
            email: email.into(),
            name,
            role: Role::Default,
            created_at: Utc::now(),
        }
    }

    /// Check whether this user is an admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_is_not_admin() {
        let user = User::new("alice@example.com", None);
        assert!(!user.is_admin());
        assert_eq!(user.role, Role::Default);
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&Role::Default).unwrap(),
            "\"default\""
        );
    }
}
