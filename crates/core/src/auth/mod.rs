//! Users, roles, password hashing and session authentication.

mod password;
mod user;

pub use password::{PasswordError, hash_password, verify_password};
pub use user::{CreateUserInput, NewUser, User, UserRepository, UserService};

use bizdesk_shared::auth::{ADMIN_ROLE, USER_ROLE};
use serde::{Deserialize, Serialize};

/// Access level carried in access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// May delete records.
    Admin,
    /// Regular authenticated user.
    User,
}

impl Role {
    /// Role for a user record.
    #[must_use]
    pub const fn for_user(is_admin: bool) -> Self {
        if is_admin { Self::Admin } else { Self::User }
    }

    /// Name of the role as stored in token claims.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => ADMIN_ROLE,
            Self::User => USER_ROLE,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names_match_claims() {
        assert_eq!(Role::for_user(true), Role::Admin);
        assert_eq!(Role::for_user(false), Role::User);
        assert_eq!(Role::Admin.to_string(), ADMIN_ROLE);
        assert_eq!(Role::User.as_str(), USER_ROLE);
    }
}
