//! User Entity
//!
//! Account identity plus credentials. An account is created disabled and
//! becomes usable only after email activation flips the `enabled` flag.

use chrono::{DateTime, Utc};

use crate::domain::entity::role::Role;
use crate::domain::value_object::{email::Email, user_id::UserId, user_password::UserPassword};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Unique, lowercased email (also the login identifier)
    pub email: Email,
    /// Argon2id password hash
    pub password_hash: UserPassword,
    /// False until the account is activated by email
    pub enabled: bool,
    /// Assigned roles (seeded rows, at least the default role)
    pub roles: Vec<Role>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new, not-yet-activated user with the given default role
    pub fn new(email: Email, password_hash: UserPassword, default_role: Role) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            enabled: false,
            roles: vec![default_role],
            created_at: now,
            updated_at: now,
        }
    }

    /// Role names, in assignment order, for embedding into session tokens
    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.name.clone()).collect()
    }

    /// Check if user can login
    pub fn can_login(&self) -> bool {
        self.enabled
    }

    /// Replace the stored password hash
    pub fn set_password(&mut self, password_hash: UserPassword) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;

    fn test_user() -> User {
        let email = Email::new("user@example.com").unwrap();
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let hash = UserPassword::from_raw(&raw, None).unwrap();
        User::new(email, hash, Role::seeded_for_test("USER"))
    }

    #[test]
    fn test_new_user_starts_disabled() {
        let user = test_user();
        assert!(!user.enabled);
        assert!(!user.can_login());
    }

    #[test]
    fn test_role_names() {
        let user = test_user();
        assert_eq!(user.role_names(), vec!["USER".to_string()]);
    }
}
