//! Role Entity
//!
//! Name-keyed label assigned to users. Rows are seeded by migration and
//! read-only at runtime.

use crate::domain::value_object::role_id::RoleId;

/// Name of the role assigned to every new registration
pub const DEFAULT_ROLE: &str = "USER";

/// Role entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub role_id: RoleId,
    pub name: String,
}

impl Role {
    /// Build a role with a fresh id, for tests that bypass the seeded table
    #[cfg(test)]
    pub fn seeded_for_test(name: &str) -> Self {
        Self {
            role_id: RoleId::new(),
            name: name.to_string(),
        }
    }
}
