//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer.

use crate::domain::entity::{role::Role, user::User, verification_token::VerificationToken};
use crate::domain::value_object::{
    email::Email, token_kind::TokenKind, user_password::UserPassword,
};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user with its role assignments
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user (with roles) by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if an email is already registered
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Flip the enabled flag; returns false when no row matched
    async fn enable(&self, email: &Email) -> AuthResult<bool>;

    /// Replace the stored password hash
    async fn update_password(
        &self,
        email: &Email,
        password_hash: &UserPassword,
    ) -> AuthResult<()>;
}

/// Role repository trait (seeded, read-only)
#[trait_variant::make(RoleRepository: Send)]
pub trait LocalRoleRepository {
    /// Find a role by its unique name
    async fn find_by_name(&self, name: &str) -> AuthResult<Option<Role>>;
}

/// Verification token repository trait
#[trait_variant::make(VerificationTokenRepository: Send)]
pub trait LocalVerificationTokenRepository {
    /// Store a token, atomically replacing any live one for (email, kind)
    async fn upsert(&self, token: &VerificationToken) -> AuthResult<()>;

    /// Find a token by its secret and purpose
    async fn find_by_token(
        &self,
        token: &str,
        kind: TokenKind,
    ) -> AuthResult<Option<VerificationToken>>;

    /// Find the live token for an email and purpose
    async fn find_by_email(
        &self,
        email: &Email,
        kind: TokenKind,
    ) -> AuthResult<Option<VerificationToken>>;

    /// Consume the token for (email, kind)
    async fn delete(&self, email: &Email, kind: TokenKind) -> AuthResult<()>;
}
