//! Activate Use Case
//!
//! Redeems an activation token (a signed JWT, not a stored verification
//! token) and flips the account's enabled flag.

use std::sync::Arc;

use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Activate use case
pub struct ActivateUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U> ActivateUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { user_repo, tokens }
    }

    pub async fn execute(&self, token: &str) -> AuthResult<()> {
        // Tampered or expired tokens fail here, before any state changes
        let claims = self.tokens.claims(token)?;
        let email = Email::from_db(&claims.sub);

        let enabled = self.user_repo.enable(&email).await?;
        if !enabled {
            tracing::warn!(email = %email, "Activation for unknown account");
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(email = %email, "Account activated");
        Ok(())
    }
}
