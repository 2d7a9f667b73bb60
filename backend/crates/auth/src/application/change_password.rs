//! Change Password Use Case
//!
//! Authenticated-by-knowledge password change: requires the current
//! password to verify against the stored hash.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Change password input
pub struct ChangePasswordInput {
    pub email: String,
    pub old_password: String,
    pub new_password: String,
}

/// Change password use case
pub struct ChangePasswordUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> ChangePasswordUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Distinguishes `UserNotFound` from `InvalidCredentials` internally;
    /// the HTTP boundary collapses both into one response.
    pub async fn execute(&self, input: ChangePasswordInput) -> AuthResult<()> {
        let email = Email::new(input.email)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let old_password =
            RawPassword::new(input.old_password).map_err(|_| AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&old_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let new_password = RawPassword::new(input.new_password)?;
        let new_hash = UserPassword::from_raw(&new_password, self.config.pepper())?;

        self.user_repo.update_password(&email, &new_hash).await?;

        tracing::info!(email = %email, "Password changed");
        Ok(())
    }
}
