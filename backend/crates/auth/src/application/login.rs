//! Login Use Case
//!
//! Verifies credentials and issues a session token embedding role names.
//! Unknown email and wrong password both report `InvalidCredentials`.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    /// Session JWT for the Authorization header
    pub token: String,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.can_login() {
            return Err(AuthError::AccountDisabled);
        }

        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue_session(&email, user.role_names())?;

        tracing::info!(email = %email, "User logged in");

        Ok(LoginOutput { token })
    }
}
