//! Register Use Case
//!
//! Creates a new, disabled account and dispatches the activation email.
//! When delivery fails the account stays persisted and disabled; the
//! separate resend operation re-attempts notification.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::entity::{role::DEFAULT_ROLE, user::User};
use crate::domain::mailer::MailGateway;
use crate::domain::repository::{RoleRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<U, R, M>
where
    U: UserRepository,
    R: RoleRepository,
    M: MailGateway,
{
    user_repo: Arc<U>,
    role_repo: Arc<R>,
    mailer: Arc<M>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<U, R, M> RegisterUseCase<U, R, M>
where
    U: UserRepository,
    R: RoleRepository,
    M: MailGateway,
{
    pub fn new(
        user_repo: Arc<U>,
        role_repo: Arc<R>,
        mailer: Arc<M>,
        tokens: Arc<TokenService>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            mailer,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<()> {
        let email = Email::new(input.email)?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let raw_password = RawPassword::new(input.password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let default_role = self
            .role_repo
            .find_by_name(DEFAULT_ROLE)
            .await?
            .ok_or_else(|| AuthError::RoleNotFound(DEFAULT_ROLE.to_string()))?;

        let user = User::new(email.clone(), password_hash, default_role);

        let activation_token = self.tokens.issue_activation(&email)?;

        self.user_repo.create(&user).await?;

        tracing::info!(email = %email, "User registered, pending activation");

        // The account row is already committed; a delivery failure surfaces
        // as an error and the caller retries through resend_activation.
        self.send_activation_email(&email, &activation_token).await
    }

    /// Re-issue the activation token for an account stuck in
    /// pending-activation because the first email never arrived.
    pub async fn resend_activation(&self, email: &str) -> AuthResult<()> {
        let email = Email::new(email)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.enabled {
            return Err(AuthError::AlreadyActivated);
        }

        let activation_token = self.tokens.issue_activation(&email)?;

        tracing::info!(email = %email, "Re-sending activation email");

        self.send_activation_email(&email, &activation_token).await
    }

    async fn send_activation_email(&self, email: &Email, token: &str) -> AuthResult<()> {
        let link = self.config.activation_link(token);
        self.mailer
            .send_activation(email, email.as_str(), &link)
            .await
    }
}
