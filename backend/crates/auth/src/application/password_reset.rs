//! Password Reset Use Case
//!
//! Two halves of one flow: `request` mails out a fresh reset token
//! (replacing any live one for the email), `reset` redeems it.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::verification_token::VerificationToken;
use crate::domain::mailer::MailGateway;
use crate::domain::repository::{UserRepository, VerificationTokenRepository};
use crate::domain::value_object::{
    email::Email,
    token_kind::TokenKind,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Password reset use case
pub struct PasswordResetUseCase<U, V, M>
where
    U: UserRepository,
    V: VerificationTokenRepository,
    M: MailGateway,
{
    user_repo: Arc<U>,
    token_repo: Arc<V>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<U, V, M> PasswordResetUseCase<U, V, M>
where
    U: UserRepository,
    V: VerificationTokenRepository,
    M: MailGateway,
{
    pub fn new(
        user_repo: Arc<U>,
        token_repo: Arc<V>,
        mailer: Arc<M>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            token_repo,
            mailer,
            config,
        }
    }

    /// Issue a reset token and mail the reset link.
    ///
    /// An unknown email reports `UserNotFound`, which discloses account
    /// existence through this endpoint (kept from the source behavior).
    pub async fn request(&self, email: &str) -> AuthResult<()> {
        let email = Email::new(email)?;

        if self.user_repo.find_by_email(&email).await?.is_none() {
            return Err(AuthError::UserNotFound);
        }

        let token =
            VerificationToken::password_reset(email.clone(), self.config.reset_token_ttl_chrono());

        // Single statement keyed on (email, kind): two concurrent requests
        // cannot leave two live tokens behind.
        self.token_repo.upsert(&token).await?;

        let reset_link = self.config.reset_link(&token.token);
        self.mailer.send_password_reset(&email, &reset_link).await?;

        tracing::info!(email = %email, "Password reset token issued");
        Ok(())
    }

    /// Redeem a reset token and store the new password hash.
    ///
    /// The token is consumed on success; a second redemption fails.
    pub async fn reset(&self, token: &str, new_password: String) -> AuthResult<()> {
        let stored = self
            .token_repo
            .find_by_token(token, TokenKind::PasswordReset)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if stored.is_expired() {
            return Err(AuthError::TokenExpired);
        }

        let user = self
            .user_repo
            .find_by_email(&stored.email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let new_password = RawPassword::new(new_password)?;
        let new_hash = UserPassword::from_raw(&new_password, self.config.pepper())?;

        self.user_repo
            .update_password(&user.email, &new_hash)
            .await?;

        self.token_repo
            .delete(&stored.email, TokenKind::PasswordReset)
            .await?;

        tracing::info!(email = %stored.email, "Password reset by token");
        Ok(())
    }
}
