//! One-Time Password Use Case
//!
//! Issues a short-lived six-digit code and delivers it through the mail
//! microservice. Re-requesting replaces the live code.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::verification_token::VerificationToken;
use crate::domain::mailer::MailGateway;
use crate::domain::repository::{UserRepository, VerificationTokenRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// OTP use case
pub struct OtpUseCase<U, V, M>
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

impl<U, V, M> OtpUseCase<U, V, M>
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

    pub async fn request(&self, email: &str) -> AuthResult<()> {
        let email = Email::new(email)?;

        if self.user_repo.find_by_email(&email).await?.is_none() {
            return Err(AuthError::UserNotFound);
        }

        let token = VerificationToken::otp(email.clone(), self.config.otp_ttl_chrono());

        self.token_repo.upsert(&token).await?;

        self.mailer.send_otp(&email, &token.token).await?;

        tracing::info!(email = %email, "One-time password issued");
        Ok(())
    }
}
