//! Mail Gateway Trait
//!
//! Outbound port to the mail microservice. The transport implementation is
//! in the infrastructure layer.

use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// Mail gateway trait
#[trait_variant::make(MailGateway: Send)]
pub trait LocalMailGateway {
    /// Deliver an account-activation email carrying the activation link
    async fn send_activation(
        &self,
        to: &Email,
        name: &str,
        activation_link: &str,
    ) -> AuthResult<()>;

    /// Deliver a password-reset email carrying the reset link
    async fn send_password_reset(&self, to: &Email, reset_link: &str) -> AuthResult<()>;

    /// Deliver a one-time password
    async fn send_otp(&self, to: &Email, otp: &str) -> AuthResult<()>;
}
