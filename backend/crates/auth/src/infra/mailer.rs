//! HTTP Mail Gateway
//!
//! Posts templated notifications to the external mail microservice. The
//! payload is a flat JSON string map, matching what the service expects.

use serde_json::json;

use crate::domain::mailer::MailGateway;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Mail microservice endpoints
const ACTIVATION_ENDPOINT: &str = "/api/activation";
const PASSWORD_RESET_ENDPOINT: &str = "/api/password-reset";
const SEND_OTP_ENDPOINT: &str = "/api/send-otp";

/// reqwest-backed mail gateway
#[derive(Clone)]
pub struct HttpMailGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpMailGateway {
    /// ## Arguments
    /// * `base_url` - e.g. `http://mail-service:8025`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn post(&self, endpoint: &str, payload: serde_json::Value) -> AuthResult<()> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AuthError::EmailDelivery(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::EmailDelivery(format!(
                "mail service returned {}",
                response.status()
            )));
        }

        tracing::debug!(endpoint = endpoint, "Mail dispatched");
        Ok(())
    }
}

impl MailGateway for HttpMailGateway {
    async fn send_activation(
        &self,
        to: &Email,
        name: &str,
        activation_link: &str,
    ) -> AuthResult<()> {
        self.post(
            ACTIVATION_ENDPOINT,
            json!({
                "to": to.as_str(),
                "name": name,
                "activationLink": activation_link,
            }),
        )
        .await
    }

    async fn send_password_reset(&self, to: &Email, reset_link: &str) -> AuthResult<()> {
        self.post(
            PASSWORD_RESET_ENDPOINT,
            json!({
                "to": to.as_str(),
                "resetLink": reset_link,
            }),
        )
        .await
    }

    async fn send_otp(&self, to: &Email, otp: &str) -> AuthResult<()> {
        self.post(
            SEND_OTP_ENDPOINT,
            json!({
                "to": to.as_str(),
                "otp": otp,
            }),
        )
        .await
    }
}
