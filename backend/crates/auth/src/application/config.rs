//! Application Configuration
//!
//! Configuration for the Auth application layer. Secrets are injected at
//! construction; nothing in this crate reads ambient global state.

use std::time::Duration;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret for session and activation tokens
    pub jwt_secret: Vec<u8>,
    /// Session token TTL (3 minutes)
    pub session_ttl: Duration,
    /// Activation token TTL (24 hours)
    pub activation_ttl: Duration,
    /// Password-reset token TTL (1 hour)
    pub reset_token_ttl: Duration,
    /// One-time password TTL (5 minutes)
    pub otp_ttl: Duration,
    /// Base URL used when building activation/reset links in emails
    pub external_base_url: String,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: vec![0u8; 32],
            // Session vs activation TTL asymmetry is inherited from the
            // original deployment; both are plain configuration here.
            session_ttl: Duration::from_secs(3 * 60),
            activation_ttl: Duration::from_secs(24 * 3600),
            reset_token_ttl: Duration::from_secs(3600),
            otp_ttl: Duration::from_secs(5 * 60),
            external_base_url: "localhost:8080".to_string(),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            jwt_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Session TTL as a chrono duration
    pub fn session_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.session_ttl.as_secs() as i64)
    }

    /// Activation TTL as a chrono duration
    pub fn activation_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.activation_ttl.as_secs() as i64)
    }

    /// Reset-token TTL as a chrono duration
    pub fn reset_token_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.reset_token_ttl.as_secs() as i64)
    }

    /// OTP TTL as a chrono duration
    pub fn otp_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.otp_ttl.as_secs() as i64)
    }

    /// Link pasted into activation emails
    pub fn activation_link(&self, token: &str) -> String {
        format!("{}/activate?token={}", self.external_base_url, token)
    }

    /// Link pasted into password-reset emails
    pub fn reset_link(&self, token: &str) -> String {
        format!("{}/reset-password-Token?token={}", self.external_base_url, token)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
