//! Verification Token Entity
//!
//! Single-use secret tied to an email and a purpose, with expiry.
//! Persisting a new token replaces any live one for the same (email, kind).

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::domain::value_object::{email::Email, token_kind::TokenKind};

/// Verification token entity
#[derive(Debug, Clone)]
pub struct VerificationToken {
    /// Opaque secret handed to the user
    pub token: String,
    /// Owner email
    pub email: Email,
    /// Purpose tag
    pub kind: TokenKind,
    /// Expiry timestamp
    pub expires_at: DateTime<Utc>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl VerificationToken {
    /// New password-reset token: a random UUID string
    pub fn password_reset(email: Email, ttl: Duration) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), email, TokenKind::PasswordReset, ttl)
    }

    /// New one-time password: six random digits
    pub fn otp(email: Email, ttl: Duration) -> Self {
        let code = rand::rng().random_range(100_000..1_000_000u32);
        Self::new(code.to_string(), email, TokenKind::OtpVerification, ttl)
    }

    fn new(token: String, email: Email, kind: TokenKind, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            token,
            email,
            kind,
            expires_at: now + ttl,
            created_at: now,
        }
    }

    /// Check if the token lifetime has passed
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> Email {
        Email::new("user@example.com").unwrap()
    }

    #[test]
    fn test_password_reset_token_is_uuid() {
        let token = VerificationToken::password_reset(email(), Duration::hours(1));
        assert_eq!(token.kind, TokenKind::PasswordReset);
        assert!(uuid::Uuid::parse_str(&token.token).is_ok());
        assert!(!token.is_expired());
    }

    #[test]
    fn test_otp_is_six_digits() {
        let token = VerificationToken::otp(email(), Duration::minutes(5));
        assert_eq!(token.kind, TokenKind::OtpVerification);
        assert_eq!(token.token.len(), 6);
        assert!(token.token.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_expired_token() {
        let token = VerificationToken::password_reset(email(), Duration::seconds(-1));
        assert!(token.is_expired());
    }
}
